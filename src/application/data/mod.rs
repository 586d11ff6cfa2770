mod color_choice;
mod log_level;
mod view_mode;

pub use color_choice::ColorChoice;
pub use log_level::LogLevel;
pub use view_mode::ViewMode;
