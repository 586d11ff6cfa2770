use colored::Color;
use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FileStatus {
    #[display("added")]
    Added,
    #[display("modified")]
    Modified,
    #[display("deleted")]
    Deleted,
    #[display("renamed")]
    Renamed,
    #[display("copied")]
    Copied,
    #[display("untracked")]
    Untracked,
    #[display("unmodified")]
    Unmodified,
}

impl FileStatus {
    const ALL: [FileStatus; 7] = [
        FileStatus::Added,
        FileStatus::Modified,
        FileStatus::Deleted,
        FileStatus::Renamed,
        FileStatus::Copied,
        FileStatus::Untracked,
        FileStatus::Unmodified,
    ];

    /// Parses a status name such as `modified`, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(name))
    }

    /// Parses a `git diff --name-status` letter. Type changes count as
    /// modifications.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(FileStatus::Added),
            'M' | 'T' => Some(FileStatus::Modified),
            'D' => Some(FileStatus::Deleted),
            'R' => Some(FileStatus::Renamed),
            'C' => Some(FileStatus::Copied),
            '?' => Some(FileStatus::Untracked),
            _ => None,
        }
    }

    pub fn marker(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
            FileStatus::Copied => 'C',
            FileStatus::Untracked => '?',
            FileStatus::Unmodified => ' ',
        }
    }

    pub fn color(&self) -> Color {
        match self {
            FileStatus::Added | FileStatus::Untracked => Color::Green,
            FileStatus::Modified => Color::Blue,
            FileStatus::Deleted => Color::Red,
            FileStatus::Renamed | FileStatus::Copied => Color::Yellow,
            FileStatus::Unmodified => Color::White,
        }
    }
}
