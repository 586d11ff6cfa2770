use std::borrow::Cow;
use std::path::Path;

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::changes::{FileStatus, InputFormat};
use crate::ext::BestEffortPathExt;

const CHANGES_KEY: &str = "changes";

/// Changed files with their status, in the order the provider listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: LinkedHashMap<String, FileStatus>,
}

impl ChangeSet {
    /// Reads a change set file, detecting the format from its extension
    /// unless `format` is given.
    pub async fn read(path: &Path, format: Option<InputFormat>) -> Result<Self, ChangeSetError> {
        let format = format.unwrap_or_else(|| InputFormat::detect(path));
        debug!(
            "Reading {} change set from {}",
            format,
            path.best_effort_path_display()
        );

        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;

        let change_set = match format {
            InputFormat::Yaml => Self::from_yaml(&contents)?,
            InputFormat::NameStatus => Self::from_name_status(&contents)?,
        };
        debug!("Read {} changed files", change_set.len());
        Ok(change_set)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ChangeSetError> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedChangeSetSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let changes = match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(CHANGES_KEY)))) {
            None | Some(Yaml::Value(Scalar::Null)) => return Ok(Self::default()),
            Some(changes) => changes.as_mapping().context(ChangesNotMapSnafu)?,
        };

        let mut entries = LinkedHashMap::new();
        for (key, value) in changes {
            let Yaml::Value(Scalar::String(path)) = key else {
                return InvalidEntrySnafu {
                    key: describe_key(key),
                }
                .fail();
            };
            let status_name = value.as_str().context(InvalidEntrySnafu {
                key: path.to_string(),
            })?;
            let status = FileStatus::from_name(status_name).context(UnknownStatusSnafu {
                path: path.to_string(),
                status: status_name,
            })?;
            entries.insert(path.to_string(), status);
        }

        Ok(Self { entries })
    }

    /// Parses `git diff --name-status` output. Renames and copies are
    /// listed under their destination path.
    ///
    /// A status code is one letter optionally followed by a similarity
    /// score. `R` and `C` lines carry a source and a destination path, every
    /// other line exactly one path. Quoted paths are unquoted the way git
    /// quotes them.
    pub fn from_name_status(contents: &str) -> Result<Self, ChangeSetError> {
        let mut entries = LinkedHashMap::new();

        for (index, line) in contents.lines().enumerate() {
            let line_number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            let [code, paths @ ..] = fields.as_slice() else {
                return MalformedLineSnafu { line_number }.fail();
            };
            let mut code_chars = code.chars();
            let letter = code_chars
                .next()
                .context(MalformedLineSnafu { line_number })?;
            let status = FileStatus::from_letter(letter)
                .context(UnknownStatusLetterSnafu { line_number, letter })?;
            ensure!(
                code_chars.all(|score| score.is_ascii_digit()),
                InvalidStatusCodeSnafu { line_number, code: *code }
            );

            let expected_paths = match letter {
                'R' | 'C' => 2,
                _ => 1,
            };
            ensure!(
                paths.len() == expected_paths,
                MalformedLineSnafu { line_number }
            );
            let path = paths
                .last()
                .filter(|path| !path.is_empty())
                .and_then(|path| unquote_path(path))
                .context(MalformedLineSnafu { line_number })?;

            entries.insert(path, status);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &LinkedHashMap<String, FileStatus> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shows a mapping key by its value, as written in the file.
fn describe_key(key: &Yaml) -> String {
    match key {
        Yaml::Value(Scalar::String(value)) => value.to_string(),
        Yaml::Value(Scalar::Integer(value)) => value.to_string(),
        Yaml::Value(Scalar::FloatingPoint(value)) => value.to_string(),
        Yaml::Value(Scalar::Boolean(value)) => value.to_string(),
        Yaml::Value(Scalar::Null) => "null".to_string(),
        Yaml::Sequence(_) => "(a sequence)".to_string(),
        Yaml::Mapping(_) => "(a mapping)".to_string(),
        _ => "(an unsupported node)".to_string(),
    }
}

/// Undoes git's C-style path quoting. Unquoted paths are returned as they
/// are; `None` when the quoting is broken or the bytes are not UTF-8.
fn unquote_path(path: &str) -> Option<String> {
    let Some(quoted) = path.strip_prefix('"') else {
        return Some(path.to_string());
    };
    let inner = quoted.strip_suffix('"')?;

    let mut bytes = Vec::with_capacity(inner.len());
    let mut rest = inner.bytes();
    while let Some(byte) = rest.next() {
        if byte == b'"' {
            return None;
        }
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        let unescaped = match rest.next()? {
            b'a' => 0x07,
            b'b' => 0x08,
            b't' => b'\t',
            b'n' => b'\n',
            b'v' => 0x0b,
            b'f' => 0x0c,
            b'r' => b'\r',
            b'"' => b'"',
            b'\\' => b'\\',
            first @ b'0'..=b'3' => {
                let second = rest.next().filter(u8::is_ascii_digit)?;
                let third = rest.next().filter(u8::is_ascii_digit)?;
                if second > b'7' || third > b'7' {
                    return None;
                }
                ((first - b'0') << 6) | ((second - b'0') << 3) | (third - b'0')
            }
            _ => return None,
        };
        bytes.push(unescaped);
    }

    String::from_utf8(bytes).ok()
}

impl From<LinkedHashMap<String, FileStatus>> for ChangeSet {
    fn from(entries: LinkedHashMap<String, FileStatus>) -> Self {
        Self { entries }
    }
}

#[derive(Debug, Snafu)]
pub enum ChangeSetError {
    #[snafu(display("Failed to read the change set file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Change set file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the change set file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted change set file"))]
    MalformedChangeSet,
    #[snafu(display("Top level of the change set should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Changes section should be a map"))]
    ChangesNotMap,
    #[snafu(display("Change entry {} should map a path to a status name", key))]
    InvalidEntry { key: String },
    #[snafu(display("Unknown status '{}' for '{}'", status, path))]
    UnknownStatus { path: String, status: String },
    #[snafu(display("Line {} is not '<status>\\t<path>'", line_number))]
    MalformedLine { line_number: usize },
    #[snafu(display("Unknown status letter '{}' on line {}", letter, line_number))]
    UnknownStatusLetter { line_number: usize, letter: char },
    #[snafu(display("Invalid status code '{}' on line {}", code, line_number))]
    InvalidStatusCode { line_number: usize, code: String },
}
