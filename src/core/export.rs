//! Plain-text export of a conversation.

use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;
use tracing::info;

use crate::core::message::Turn;

/// Separator between exported turns.
pub const TURN_SEPARATOR: &str = "\n\n";

/// Render turns as `[timestamp] ROLE: content`, one entry per turn, in order.
pub fn serialize(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| {
            format!(
                "[{}] {}: {}",
                turn.timestamp(),
                turn.role().export_label(),
                turn.content()
            )
        })
        .collect::<Vec<_>>()
        .join(TURN_SEPARATOR)
}

/// `conversation_<YYYYMMDD>_<HHMMSS>.txt`, stamped with the export time.
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("conversation_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug)]
pub enum ExportError {
    /// There is nothing to export.
    EmptyConversation,

    /// The target file is already there.
    AlreadyExists(PathBuf),

    /// Writing the file failed.
    Write {
        /// Destination that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptyConversation => {
                write!(f, "No conversation to export - the chat history is empty.")
            }
            ExportError::AlreadyExists(path) => {
                write!(f, "File '{}' already exists.", path.display())
            }
            ExportError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for ExportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ExportError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Write the serialized conversation into `dir` under the timestamped name.
///
/// The file is staged in the same directory and renamed into place so a
/// failed write never leaves a partial export behind.
pub fn write_export(
    dir: &Path,
    turns: &[Turn],
    now: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    if turns.is_empty() {
        return Err(ExportError::EmptyConversation);
    }

    let path = dir.join(export_filename(now));
    if path.exists() {
        return Err(ExportError::AlreadyExists(path));
    }

    let wrap = |source: io::Error| ExportError::Write {
        path: path.clone(),
        source,
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(wrap)?;
    staged
        .write_all(serialize(turns).as_bytes())
        .map_err(wrap)?;
    staged.flush().map_err(wrap)?;
    staged.as_file().sync_all().map_err(wrap)?;
    staged
        .persist_noclobber(&path)
        .map_err(|err| wrap(err.error))?;

    info!(path = %path.display(), turns = turns.len(), "Conversation exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_turns;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 31, 23, 4, 5).unwrap()
    }

    #[test]
    fn serialize_formats_each_turn_on_its_own_entry() {
        let turns = create_test_turns();
        let text = serialize(&turns);

        assert_eq!(
            text,
            "[09:15:00] USER: Hello\n\n\
             [09:15:02] ASSISTANT: Hi there!\n\n\
             [09:15:10] USER: How are you?\n\n\
             [09:15:13] ASSISTANT: I'm doing well, thank you for asking!"
        );
    }

    #[test]
    fn serialized_entries_recover_role_timestamp_and_content() {
        let turns = create_test_turns();
        let text = serialize(&turns);

        let entries: Vec<_> = text.split(TURN_SEPARATOR).collect();
        assert_eq!(entries.len(), turns.len());
        for (entry, turn) in entries.iter().zip(&turns) {
            let rest = entry.strip_prefix('[').expect("opening bracket");
            let (timestamp, rest) = rest.split_once("] ").expect("closing bracket");
            let (role, content) = rest.split_once(": ").expect("role separator");
            assert_eq!(timestamp, turn.timestamp());
            assert_eq!(role, turn.role().export_label());
            assert_eq!(content, turn.content());
        }
    }

    #[test]
    fn serialize_of_nothing_is_empty() {
        assert_eq!(serialize(&[]), "");
    }

    #[test]
    fn filename_uses_export_time() {
        assert_eq!(
            export_filename(fixed_time()),
            "conversation_20250131_230405.txt"
        );
    }

    #[test]
    fn write_export_writes_serialized_text() {
        let dir = tempfile::tempdir().unwrap();
        let turns = create_test_turns();

        let path = write_export(dir.path(), &turns, fixed_time()).unwrap();

        assert_eq!(path, dir.path().join("conversation_20250131_230405.txt"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, serialize(&turns));
    }

    #[test]
    fn write_export_refuses_empty_conversation() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_export(dir.path(), &[], fixed_time()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyConversation));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn write_export_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let turns = create_test_turns();
        let existing = dir.path().join(export_filename(fixed_time()));
        std::fs::write(&existing, "keep me").unwrap();

        let err = write_export(dir.path(), &turns, fixed_time()).unwrap_err();

        assert!(matches!(err, ExportError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");
    }
}
