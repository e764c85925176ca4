//! Writing generated files to disk
//!
//! Each file is handled on its own: an existing file is only replaced after
//! the user confirms, and a failed write is reported without stopping the
//! remaining files. Nothing is rolled back.

use std::fs;

use crate::error::Result;
use crate::generator::EmittedFile;
use crate::prompt::Prompter;

/// Result of writing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was written
    Written,
    /// The file existed and the user declined to overwrite it
    Skipped,
    /// Creating the directory or writing the file failed
    Failed(String),
}

/// Write `files` in order, asking before overwriting existing ones
///
/// Returns one outcome per file, in the same order.
///
/// # Errors
///
/// Returns an error only if the overwrite prompt itself fails. Filesystem
/// failures are reported per file as [`WriteOutcome::Failed`].
#[tracing::instrument(skip_all, fields(files = files.len()))]
pub fn emit(files: &[EmittedFile], prompter: &mut dyn Prompter) -> Result<Vec<WriteOutcome>> {
    let mut outcomes = Vec::with_capacity(files.len());

    for file in files {
        let outcome = emit_one(file, prompter)?;
        match &outcome {
            WriteOutcome::Written => {
                prompter.success(&format!("Wrote file '{}'.", file.file_name));
            }
            WriteOutcome::Skipped => {
                tracing::info!(file = %file.target().display(), "kept existing file");
            }
            WriteOutcome::Failed(reason) => {
                tracing::warn!(file = %file.target().display(), error = %reason, "write failed");
                prompter.error(&format!(
                    "Error while writing file '{}': {reason}",
                    file.file_name
                ));
            }
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

fn emit_one(file: &EmittedFile, prompter: &mut dyn Prompter) -> Result<WriteOutcome> {
    if let Err(err) = fs::create_dir_all(&file.directory) {
        return Ok(WriteOutcome::Failed(err.to_string()));
    }

    let target = file.target();
    if target.exists() {
        let question = format!(
            "The File '{}' already exists, do you want to override the existing file?",
            file.file_name
        );
        if !prompter.confirm(&question, false)? {
            return Ok(WriteOutcome::Skipped);
        }
    }

    Ok(match fs::write(&target, &file.content) {
        Ok(()) => {
            tracing::debug!(file = %target.display(), bytes = file.content.len(), "wrote file");
            WriteOutcome::Written
        }
        Err(err) => WriteOutcome::Failed(err.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::FileKind;
    use crate::testing::{Answer, ScriptedPrompter};
    use tempfile::TempDir;

    fn file(dir: &TempDir, sub: &str, name: &str, content: &str) -> EmittedFile {
        EmittedFile {
            kind: FileKind::Model,
            directory: dir.path().join(sub),
            file_name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_creates_directories_and_writes() {
        let dir = TempDir::new().unwrap();
        let files = vec![file(&dir, "models", "Album.php", "<?php\n")];
        let mut prompter = ScriptedPrompter::new(vec![]);

        let outcomes = emit(&files, &mut prompter).unwrap();

        assert_eq!(outcomes, vec![WriteOutcome::Written]);
        assert_eq!(fs::read_to_string(dir.path().join("models/Album.php")).unwrap(), "<?php\n");
        assert_eq!(prompter.successes(), ["Wrote file 'Album.php'."]);
        assert!(prompter.prompts().is_empty());
    }

    #[test]
    fn test_declined_overwrite_keeps_content() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("models")).unwrap();
        fs::write(dir.path().join("models/Album.php"), "original").unwrap();

        let files = vec![file(&dir, "models", "Album.php", "generated")];
        let mut prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);

        let outcomes = emit(&files, &mut prompter).unwrap();

        assert_eq!(outcomes, vec![WriteOutcome::Skipped]);
        assert_eq!(fs::read_to_string(dir.path().join("models/Album.php")).unwrap(), "original");
        assert_eq!(
            prompter.prompts(),
            ["The File 'Album.php' already exists, do you want to override the existing file?"]
        );
    }

    #[test]
    fn test_confirmed_overwrite_replaces_content() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("models")).unwrap();
        fs::write(dir.path().join("models/Album.php"), "original").unwrap();

        let files = vec![file(&dir, "models", "Album.php", "generated")];
        let mut prompter = ScriptedPrompter::new(vec![Answer::Confirm(true)]);

        assert_eq!(emit(&files, &mut prompter).unwrap(), vec![WriteOutcome::Written]);
        assert_eq!(fs::read_to_string(dir.path().join("models/Album.php")).unwrap(), "generated");
    }

    #[test]
    fn test_failure_does_not_stop_remaining_files() {
        let dir = TempDir::new().unwrap();
        // A regular file where a directory is expected
        fs::write(dir.path().join("apis"), "").unwrap();

        let files = vec![
            file(&dir, "apis", "AlbumController.php", "api"),
            file(&dir, "models", "Album.php", "model"),
        ];
        let mut prompter = ScriptedPrompter::new(vec![]);

        let outcomes = emit(&files, &mut prompter).unwrap();

        assert!(matches!(outcomes[0], WriteOutcome::Failed(_)));
        assert_eq!(outcomes[1], WriteOutcome::Written);
        assert_eq!(prompter.errors().len(), 1);
        assert!(prompter.errors()[0].starts_with("Error while writing file 'AlbumController.php'"));
    }
}
