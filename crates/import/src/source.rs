//! File-level import entry point: route by extension.

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};
use crate::rows::{parse_rows, ParsedRows};

/// Outcome of importing one selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportOutcome {
    /// Parsed, typed rows ready to be applied to the application state.
    Rows(ParsedRows),
    /// The legacy `.bak` path: a canned multi-step restore that parses no
    /// bytes and changes no data. The steps are returned as data so a caller
    /// can display them however it likes.
    SimulatedRestore {
        steps: Vec<String>,
        message: String,
    },
    /// Accepted but not parsed; the caller gets a placeholder notice.
    Acknowledged { extension: String, notice: String },
}

fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Import a selected file by name and contents.
///
/// `.csv`/`.txt` are parsed as comma-delimited rows with a header; `.bak`
/// yields the simulated restore; `.xlsx`/`.pdf`/`.accdb` are acknowledged
/// with a placeholder; anything else is unsupported.
pub fn import_bytes(file_name: &str, bytes: &[u8]) -> Result<ImportOutcome> {
    let ext = extension(file_name)
        .ok_or_else(|| ImportError::Unsupported(file_name.to_string()))?;

    match ext.as_str() {
        "csv" | "txt" => {
            let text = String::from_utf8_lossy(bytes);
            Ok(ImportOutcome::Rows(parse_rows(&text)?))
        }
        "bak" => Ok(ImportOutcome::SimulatedRestore {
            steps: vec![
                "Reading backup header".to_string(),
                "Restoring tables".to_string(),
                "Rebuilding indexes".to_string(),
            ],
            message: "Backup restored successfully. No records were modified (simulation)."
                .to_string(),
        }),
        "xlsx" | "pdf" | "accdb" => Ok(ImportOutcome::Acknowledged {
            extension: ext.clone(),
            notice: format!(".{ext} import is not available yet; no data was extracted"),
        }),
        other => Err(ImportError::Unsupported(format!(
            "{file_name} (.{other})"
        ))),
    }
}
