use crate::error::AppError;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const STORE_FILE_NAME: &str = "tasks_db.csv";
const STORE_ENV_VAR: &str = "DAYPLAN_STORE_PATH";

const COMPLETED_LABEL: &str = "True";
const PENDING_LABEL: &str = "False";

/// One line of the backing store: `title,time,completed`. The completed
/// field is the literal `True`/`False`; legacy two-field lines load as
/// incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub title: String,
    pub time: String,
    pub completed: bool,
}

pub fn store_path(config_override: Option<&Path>) -> PathBuf {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    match config_override {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(STORE_FILE_NAME),
    }
}

pub fn read_records(path: &Path) -> Result<Vec<StoredRecord>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| AppError::io(err.to_string()))?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!(store = %path.display(), error = %err, "skipping unreadable record");
                continue;
            }
        };

        if record.len() < 2 {
            warn!(store = %path.display(), fields = record.len(), "skipping short record");
            continue;
        }

        records.push(StoredRecord {
            title: record[0].to_string(),
            time: record[1].to_string(),
            // Legacy reader semantics: only the exact label counts as done.
            completed: record.get(2) == Some(COMPLETED_LABEL),
        });
    }

    Ok(records)
}

pub fn write_records(path: &Path, records: &[StoredRecord]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|err| AppError::io(err.to_string()))?;
    for record in records {
        let label = if record.completed {
            COMPLETED_LABEL
        } else {
            PENDING_LABEL
        };
        writer
            .write_record([record.title.as_str(), record.time.as_str(), label])
            .map_err(|err| AppError::io(err.to_string()))?;
    }

    writer.flush().map_err(|err| AppError::io(err.to_string()))?;
    Ok(())
}
