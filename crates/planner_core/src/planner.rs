use crate::error::AppError;
use crate::model::Task;
use crate::storage::csv_store::{self, StoredRecord};
use std::path::{Path, PathBuf};
use time::Time;
use time::format_description::FormatItem;
use time::macros::format_description;
use tracing::warn;

const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");
const TIME_SEPARATORS: &[char] = &['-', '.', ' ', ',', ';'];

/// Best-effort rewriting of loose time input ("9", "930", "10.20") into a
/// parseable `HH:MM` candidate. Never rejects; strict validation happens in
/// [`canonical_time`].
pub fn normalize_time(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|ch| if TIME_SEPARATORS.contains(&ch) { ':' } else { ch })
        .collect();

    if replaced.contains(':') || !replaced.chars().all(|ch| ch.is_ascii_digit()) {
        return replaced;
    }

    match replaced.len() {
        4 => format!("{}:{}", &replaced[..2], &replaced[2..]),
        3 => format!("0{}:{}", &replaced[..1], &replaced[1..]),
        1 | 2 => format!("{replaced:0>2}:00"),
        _ => replaced,
    }
}

/// Normalizes and strictly validates a time of day, returning the
/// zero-padded `HH:MM` form stored on tasks.
pub fn canonical_time(raw: &str) -> Result<String, AppError> {
    let normalized = normalize_time(raw);
    let (hour_part, minute_part) = normalized
        .split_once(':')
        .ok_or_else(|| invalid_time(raw))?;

    if !is_time_component(hour_part) || !is_time_component(minute_part) {
        return Err(invalid_time(raw));
    }

    let hour: u8 = hour_part.parse().map_err(|_| invalid_time(raw))?;
    let minute: u8 = minute_part.parse().map_err(|_| invalid_time(raw))?;
    let parsed = Time::from_hms(hour, minute, 0).map_err(|_| invalid_time(raw))?;

    parsed
        .format(TIME_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

fn is_time_component(part: &str) -> bool {
    (1..=2).contains(&part.len()) && part.chars().all(|ch| ch.is_ascii_digit())
}

fn invalid_time(raw: &str) -> AppError {
    AppError::invalid_time(format!("'{raw}' is not a valid HH:MM time"))
}

/// The task management engine. Owns the ordered task list and the backing
/// store path; the list is sorted ascending by time after every public
/// operation (stable, ties keep insertion order).
#[derive(Debug)]
pub struct TaskManager {
    tasks: Vec<Task>,
    store_path: PathBuf,
}

impl TaskManager {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            tasks: Vec::new(),
            store_path: store_path.into(),
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Validates and canonicalizes the time, then inserts a new incomplete
    /// task in time order. The title is accepted as given; front ends reject
    /// empty titles before calling.
    pub fn add_task(&mut self, title: &str, raw_time: &str) -> Result<Task, AppError> {
        let time = canonical_time(raw_time)?;
        let task = Task::new(title, time);
        self.tasks.push(task.clone());
        self.sort_tasks();
        Ok(task)
    }

    /// Removes the first task structurally equal to `task`. Deletion is
    /// idempotent: a missing task is a no-op, reported via the return value.
    pub fn delete_task(&mut self, task: &Task) -> bool {
        match self.tasks.iter().position(|candidate| candidate == task) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn delete_task_by_index(&mut self, index: usize) -> bool {
        if index >= self.tasks.len() {
            return false;
        }
        self.tasks.remove(index);
        true
    }

    /// Flips the completion flag of the first task structurally equal to
    /// `task`. Toggling never changes the time, so no re-sort is needed.
    pub fn toggle_task_status(&mut self, task: &Task) -> bool {
        match self.tasks.iter().position(|candidate| candidate == task) {
            Some(index) => {
                let found = &mut self.tasks[index];
                found.completed = !found.completed;
                true
            }
            None => false,
        }
    }

    pub fn toggle_task_by_index(&mut self, index: usize) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn get_all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Writes the full task list to the backing store, overwriting it.
    /// Failures are logged and returned; front ends treat them as non-fatal.
    pub fn save_to_file(&self) -> Result<(), AppError> {
        let records: Vec<StoredRecord> = self
            .tasks
            .iter()
            .map(|task| StoredRecord {
                title: task.title.clone(),
                time: task.time.clone(),
                completed: task.completed,
            })
            .collect();

        if let Err(err) = csv_store::write_records(&self.store_path, &records) {
            warn!(store = %self.store_path.display(), error = %err, "failed to save tasks");
            return Err(err);
        }
        Ok(())
    }

    /// Replaces the in-memory list with the store contents. A missing store
    /// is an empty planner. Records with an unparseable time are skipped so
    /// a hand-edited file cannot break the time invariant, and the list is
    /// re-sorted in case the file was reordered on disk.
    pub fn load_from_file(&mut self) -> Result<(), AppError> {
        let records = match csv_store::read_records(&self.store_path) {
            Ok(records) => records,
            Err(err) => {
                warn!(store = %self.store_path.display(), error = %err, "failed to load tasks");
                return Err(err);
            }
        };

        let mut tasks = Vec::with_capacity(records.len());
        for record in records {
            match canonical_time(&record.time) {
                Ok(time) => tasks.push(Task {
                    title: record.title,
                    time,
                    completed: record.completed,
                }),
                Err(err) => {
                    warn!(title = %record.title, error = %err, "skipping task with invalid time");
                }
            }
        }

        tasks.sort_by(|a, b| a.time.cmp(&b.time));
        self.tasks = tasks;
        Ok(())
    }

    fn sort_tasks(&mut self) {
        // Canonical HH:MM strings order lexicographically; Vec::sort_by is
        // stable, so ties keep insertion order.
        self.tasks.sort_by(|a, b| a.time.cmp(&b.time));
    }
}
