use std::fmt;

/// One planner entry: a title, a canonical `HH:MM` time of day, and a
/// completion flag. Constructed by the manager after time validation;
/// the struct itself enforces nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub time: String,
    pub completed: bool,
}

impl Task {
    pub fn new(title: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
            completed: false,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.completed { "x" } else { " " };
        write!(f, "[{}] {} - {}", marker, self.time, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::Task;

    #[test]
    fn new_task_starts_incomplete() {
        let task = Task::new("Standup", "09:00");
        assert_eq!(task.title, "Standup");
        assert_eq!(task.time, "09:00");
        assert!(!task.completed);
    }

    #[test]
    fn display_marks_completion() {
        let mut task = Task::new("Lunch", "12:30");
        assert_eq!(task.to_string(), "[ ] 12:30 - Lunch");

        task.completed = true;
        assert_eq!(task.to_string(), "[x] 12:30 - Lunch");
    }
}
