// View filtering for tasks

use crate::error::StoreError;
use crate::models::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Which tasks a view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => task.status() == TaskStatus::Pending,
            Filter::Completed => task.status() == TaskStatus::Completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Filter::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::InvalidFilter(s.to_string()))
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskId, parse_date};

    fn task(status: TaskStatus) -> Task {
        let mut task = Task::new(TaskId(1), "Test".to_string(), parse_date("2024-01-01").unwrap());
        if status == TaskStatus::Completed {
            task.toggle_status();
        }
        task
    }

    #[test]
    fn test_filter_matches() {
        let pending = task(TaskStatus::Pending);
        let completed = task(TaskStatus::Completed);

        assert!(Filter::All.matches(&pending));
        assert!(Filter::All.matches(&completed));
        assert!(Filter::Pending.matches(&pending));
        assert!(!Filter::Pending.matches(&completed));
        assert!(Filter::Completed.matches(&completed));
        assert!(!Filter::Completed.matches(&pending));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("Pending".parse::<Filter>().unwrap(), Filter::Pending);
        assert_eq!(" COMPLETED ".parse::<Filter>().unwrap(), Filter::Completed);
    }

    #[test]
    fn test_filter_from_str_rejects_unknown() {
        let err = "done".parse::<Filter>().unwrap_err();
        assert_eq!(err, StoreError::InvalidFilter("done".to_string()));
        assert!("".parse::<Filter>().is_err());
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::All.to_string(), "all");
        assert_eq!(Filter::Pending.to_string(), "pending");
        assert_eq!(Filter::default(), Filter::All);
    }
}
