use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// 1-based position of a task in the store.
id_newtype!(TaskId);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Backlog,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Backlog => "backlog",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status '{0}' (expected todo, in_progress, done or backlog)")]
pub struct UnknownTaskStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownTaskStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            "backlog" => Ok(TaskStatus::Backlog),
            _ => Err(UnknownTaskStatus(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_names_loosely() {
        assert_eq!("Todo".parse::<TaskStatus>(), Ok(TaskStatus::Todo));
        assert_eq!("in-progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("InProgress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!(" backlog ".parse::<TaskStatus>(), Ok(TaskStatus::Backlog));
        assert!("blocked".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn task_status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).expect("json");
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn task_without_status_defaults_to_todo() {
        let task: Task =
            serde_json::from_str(r#"{"title":"a","description":"b"}"#).expect("task");
        assert_eq!(task.status, TaskStatus::Todo);
    }
}
