use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskId, TaskStatus};

/// Reply body for mutating task routes, mirrors the backend's `"done."` acknowledgement.
pub const TASK_ACK: &str = "done.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetResponse {
    pub greeting: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskResponse {
    pub task_id: TaskId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDescriptionRequest {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAck {
    pub result: String,
}

impl TaskAck {
    pub fn done() -> Self {
        Self {
            result: TASK_ACK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageQuery {
    pub page_no: u64,
    pub page_size: u64,
}

pub type TaskList = Vec<Task>;
