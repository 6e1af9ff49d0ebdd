use super::priority::Priority;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Progress of a todo. An item is in exactly one of these at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub status: TodoStatus,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Local>,
    /// Estimated effort in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Caller-supplied fields for a new todo; id and creation time are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewTodo {
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub estimated_time: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewTodo {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            priority,
            estimated_time: None,
            category: None,
        }
    }
}

impl TodoItem {
    pub fn new(text: String, priority: Priority, created_at: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            status: TodoStatus::NotStarted,
            priority,
            created_at,
            estimated_time: None,
            category: None,
        }
    }

    pub fn from_new(new: NewTodo, created_at: DateTime<Local>) -> Self {
        Self {
            estimated_time: new.estimated_time,
            category: new.category,
            ..Self::new(new.text, new.priority, created_at)
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TodoStatus::Completed
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == TodoStatus::InProgress
    }

    /// Flip completion. Completing clears in-progress; un-completing returns
    /// the item to not started. Returns true when the item became completed.
    pub fn toggle_completed(&mut self) -> bool {
        self.status = match self.status {
            TodoStatus::Completed => TodoStatus::NotStarted,
            TodoStatus::NotStarted | TodoStatus::InProgress => TodoStatus::Completed,
        };
        self.is_completed()
    }

    /// Flip in-progress. Starting work clears completion.
    pub fn toggle_in_progress(&mut self) {
        self.status = match self.status {
            TodoStatus::InProgress => TodoStatus::NotStarted,
            TodoStatus::NotStarted | TodoStatus::Completed => TodoStatus::InProgress,
        };
    }
}

/// The starter list a fresh dashboard opens with.
pub fn sample_todos(now: DateTime<Local>) -> Vec<TodoItem> {
    let seeds = [
        ("1", "Review project proposals", Priority::High, TodoStatus::NotStarted),
        ("2", "Call team meeting", Priority::Medium, TodoStatus::Completed),
        ("3", "Update portfolio website", Priority::Low, TodoStatus::NotStarted),
        ("4", "Read industry news", Priority::Medium, TodoStatus::NotStarted),
    ];

    seeds
        .into_iter()
        .map(|(id, text, priority, status)| TodoItem {
            id: id.to_string(),
            text: text.to_string(),
            status,
            priority,
            created_at: now,
            estimated_time: None,
            category: None,
        })
        .collect()
}
