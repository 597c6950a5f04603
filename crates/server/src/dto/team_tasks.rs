//! # Team Task Data Transfer Objects

use chrono::{DateTime, Utc};
use entity::{team_tasks, TaskStatus};
use serde::{Deserialize, Serialize};

use crate::dto::{double_option, sub_tasks::SubTaskResponse};

/// Request body for creating a team task (admin only)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to TODO when absent
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub assigned_user_id: Option<i32>,
}

/// Request body for a general task update (admin only). Absent fields are
/// untouched; explicit nulls clear the clearable fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub assigned_user_id: Option<Option<i32>>,
}

/// Request body for (re)assigning a task (admin only). A null or absent
/// user id unassigns the task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssignTaskRequest {
    #[serde(default)]
    pub assigned_user_id: Option<i32>,
}

/// Team task with its derived progress. Sub-tasks are embedded on detail
/// reads and omitted from listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamTaskResponse {
    pub id:               i32,
    pub team_id:          i32,
    pub title:            String,
    pub description:      Option<String>,
    pub status:           TaskStatus,
    pub assigned_user_id: Option<i32>,
    /// Completion percentage, 0-100
    pub progress:         u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_tasks:        Option<Vec<SubTaskResponse>>,
    pub created_at:       DateTime<Utc>,
    pub updated_at:       DateTime<Utc>,
}

impl TeamTaskResponse {
    pub fn from_task(task: team_tasks::Model, progress: u8, sub_tasks: Option<Vec<SubTaskResponse>>) -> Self {
        Self {
            id:               task.id,
            team_id:          task.team_id,
            title:            task.title,
            description:      task.description,
            status:           task.status,
            assigned_user_id: task.assigned_user_id,
            progress,
            sub_tasks,
            created_at:       task.created_at,
            updated_at:       task.updated_at,
        }
    }
}
