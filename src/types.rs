//! Core data structures for the dashboard
//!
//! JSON field names follow the wire format the dashboard UI consumes:
//! flat lowercase keys on the resources, camelCase on the stats payload.

use serde::{Deserialize, Serialize};

/// Number of synthetic team members (the five fixed agents)
pub const TEAM_MEMBERS: usize = 5;

/// A named synthetic team member with a status and current task.
///
/// Status is a free-form string; `online` / `idle` / `offline` by
/// convention, but callers may write arbitrary values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agent {
    pub name: String,
    pub status: String,
    pub task: String,
    pub avatar: String,
}

/// Partial agent update; absent fields leave the record untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub status: Option<String>,
    pub task: Option<String>,
    pub avatar: Option<String>,
}

impl Agent {
    /// Shallow merge of the patch's present fields
    pub fn apply(&mut self, patch: AgentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(task) = patch.task {
            self.task = task;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
    }
}

/// A tracked work item. Display order is insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub title: String,
    /// Agent key or "user"
    pub owner: String,
    /// `todo` / `inprogress` / `done` by convention
    pub status: String,
    /// `low` / `medium` / `high` by convention
    pub priority: String,
}

/// Partial task update; absent fields leave the record untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl Task {
    /// Shallow merge of the patch's present fields
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// A free-text journal entry. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Memory {
    pub id: u32,
    pub title: String,
    /// Display string, e.g. "Feb 24, 2026"
    pub date: String,
    pub content: String,
}

/// Caller-supplied fields for a new memory; id and date are server-assigned.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMemory {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// A content item in one of the pipeline lanes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineEntry {
    pub title: String,
    pub date: String,
}

/// The four fixed content-production lanes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineBoard {
    pub ideas: Vec<PipelineEntry>,
    pub writing: Vec<PipelineEntry>,
    pub media: Vec<PipelineEntry>,
    pub published: Vec<PipelineEntry>,
}

/// A calendar entry for the monthly view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Day of month, 1-31
    pub day: u8,
    pub title: String,
    /// Agent key or "user"
    #[serde(rename = "type")]
    pub kind: String,
}

/// Aggregate counters for the dashboard header
///
/// `dau_trend` carries the hardcoded fallback when the analytics call
/// fails; on success it is null and the raw payload rides in `dau_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_tasks: usize,
    pub team_members: usize,
    pub online_agents: usize,
    pub completed_this_week: usize,
    pub dau_trend: Option<i64>,
    pub dau_data: Option<serde_json::Value>,
}
