//! In-memory dashboard store
//!
//! Single source of truth for the process lifetime: seeded once at startup,
//! mutated in place by the update handlers, reset by a restart. The store is
//! an owned object handed to the API layer through axum state rather than a
//! process-wide global, so tests get isolated instances.

use crate::types::{
    Agent, AgentPatch, CalendarEvent, Memory, NewMemory, PipelineBoard, PipelineEntry, Task,
    TaskPatch,
};
use chrono::Local;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Raw counters derived from the store, before analytics blending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Tasks with status != "done"
    pub active_tasks: usize,
    /// Agents with status == "online"
    pub online_agents: usize,
    /// Tasks with status == "done" (not actually date-windowed)
    pub completed_this_week: usize,
}

/// Mutable dashboard collections behind per-collection locks
///
/// Pipeline and calendar are read-only in this scope and carry no lock.
pub struct DashboardStore {
    agents: RwLock<HashMap<String, Agent>>,
    tasks: RwLock<Vec<Task>>,
    memories: RwLock<Vec<Memory>>,
    pipeline: PipelineBoard,
    calendar: Vec<CalendarEvent>,
}

impl DashboardStore {
    /// Create a store populated with the demo seed data
    pub fn new() -> Self {
        Self {
            agents: RwLock::new(seed_agents()),
            tasks: RwLock::new(seed_tasks()),
            memories: RwLock::new(seed_memories()),
            pipeline: seed_pipeline(),
            calendar: seed_calendar(),
        }
    }

    /// List tasks in display order, optionally filtered by exact status
    pub async fn list_tasks(&self, status: Option<&str>) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        match status {
            Some(status) => tasks.iter().filter(|t| t.status == status).cloned().collect(),
            None => tasks.clone(),
        }
    }

    /// Merge a partial update into the task with the given id
    pub async fn update_task(&self, id: u32, patch: TaskPatch) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.iter_mut().find(|t| t.id == id)?;
        task.apply(patch);
        Some(task.clone())
    }

    /// Snapshot of the agent registry, keyed by agent key
    pub async fn agents(&self) -> HashMap<String, Agent> {
        self.agents.read().await.clone()
    }

    /// Merge a partial update into the agent with the given key
    pub async fn update_agent(&self, key: &str, patch: AgentPatch) -> Option<Agent> {
        let mut agents = self.agents.write().await;
        let agent = agents.get_mut(key)?;
        agent.apply(patch);
        Some(agent.clone())
    }

    /// List memories, most recent first
    pub async fn list_memories(&self) -> Vec<Memory> {
        self.memories.read().await.clone()
    }

    /// Find a memory by id
    pub async fn get_memory(&self, id: u32) -> Option<Memory> {
        let memories = self.memories.read().await;
        memories.iter().find(|m| m.id == id).cloned()
    }

    /// Create a memory and prepend it to the collection
    ///
    /// The id is assigned from the current collection length, matching the
    /// dashboard's established numbering. The date is stamped with today in
    /// the "Mon D, YYYY" display format.
    pub async fn add_memory(&self, new: NewMemory) -> Memory {
        let mut memories = self.memories.write().await;
        let memory = Memory {
            id: memories.len() as u32 + 1,
            title: new.title,
            date: Local::now().format("%b %-d, %Y").to_string(),
            content: new.content,
        };
        memories.insert(0, memory.clone());
        memory
    }

    /// The four-lane content pipeline (fixed in this scope)
    pub fn pipeline(&self) -> PipelineBoard {
        self.pipeline.clone()
    }

    /// Calendar events (fixed in this scope)
    pub fn calendar(&self) -> Vec<CalendarEvent> {
        self.calendar.clone()
    }

    /// Derive the summary counters from the live collections
    pub async fn stats(&self) -> StoreStats {
        let tasks = self.tasks.read().await;
        let agents = self.agents.read().await;

        let active_tasks = tasks.iter().filter(|t| t.status != "done").count();
        let completed_this_week = tasks.iter().filter(|t| t.status == "done").count();
        let online_agents = agents.values().filter(|a| a.status == "online").count();

        StoreStats {
            active_tasks,
            online_agents,
            completed_this_week,
        }
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

fn agent(name: &str, status: &str, task: &str, avatar: &str) -> Agent {
    Agent {
        name: name.to_string(),
        status: status.to_string(),
        task: task.to_string(),
        avatar: avatar.to_string(),
    }
}

fn seed_agents() -> HashMap<String, Agent> {
    HashMap::from([
        (
            "sage".to_string(),
            agent("Sage (CEO)", "online", "Managing team", "🐙"),
        ),
        (
            "researcher".to_string(),
            agent("Researcher", "idle", "Waiting for task", "🔍"),
        ),
        (
            "analyst".to_string(),
            agent("Analyst", "online", "Querying Mixpanel", "📊"),
        ),
        (
            "coder".to_string(),
            agent("Coder", "idle", "Waiting for task", "💻"),
        ),
        (
            "writer".to_string(),
            agent("Writer", "online", "Writing blog post", "✍️"),
        ),
    ])
}

fn task(id: u32, title: &str, owner: &str, status: &str, priority: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        owner: owner.to_string(),
        status: status.to_string(),
        priority: priority.to_string(),
    }
}

fn seed_tasks() -> Vec<Task> {
    vec![
        task(1, "Research competitor pricing", "sage", "todo", "high"),
        task(2, "Write blog post about AI", "user", "todo", "medium"),
        task(3, "Deploy Mission Control v1", "sage", "todo", "high"),
        task(4, "Mixpanel DAU analysis", "sage", "inprogress", "high"),
        task(5, "Create social content", "user", "inprogress", "medium"),
        task(6, "Set up Telegram bot", "sage", "done", "high"),
        task(7, "Connect Mixpanel API", "sage", "done", "high"),
        task(8, "Define company vision", "user", "done", "medium"),
    ]
}

fn memory(id: u32, title: &str, date: &str, content: &str) -> Memory {
    Memory {
        id,
        title: title.to_string(),
        date: date.to_string(),
        content: content.to_string(),
    }
}

fn seed_memories() -> Vec<Memory> {
    vec![
        memory(
            1,
            "Company Vision Discussion",
            "Feb 24, 2026",
            "Building an AI company with Sage as CEO. The vision is to create a team of AI agents that work together to accomplish complex tasks.",
        ),
        memory(
            2,
            "Mixpanel Setup",
            "Feb 24, 2026",
            "Connected Mixpanel API for project 3623820. Found concerning DAU trend - 74% decline from Feb 17-24.",
        ),
        memory(
            3,
            "Telegram Integration",
            "Feb 24, 2026",
            "Enabled Telegram group access for team collaboration.",
        ),
        memory(
            4,
            "DAU Analysis Results",
            "Feb 24, 2026",
            "Analysis shows 74% decline in daily active users. Needs attention.",
        ),
    ]
}

fn entry(title: &str, date: &str) -> PipelineEntry {
    PipelineEntry {
        title: title.to_string(),
        date: date.to_string(),
    }
}

fn seed_pipeline() -> PipelineBoard {
    PipelineBoard {
        ideas: vec![
            entry("10 AI Tools Comparison", "Feb 23"),
            entry("Product Launch Strategy", "Feb 22"),
        ],
        writing: vec![entry("Weekly Newsletter", "Feb 24")],
        media: vec![entry("Twitter Thread - DAU", "Feb 23")],
        published: vec![entry("Mission Control Launch", "Feb 20")],
    }
}

fn seed_calendar() -> Vec<CalendarEvent> {
    let event = |day: u8, title: &str, kind: &str| CalendarEvent {
        day,
        title: title.to_string(),
        kind: kind.to_string(),
    };
    vec![
        event(17, "Team Sync", "user"),
        event(18, "Research Review", "sage"),
        event(20, "Content Planning", "user"),
        event(22, "Deploy v1", "sage"),
        event(24, "Strategy Call", "user"),
    ]
}
