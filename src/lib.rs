//! Mission Control - Dashboard Data Service
//!
//! A minimal demo backend serving in-memory data for the Mission Control
//! dashboard UI:
//! - Agent statuses and a task list with partial updates
//! - Free-text memories (append-only, most recent first)
//! - A fixed content pipeline and calendar
//! - Aggregate stats, blended with a best-effort Mixpanel fetch
//! - Static asset fallback for the UI itself
//!
//! Nothing persists: a restart resets every collection to its seed data.
//!
//! # Architecture
//!
//! - **Types**: wire-format data structures ([`types`])
//! - **Store**: seeded in-memory collections behind async locks ([`store`])
//! - **Analytics**: isolated Mixpanel collaborator ([`analytics`])
//! - **Api**: axum router, handlers, and static fallback ([`api`])

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use analytics::{AnalyticsClient, AnalyticsConfig};
pub use api::ApiServer;
pub use config::ServerConfig;
pub use error::{MissionControlError, Result};
pub use store::DashboardStore;
pub use types::{Agent, CalendarEvent, DashboardStats, Memory, PipelineBoard, Task};
