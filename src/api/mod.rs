//! HTTP API for the dashboard
//!
//! Provides:
//! - Aggregate stats with best-effort analytics blending
//! - Task, agent, and memory read/update endpoints
//! - Read-only pipeline and calendar endpoints
//! - Static asset fallback for the dashboard UI

pub mod server;
pub mod static_files;

pub use server::{ApiServer, AppState};
