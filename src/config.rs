//! Server configuration
//!
//! Environment variables with hardcoded fallbacks, overridable from the CLI:
//! - `PORT`: listen port (default 3000)
//! - `MISSION_CONTROL_PUBLIC_DIR`: static asset root (default "public")
//! - `MIXPANEL_TOKEN` / `MIXPANEL_PROJECT_ID`: analytics credentials

use crate::analytics::AnalyticsConfig;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

/// Default listen port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub addr: SocketAddr,

    /// Root directory for the static responder
    pub public_dir: PathBuf,

    /// Analytics collaborator settings
    pub analytics: AnalyticsConfig,
}

impl ServerConfig {
    /// Build configuration from the environment
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring unparseable PORT value {:?}", raw);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let public_dir = env::var("MISSION_CONTROL_PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        Self {
            addr: ([0, 0, 0, 0], port).into(),
            public_dir,
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
