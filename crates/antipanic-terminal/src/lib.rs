//! Terminal front-end.
//!
//! Supplies a host object built from the launch environment and a line-based
//! command loop that drives the `antipanic-core` view controller.

use std::sync::Arc;

use antipanic_core::{
    domain::HostUser,
    host::{HostBridge, WebApp},
    launch::parse_init_data,
};

pub mod commands;
pub mod display;
pub mod router;

/// Environment variable carrying the signed launch payload.
pub const INIT_DATA_ENV: &str = "TELEGRAM_INIT_DATA";

/// Host object backed by a launch payload handed over by the environment.
#[derive(Clone, Debug)]
pub struct EnvWebApp {
    init_data: String,
    user: Option<HostUser>,
}

impl EnvWebApp {
    /// `None` when the payload is missing or blank, i.e. not launched from the host.
    pub fn from_init_data(raw: impl Into<String>) -> Option<Self> {
        let init_data = raw.into();
        if init_data.trim().is_empty() {
            return None;
        }
        let user = parse_init_data(&init_data).and_then(|p| p.user);
        Some(Self { init_data, user })
    }

    pub fn from_env() -> Option<Self> {
        std::env::var(INIT_DATA_ENV)
            .ok()
            .and_then(Self::from_init_data)
    }
}

impl WebApp for EnvWebApp {
    fn ready(&self) {
        tracing::debug!("host ready");
    }

    fn expand(&self) {
        tracing::debug!("host expand requested (no-op in terminal)");
    }

    fn init_data(&self) -> String {
        self.init_data.clone()
    }

    fn init_data_user(&self) -> Option<HostUser> {
        self.user.clone()
    }
}

/// Build the Host Bridge from the process environment.
pub fn host_from_env() -> HostBridge {
    HostBridge::new(EnvWebApp::from_env().map(|w| Arc::new(w) as Arc<dyn WebApp>))
}
