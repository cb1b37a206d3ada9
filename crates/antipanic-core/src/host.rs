//! Host Bridge: the only place that touches the Telegram WebApp object.
//!
//! The rest of the client depends on `HostBridge`, never on a global lookup, so a
//! fake host can be injected in tests and a non-browser host in the terminal.

use std::sync::Arc;

use crate::{
    domain::HostUser,
    launch::{parse_init_data, LaunchParams},
};

/// The injected host object (`window.Telegram.WebApp` in a browser).
pub trait WebApp: Send + Sync {
    /// Tell the host the UI is ready to be shown.
    fn ready(&self);

    /// Ask the host to expand the app to the full viewport.
    fn expand(&self);

    /// Raw, signed launch payload forwarded to the backend.
    fn init_data(&self) -> String;

    /// Unverified user identity as reported by the host.
    fn init_data_user(&self) -> Option<HostUser>;
}

/// Thin adapter over an optional host object.
///
/// Absence of the host is an expected condition: it is signaled by `None`/`""`
/// return values, never by an error.
#[derive(Clone, Default)]
pub struct HostBridge {
    web_app: Option<Arc<dyn WebApp>>,
}

impl HostBridge {
    pub fn new(web_app: Option<Arc<dyn WebApp>>) -> Self {
        Self { web_app }
    }

    pub fn absent() -> Self {
        Self { web_app: None }
    }

    /// True iff the client is running inside the host.
    pub fn probe(&self) -> bool {
        self.web_app.is_some()
    }

    /// Signal readiness and request full-viewport expansion.
    pub fn initialize(&self) -> Option<&dyn WebApp> {
        let web_app = self.web_app.as_deref()?;
        web_app.ready();
        web_app.expand();
        tracing::debug!("host initialized (ready + expand)");
        Some(web_app)
    }

    pub fn auth_token(&self) -> String {
        self.web_app
            .as_ref()
            .map(|w| w.init_data())
            .unwrap_or_default()
    }

    pub fn host_user(&self) -> Option<HostUser> {
        self.web_app.as_ref()?.init_data_user()
    }

    pub fn launch_params(&self) -> Option<LaunchParams> {
        parse_init_data(&self.auth_token())
    }
}

impl std::fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBridge")
            .field("present", &self.probe())
            .finish()
    }
}
