use std::sync::Arc;

use crate::{
    api::MicrohitApi,
    domain::BlockerType,
    host::HostBridge,
    view::{
        render::{render, Screen},
        state::{ViewState, BLOCKED_MESSAGE},
    },
};

/// Drives the single-page flow.
///
/// Handlers take `&mut self`, so one controller can never have two requests in
/// flight; the renderer's disabled controls mirror the same guards.
pub struct ViewController {
    host: HostBridge,
    api: Arc<dyn MicrohitApi>,
    state: ViewState,
}

impl ViewController {
    pub fn new(host: HostBridge, api: Arc<dyn MicrohitApi>) -> Self {
        Self {
            host,
            api,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        render(&self.state)
    }

    /// Page load: initialize the host, then fetch the profile.
    ///
    /// Only acts from `Loading`; later calls are ignored.
    pub async fn start(&mut self) {
        if !matches!(self.state, ViewState::Loading) {
            return;
        }

        if self.host.initialize().is_none() {
            tracing::warn!("host environment absent; blocking page");
            self.transition(ViewState::Blocked {
                message: BLOCKED_MESSAGE.to_string(),
            });
            return;
        }

        if let Some(user) = self.host.host_user() {
            tracing::debug!(user_id = user.id.0, "host reported user");
        }
        if let Some(launch) = self.host.launch_params() {
            tracing::debug!(
                start_param = ?launch.start_param,
                chat_type = ?launch.chat_type,
                auth_date = ?launch.auth_date,
                "launch params"
            );
        }

        self.load_profile().await;
    }

    /// Re-issue the initial profile fetch after a failure.
    pub async fn retry_profile(&mut self) {
        if !matches!(self.state, ViewState::ProfileError { .. }) {
            return;
        }
        self.load_profile().await;
    }

    /// Re-fetch the profile while idle; a failure keeps the shown profile.
    pub async fn refresh_profile(&mut self) {
        let Some(ws) = self.state.workspace_mut() else {
            return;
        };
        if !ws.begin_refresh() {
            return;
        }

        let result = self.api.fetch_profile().await;
        if let Err(e) = &result {
            tracing::warn!("profile refresh failed: {e}");
        }
        if let Some(ws) = self.state.workspace_mut() {
            ws.finish_refresh(result);
        }
    }

    pub fn set_step_title(&mut self, title: impl Into<String>) -> bool {
        self.state
            .workspace_mut()
            .is_some_and(|ws| ws.set_step_title(title))
    }

    pub fn set_blocker(&mut self, blocker: BlockerType) -> bool {
        self.state
            .workspace_mut()
            .is_some_and(|ws| ws.set_blocker(blocker))
    }

    /// Generate (from Idle) or regenerate (from Choosing) micro-action options.
    pub async fn generate(&mut self) {
        let Some(ws) = self.state.workspace_mut() else {
            return;
        };
        let Some(req) = ws.begin_generate() else {
            return;
        };
        tracing::debug!(blocker = %req.blocker_type, "generating micro-actions");

        let result = self.api.generate_microhit(req).await;
        if let Err(e) = &result {
            tracing::warn!("generate failed: {e}");
        }
        if let Some(ws) = self.state.workspace_mut() {
            ws.finish_generate(result);
        }
        self.log_phase();
    }

    /// Complete the current step; a no-op without an active session.
    pub async fn complete(&mut self) {
        let Some(ws) = self.state.workspace_mut() else {
            return;
        };
        let Some(step_id) = ws.begin_complete() else {
            return;
        };
        tracing::debug!(%step_id, "completing micro-action");

        let result = self.api.complete_microhit(step_id).await;
        match &result {
            Ok(update) => tracing::info!(
                xp_earned = update.xp_earned,
                total_xp = update.total_xp,
                streak_days = update.streak_days,
                "micro-action completed"
            ),
            Err(e) => tracing::warn!("complete failed: {e}"),
        }
        if let Some(ws) = self.state.workspace_mut() {
            ws.finish_complete(result);
        }
        self.log_phase();
    }

    async fn load_profile(&mut self) {
        self.transition(ViewState::LoadingProfile);
        let result = self.api.fetch_profile().await;
        if let Err(e) = &result {
            tracing::warn!("profile fetch failed: {e}");
        }
        self.transition(ViewState::from_profile_result(result));
    }

    fn transition(&mut self, next: ViewState) {
        tracing::debug!(from = self.state.phase(), to = next.phase(), "view transition");
        self.state = next;
    }

    fn log_phase(&self) {
        tracing::debug!(phase = self.state.phase(), "view phase");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::GeneratedMicrohits,
        domain::{MicrohitOption, ProgressUpdate, StepId, UserId, UserProfile},
        errors::Error,
        testing::{FakeApi, FakeWebApp},
        view::render::Action,
    };

    fn profile() -> UserProfile {
        UserProfile {
            telegram_id: UserId(123456789),
            username: Some("ann".into()),
            first_name: "Ann".into(),
            xp: 150,
            level: 3,
            streak_days: 5,
            timezone_offset: 0,
        }
    }

    fn three_options(step: i64) -> GeneratedMicrohits {
        GeneratedMicrohits {
            options: vec![
                MicrohitOption {
                    index: 0,
                    text: "Open the document".into(),
                },
                MicrohitOption {
                    index: 1,
                    text: "Write one word".into(),
                },
                MicrohitOption {
                    index: 2,
                    text: "Set a 2-minute timer".into(),
                },
            ],
            step_id: StepId(step),
        }
    }

    fn in_host(api: Arc<FakeApi>) -> (ViewController, Arc<FakeWebApp>) {
        let web_app = Arc::new(FakeWebApp::with_init_data("auth_date=1700000000&hash=abc"));
        let host = HostBridge::new(Some(web_app.clone()));
        (ViewController::new(host, api), web_app)
    }

    async fn ready(api: Arc<FakeApi>) -> ViewController {
        api.push_profile(Ok(profile()));
        let (mut vc, _) = in_host(api);
        vc.start().await;
        vc
    }

    #[tokio::test]
    async fn absent_host_blocks_without_backend_calls() {
        let api = Arc::new(FakeApi::new());
        let mut vc = ViewController::new(HostBridge::absent(), api.clone());

        vc.start().await;
        vc.retry_profile().await;
        vc.generate().await;

        assert!(matches!(vc.state(), ViewState::Blocked { message } if message == BLOCKED_MESSAGE));
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn start_initializes_host_and_loads_profile() {
        let api = Arc::new(FakeApi::new());
        api.push_profile(Ok(profile()));
        let (mut vc, web_app) = in_host(api.clone());

        vc.start().await;
        vc.start().await;

        assert_eq!(web_app.lifecycle_calls(), vec!["ready", "expand"]);
        assert_eq!(api.profile_calls(), 1);
        assert_eq!(vc.state().workspace().unwrap().profile, profile());
    }

    #[tokio::test]
    async fn start_reads_launch_params_and_tolerates_unparsable_ones() {
        for init_data in [
            "start_param=ref42&chat_type=private&auth_date=1700000000&hash=abc",
            "user=%7Bnot-json&hash=abc",
        ] {
            let api = Arc::new(FakeApi::new());
            api.push_profile(Ok(profile()));
            let web_app = Arc::new(FakeWebApp::with_init_data(init_data));
            let mut vc = ViewController::new(HostBridge::new(Some(web_app)), api.clone());

            vc.start().await;

            assert_eq!(api.profile_calls(), 1, "{init_data}");
            assert!(vc.state().workspace().is_some(), "{init_data}");
        }
    }

    #[tokio::test]
    async fn profile_http_500_shows_status_and_retry_refetches() {
        let api = Arc::new(FakeApi::new());
        api.push_profile(Err(Error::Api {
            status: 500,
            message: "HTTP 500".into(),
        }))
        .push_profile(Ok(profile()));
        let (mut vc, _) = in_host(api.clone());

        vc.start().await;
        assert_eq!(
            vc.state(),
            &ViewState::ProfileError {
                message: "HTTP 500".into()
            }
        );
        assert!(vc.screen().button(Action::Retry).unwrap().enabled);

        vc.retry_profile().await;
        assert_eq!(api.profile_calls(), 2);
        assert!(vc.state().workspace().is_some());
    }

    #[tokio::test]
    async fn empty_description_issues_no_request() {
        let api = Arc::new(FakeApi::new());
        let mut vc = ready(api.clone()).await;

        assert!(!vc.screen().button(Action::Generate).unwrap().enabled);
        vc.generate().await;

        assert!(api.generate_requests().is_empty());
        assert_eq!(
            vc.state().workspace().unwrap().error.as_deref(),
            Some("Please enter a task description")
        );
    }

    #[tokio::test]
    async fn generate_then_complete_scenario() {
        let api = Arc::new(FakeApi::new());
        let mut vc = ready(api.clone()).await;

        assert!(vc.set_step_title("Write intro"));
        assert!(vc.set_blocker(BlockerType::Fear));
        api.push_generation(Ok(three_options(42)));
        vc.generate().await;

        let sent = api.generate_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].step_title, "Write intro");
        assert_eq!(sent[0].blocker_type, BlockerType::Fear);

        assert_eq!(
            vc.screen().options(),
            vec![
                "1. Open the document".to_string(),
                "2. Write one word".to_string(),
                "3. Set a 2-minute timer".to_string(),
            ]
        );

        api.push_completion(Ok(ProgressUpdate {
            xp_earned: 10,
            total_xp: 160,
            streak_days: 6,
            level: 3,
        }));
        vc.complete().await;

        assert_eq!(api.complete_requests(), vec![StepId(42)]);
        let ws = vc.state().workspace().unwrap();
        assert_eq!(ws.profile.xp, 160);
        assert_eq!(ws.profile.streak_days, 6);
        assert!(ws.options().is_empty());
        assert_eq!(ws.step_title, "");
        assert_eq!(ws.session(), None);
    }

    #[tokio::test]
    async fn complete_is_noop_without_session() {
        let api = Arc::new(FakeApi::new());
        let mut vc = ready(api.clone()).await;

        vc.complete().await;
        assert!(api.complete_requests().is_empty());
    }

    #[tokio::test]
    async fn regenerate_replaces_session() {
        let api = Arc::new(FakeApi::new());
        let mut vc = ready(api.clone()).await;
        vc.set_step_title("Write intro");
        api.push_generation(Ok(three_options(42)))
            .push_generation(Ok(three_options(43)));

        vc.generate().await;
        vc.generate().await;

        assert_eq!(api.generate_requests().len(), 2);
        assert_eq!(
            vc.state().workspace().unwrap().session(),
            Some(StepId(43))
        );
    }

    #[tokio::test]
    async fn refresh_failure_keeps_profile_visible() {
        let api = Arc::new(FakeApi::new());
        let mut vc = ready(api.clone()).await;
        api.push_profile(Err(Error::Transport("connection refused".into())));

        vc.refresh_profile().await;

        let ws = vc.state().workspace().unwrap();
        assert_eq!(ws.profile, profile());
        assert_eq!(ws.error.as_deref(), Some("connection refused"));
        assert!(vc.screen().button(Action::Refresh).unwrap().enabled);
    }
}
