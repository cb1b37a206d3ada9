use crate::{
    api::{GenerateMicrohit, GeneratedMicrohits},
    domain::{BlockerType, MicrohitOption, ProgressUpdate, StepId, UserProfile},
    Result,
};

pub const BLOCKED_MESSAGE: &str =
    "This app only works inside Telegram. Open it from the bot's menu button.";
pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a task description";

/// Whole-page state. Every handler moves this value forward; nothing else is mutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Host not yet initialized.
    Loading,
    /// Not running inside the host. Terminal for this page load.
    Blocked { message: String },
    LoadingProfile,
    /// Initial profile fetch failed; a retry re-issues the same fetch.
    ProfileError { message: String },
    Ready(Workspace),
}

impl ViewState {
    pub fn phase(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Blocked { .. } => "blocked",
            ViewState::LoadingProfile => "loading_profile",
            ViewState::ProfileError { .. } => "profile_error",
            ViewState::Ready(ws) => ws.flow.phase(),
        }
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        match self {
            ViewState::Ready(ws) => Some(ws),
            _ => None,
        }
    }

    pub fn workspace_mut(&mut self) -> Option<&mut Workspace> {
        match self {
            ViewState::Ready(ws) => Some(ws),
            _ => None,
        }
    }

    pub fn from_profile_result(result: Result<UserProfile>) -> Self {
        match result {
            Ok(profile) => ViewState::Ready(Workspace::new(profile)),
            Err(e) => ViewState::ProfileError {
                message: e.user_message(),
            },
        }
    }
}

/// The options on screen plus the step they belong to.
///
/// Keeping both in one value means there is never a session without its batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub step_id: StepId,
    pub options: Vec<MicrohitOption>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActionFlow {
    #[default]
    Idle,
    /// Profile re-fetch in flight; the form is locked until it resolves.
    Refreshing,
    Generating,
    Choosing(Proposal),
    Completing(Proposal),
}

impl ActionFlow {
    pub fn phase(&self) -> &'static str {
        match self {
            ActionFlow::Idle => "idle",
            ActionFlow::Refreshing => "refreshing",
            ActionFlow::Generating => "generating",
            ActionFlow::Choosing(_) => "choosing",
            ActionFlow::Completing(_) => "completing",
        }
    }

    pub fn proposal(&self) -> Option<&Proposal> {
        match self {
            ActionFlow::Choosing(p) | ActionFlow::Completing(p) => Some(p),
            ActionFlow::Idle | ActionFlow::Refreshing | ActionFlow::Generating => None,
        }
    }
}

/// State of a loaded page: profile cache, form inputs and the action flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    pub profile: UserProfile,
    pub step_title: String,
    pub blocker: BlockerType,
    pub flow: ActionFlow,
    pub error: Option<String>,
}

impl Workspace {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            step_title: String::new(),
            blocker: BlockerType::default(),
            flow: ActionFlow::Idle,
            error: None,
        }
    }

    pub fn session(&self) -> Option<StepId> {
        self.flow.proposal().map(|p| p.step_id)
    }

    pub fn options(&self) -> &[MicrohitOption] {
        self.flow
            .proposal()
            .map(|p| p.options.as_slice())
            .unwrap_or(&[])
    }

    /// Inputs are editable only while no options are shown and nothing is in flight.
    pub fn can_edit(&self) -> bool {
        matches!(self.flow, ActionFlow::Idle)
    }

    /// Generate from Idle (needs a title) or regenerate while choosing.
    pub fn can_generate(&self) -> bool {
        match self.flow {
            ActionFlow::Idle => !self.step_title.trim().is_empty(),
            ActionFlow::Choosing(_) => true,
            ActionFlow::Refreshing | ActionFlow::Generating | ActionFlow::Completing(_) => false,
        }
    }

    pub fn can_complete(&self) -> bool {
        matches!(self.flow, ActionFlow::Choosing(_))
    }

    pub fn can_refresh(&self) -> bool {
        matches!(self.flow, ActionFlow::Idle)
    }

    pub fn set_step_title(&mut self, title: impl Into<String>) -> bool {
        if !self.can_edit() {
            return false;
        }
        self.step_title = title.into();
        true
    }

    pub fn set_blocker(&mut self, blocker: BlockerType) -> bool {
        if !self.can_edit() {
            return false;
        }
        self.blocker = blocker;
        true
    }

    /// Enter Generating and return the request to send, or `None` if no request
    /// may be issued (an empty title also attaches a validation error).
    pub fn begin_generate(&mut self) -> Option<GenerateMicrohit> {
        match self.flow {
            ActionFlow::Idle | ActionFlow::Choosing(_) => {}
            ActionFlow::Refreshing | ActionFlow::Generating | ActionFlow::Completing(_) => {
                return None
            }
        }

        if self.step_title.trim().is_empty() {
            self.error = Some(EMPTY_TITLE_MESSAGE.to_string());
            return None;
        }

        // Regeneration discards the previous batch and its step.
        self.flow = ActionFlow::Generating;
        self.error = None;

        Some(GenerateMicrohit {
            step_title: self.step_title.clone(),
            blocker_type: self.blocker,
            details: None,
        })
    }

    pub fn finish_generate(&mut self, result: Result<GeneratedMicrohits>) {
        if !matches!(self.flow, ActionFlow::Generating) {
            tracing::warn!(
                "generate response arrived in {} phase; applying anyway",
                self.flow.phase()
            );
        }

        match result.and_then(GeneratedMicrohits::validated) {
            Ok(batch) => {
                self.flow = ActionFlow::Choosing(Proposal {
                    step_id: batch.step_id,
                    options: batch.options,
                });
                self.error = None;
            }
            Err(e) => {
                self.flow = ActionFlow::Idle;
                self.error = Some(e.user_message());
            }
        }
    }

    /// Enter Completing and return the step to complete; `None` without a session.
    pub fn begin_complete(&mut self) -> Option<StepId> {
        let proposal = match std::mem::take(&mut self.flow) {
            ActionFlow::Choosing(p) => p,
            other => {
                self.flow = other;
                return None;
            }
        };
        let step_id = proposal.step_id;
        self.flow = ActionFlow::Completing(proposal);
        self.error = None;
        Some(step_id)
    }

    pub fn finish_complete(&mut self, result: Result<ProgressUpdate>) {
        let proposal = match std::mem::take(&mut self.flow) {
            ActionFlow::Completing(p) | ActionFlow::Choosing(p) => Some(p),
            other => {
                self.flow = other;
                None
            }
        };

        match result {
            Ok(update) => {
                self.profile.apply_progress(&update);
                self.flow = ActionFlow::Idle;
                self.step_title.clear();
                self.error = None;
            }
            Err(e) => {
                if let Some(p) = proposal {
                    self.flow = ActionFlow::Choosing(p);
                }
                self.error = Some(e.user_message());
            }
        }
    }

    pub fn begin_refresh(&mut self) -> bool {
        if !self.can_refresh() {
            return false;
        }
        self.flow = ActionFlow::Refreshing;
        self.error = None;
        true
    }

    /// Overwrite the profile on success; keep the last good one on failure.
    pub fn finish_refresh(&mut self, result: Result<UserProfile>) {
        if matches!(self.flow, ActionFlow::Refreshing) {
            self.flow = ActionFlow::Idle;
        }
        match result {
            Ok(profile) => self.profile = profile,
            Err(e) => self.error = Some(e.user_message()),
        }
    }
}
