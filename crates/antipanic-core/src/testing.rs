//! Fakes for unit testing without a Telegram host or a live backend.
//!
//! Enabled with the `test-support` feature:
//!
//! ```toml
//! [dev-dependencies]
//! antipanic-core = { path = "...", features = ["test-support"] }
//! ```

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;

use crate::{
    api::{GenerateMicrohit, GeneratedMicrohits, MicrohitApi},
    domain::{HostUser, ProgressUpdate, StepId, UserProfile},
    errors::Error,
    host::WebApp,
    Result,
};

// ── FakeWebApp ────────────────────────────────────────────────────────────────

/// Host object that records lifecycle calls.
#[derive(Default)]
pub struct FakeWebApp {
    init_data: String,
    user: Option<HostUser>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeWebApp {
    pub fn with_init_data(init_data: impl Into<String>) -> Self {
        Self {
            init_data: init_data.into(),
            ..Self::default()
        }
    }

    pub fn user(mut self, user: HostUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn lifecycle_calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl WebApp for FakeWebApp {
    fn ready(&self) {
        self.calls.lock().unwrap().push("ready");
    }

    fn expand(&self) {
        self.calls.lock().unwrap().push("expand");
    }

    fn init_data(&self) -> String {
        self.init_data.clone()
    }

    fn init_data_user(&self) -> Option<HostUser> {
        self.user.clone()
    }
}

// ── FakeApi ───────────────────────────────────────────────────────────────────

/// Backend fake with scripted responses per endpoint.
///
/// Each call pops the next scripted result; an empty script is an error.
#[derive(Default)]
pub struct FakeApi {
    profiles: Mutex<VecDeque<Result<UserProfile>>>,
    generations: Mutex<VecDeque<Result<GeneratedMicrohits>>>,
    completions: Mutex<VecDeque<Result<ProgressUpdate>>>,

    profile_calls: AtomicUsize,
    generate_requests: Mutex<Vec<GenerateMicrohit>>,
    complete_requests: Mutex<Vec<StepId>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_profile(&self, r: Result<UserProfile>) -> &Self {
        self.profiles.lock().unwrap().push_back(r);
        self
    }

    pub fn push_generation(&self, r: Result<GeneratedMicrohits>) -> &Self {
        self.generations.lock().unwrap().push_back(r);
        self
    }

    pub fn push_completion(&self, r: Result<ProgressUpdate>) -> &Self {
        self.completions.lock().unwrap().push_back(r);
        self
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn generate_requests(&self) -> Vec<GenerateMicrohit> {
        self.generate_requests.lock().unwrap().clone()
    }

    pub fn complete_requests(&self) -> Vec<StepId> {
        self.complete_requests.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.profile_calls()
            + self.generate_requests.lock().unwrap().len()
            + self.complete_requests.lock().unwrap().len()
    }
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T>>>, endpoint: &str) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(Error::External(format!("no scripted response for {endpoint}"))))
}

#[async_trait]
impl MicrohitApi for FakeApi {
    async fn fetch_profile(&self) -> Result<UserProfile> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.profiles, "fetch_profile")
    }

    async fn generate_microhit(&self, req: GenerateMicrohit) -> Result<GeneratedMicrohits> {
        self.generate_requests.lock().unwrap().push(req);
        pop(&self.generations, "generate_microhit")
    }

    async fn complete_microhit(&self, step_id: StepId) -> Result<ProgressUpdate> {
        self.complete_requests.lock().unwrap().push(step_id);
        pop(&self.completions, "complete_microhit")
    }
}
