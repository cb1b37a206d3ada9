//! Backend API port.
//!
//! One method per endpoint, each a single request/response round trip. The HTTP
//! implementation lives in `antipanic-http`.

pub mod types;

use async_trait::async_trait;

use crate::{
    domain::{ProgressUpdate, StepId, UserProfile},
    Result,
};

pub use types::{GenerateMicrohit, GeneratedMicrohits};

pub const PROFILE_PATH: &str = "/api/me";
pub const GENERATE_PATH: &str = "/api/microhit/generate";
pub const COMPLETE_PATH: &str = "/api/microhit/complete";

/// Header carrying the host launch payload.
pub const INIT_DATA_HEADER: &str = "X-Telegram-Init-Data";

#[async_trait]
pub trait MicrohitApi: Send + Sync {
    /// `GET /api/me`
    async fn fetch_profile(&self) -> Result<UserProfile>;

    /// `POST /api/microhit/generate`
    ///
    /// The caller guarantees a non-empty `step_title`; no validation happens here.
    async fn generate_microhit(&self, req: GenerateMicrohit) -> Result<GeneratedMicrohits>;

    /// `POST /api/microhit/complete`
    async fn complete_microhit(&self, step_id: StepId) -> Result<ProgressUpdate>;
}
