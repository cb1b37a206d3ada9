//! HTTP adapter for the Antipanic backend (reqwest).
//!
//! Implements the `antipanic-core` `MicrohitApi` port over the FastAPI REST surface.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Method};
use serde::{de::DeserializeOwned, Serialize};

use antipanic_core::{
    api::{
        types::{error_message, CompleteMicrohit},
        GenerateMicrohit, GeneratedMicrohits, MicrohitApi, COMPLETE_PATH, GENERATE_PATH,
        INIT_DATA_HEADER, PROFILE_PATH,
    },
    config::Config,
    domain::{ProgressUpdate, StepId, UserProfile},
    errors::Error,
    host::HostBridge,
    Result,
};

#[derive(Clone, Debug)]
pub struct HttpApiClient {
    base_url: String,
    host: HostBridge,
    http: reqwest::Client,
}

impl HttpApiClient {
    /// No timeout is configured: requests last as long as the transport allows.
    pub fn new(cfg: &Config, host: HostBridge) -> Self {
        Self {
            base_url: cfg.api_url.clone(),
            host,
            http: reqwest::Client::new(),
        }
    }

    /// The single request primitive shared by every endpoint.
    async fn request<B, T>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{endpoint}", self.base_url);
        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        // Token is read per call so a late-arriving host payload is still picked up.
        let token = self.host.auth_token();
        if !token.is_empty() {
            req = req.header(INIT_DATA_HEADER, token);
        }

        if let Some(b) = body {
            req = req.body(serde_json::to_vec(b)?);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Transport(format!("request to {endpoint} failed: {e}")))?;

        let status = resp.status();
        tracing::debug!(%method, endpoint, status = status.as_u16(), "api response");

        if !status.is_success() {
            // An unreadable error body still yields `HTTP <status>`.
            let bytes = resp.bytes().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &bytes),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("reading {endpoint} response failed: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Protocol(format!("{endpoint} returned invalid JSON: {e}")))
    }
}

#[async_trait]
impl MicrohitApi for HttpApiClient {
    async fn fetch_profile(&self) -> Result<UserProfile> {
        self.request::<(), _>(Method::GET, PROFILE_PATH, None).await
    }

    async fn generate_microhit(&self, req: GenerateMicrohit) -> Result<GeneratedMicrohits> {
        self.request(Method::POST, GENERATE_PATH, Some(&req)).await
    }

    async fn complete_microhit(&self, step_id: StepId) -> Result<ProgressUpdate> {
        self.request(Method::POST, COMPLETE_PATH, Some(&CompleteMicrohit { step_id }))
            .await
    }
}
