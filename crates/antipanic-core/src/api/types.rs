use serde::{Deserialize, Serialize};

use crate::{
    domain::{BlockerType, MicrohitOption, StepId},
    errors::Error,
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateMicrohit {
    pub step_title: String,
    pub blocker_type: BlockerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMicrohits {
    pub options: Vec<MicrohitOption>,
    pub step_id: StepId,
}

impl GeneratedMicrohits {
    /// Reject batches whose indices are not exactly `0..n` in order.
    pub fn validated(self) -> Result<Self> {
        for (expected, option) in self.options.iter().enumerate() {
            if option.index as usize != expected {
                return Err(Error::Protocol(format!(
                    "option indices must be 0..{} in order, found {} at position {expected}",
                    self.options.len(),
                    option.index
                )));
            }
        }
        Ok(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteMicrohit {
    pub step_id: StepId,
}

pub const GENERIC_API_FAILURE: &str = "API request failed";

/// Message for a failed response.
///
/// - body is not JSON: `HTTP <status>`
/// - `detail` is a string: that string
/// - `detail` is a validation list (`[{"msg": ..}, ..]`): the messages joined
/// - anything else: a generic failure message
pub fn error_message(status: u16, body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return format!("HTTP {status}");
    };

    match value.get("detail") {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(serde_json::Value::Array(items)) => {
            let msgs = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>();
            if msgs.is_empty() {
                GENERIC_API_FAILURE.to_string()
            } else {
                msgs.join("; ")
            }
        }
        _ => GENERIC_API_FAILURE.to_string(),
    }
}
