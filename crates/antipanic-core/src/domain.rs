use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Backend id of the currently proposed micro-action step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub i64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the user's profile as last reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub telegram_id: UserId,
    pub username: Option<String>,
    pub first_name: String,
    pub xp: u32,
    pub level: u32,
    pub streak_days: u32,
    pub timezone_offset: i32,
}

impl UserProfile {
    /// Overwrite progress fields with backend-confirmed values.
    pub fn apply_progress(&mut self, update: &ProgressUpdate) {
        self.xp = update.total_xp;
        self.level = update.level;
        self.streak_days = update.streak_days;
    }
}

/// Why the user is stuck; biases generation on the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockerType {
    #[default]
    Fear,
    Overwhelm,
    Unclear,
    Boring,
    Distraction,
}

impl BlockerType {
    pub const ALL: [BlockerType; 5] = [
        BlockerType::Fear,
        BlockerType::Overwhelm,
        BlockerType::Unclear,
        BlockerType::Boring,
        BlockerType::Distraction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockerType::Fear => "fear",
            BlockerType::Overwhelm => "overwhelm",
            BlockerType::Unclear => "unclear",
            BlockerType::Boring => "boring",
            BlockerType::Distraction => "distraction",
        }
    }

    /// Human label for the selector.
    pub fn label(self) -> &'static str {
        match self {
            BlockerType::Fear => "Fear / Anxiety",
            BlockerType::Overwhelm => "Overwhelmed",
            BlockerType::Unclear => "Unclear what to do",
            BlockerType::Boring => "Boring / Unmotivated",
            BlockerType::Distraction => "Distracted",
        }
    }
}

impl fmt::Display for BlockerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        BlockerType::ALL
            .into_iter()
            .find(|b| b.as_str() == needle)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Unknown blocker {s:?}; expected one of: fear, overwhelm, unclear, boring, distraction"
                ))
            })
    }
}

/// One suggested micro-action within a generated batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrohitOption {
    pub index: u32,
    pub text: String,
}

/// Progress fields returned after completing a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub xp_earned: u32,
    pub total_xp: u32,
    pub streak_days: u32,
    pub level: u32,
}

/// User identity as reported by the host (`initDataUnsafe.user`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUser {
    pub id: UserId,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
