//! Pure rendering of `ViewState` into a framework-neutral screen model.

use crate::{
    domain::{BlockerType, UserProfile},
    view::state::{ActionFlow, ViewState, Workspace},
};

/// A control the user can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Generate,
    Complete,
    Regenerate,
    Retry,
    Refresh,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub action: Action,
    pub label: String,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCard {
    pub heading: String,
    pub level: u32,
    pub xp: u32,
    pub streak: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Section {
    Spinner {
        label: String,
    },
    Notice {
        message: String,
    },
    Error {
        message: String,
    },
    Profile(ProfileCard),
    Heading(String),
    TextInput {
        label: String,
        value: String,
        placeholder: String,
        enabled: bool,
    },
    BlockerSelect {
        label: String,
        selected: BlockerType,
        enabled: bool,
    },
    Options {
        prompt: String,
        items: Vec<String>,
    },
    Button(Button),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    pub sections: Vec<Section>,
}

impl Screen {
    pub fn button(&self, action: Action) -> Option<&Button> {
        self.sections.iter().find_map(|s| match s {
            Section::Button(b) if b.action == action => Some(b),
            _ => None,
        })
    }

    /// Display lines of the options list (1-based), empty when none are shown.
    pub fn options(&self) -> Vec<String> {
        self.sections
            .iter()
            .find_map(|s| match s {
                Section::Options { items, .. } => Some(items.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::Error { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

pub fn render(state: &ViewState) -> Screen {
    let sections = match state {
        ViewState::Loading | ViewState::LoadingProfile => vec![Section::Spinner {
            label: "Loading...".to_string(),
        }],
        ViewState::Blocked { message } => vec![Section::Notice {
            message: message.clone(),
        }],
        ViewState::ProfileError { message } => vec![
            Section::Error {
                message: message.clone(),
            },
            Section::Button(Button {
                action: Action::Retry,
                label: "Retry".to_string(),
                enabled: true,
            }),
        ],
        ViewState::Ready(ws) => render_workspace(ws),
    };
    Screen { sections }
}

fn render_workspace(ws: &Workspace) -> Vec<Section> {
    let mut out = vec![
        Section::Profile(profile_card(&ws.profile)),
        Section::Button(Button {
            action: Action::Refresh,
            label: if matches!(ws.flow, ActionFlow::Refreshing) {
                "Refreshing..."
            } else {
                "Refresh"
            }
            .to_string(),
            enabled: ws.can_refresh(),
        }),
        Section::Heading("Generate Micro-Action".to_string()),
    ];

    if let Some(message) = &ws.error {
        out.push(Section::Error {
            message: message.clone(),
        });
    }

    out.push(Section::TextInput {
        label: "What task are you stuck on?".to_string(),
        value: ws.step_title.clone(),
        placeholder: "e.g., Write the first paragraph".to_string(),
        enabled: ws.can_edit(),
    });
    out.push(Section::BlockerSelect {
        label: "What's blocking you?".to_string(),
        selected: ws.blocker,
        enabled: ws.can_edit(),
    });

    match ws.flow.proposal() {
        None => out.push(Section::Button(Button {
            action: Action::Generate,
            label: if matches!(ws.flow, ActionFlow::Generating) {
                "Generating..."
            } else {
                "Generate Micro-Actions"
            }
            .to_string(),
            enabled: ws.can_generate(),
        })),
        Some(proposal) => {
            let completing = matches!(ws.flow, ActionFlow::Completing(_));
            out.push(Section::Options {
                prompt: "Choose a micro-action to start:".to_string(),
                items: proposal
                    .options
                    .iter()
                    .map(|o| format!("{}. {}", o.index + 1, o.text))
                    .collect(),
            });
            out.push(Section::Button(Button {
                action: Action::Complete,
                label: if completing {
                    "Completing..."
                } else {
                    "I Did It! +XP"
                }
                .to_string(),
                enabled: ws.can_complete(),
            }));
            out.push(Section::Button(Button {
                action: Action::Regenerate,
                label: "More Options".to_string(),
                enabled: ws.can_generate(),
            }));
        }
    }

    out
}

fn profile_card(p: &UserProfile) -> ProfileCard {
    let heading = match &p.username {
        Some(u) if !u.is_empty() => format!("{} @{u}", p.first_name),
        _ => p.first_name.clone(),
    };
    ProfileCard {
        heading,
        level: p.level,
        xp: p.xp,
        streak: format!("{} days", p.streak_days),
    }
}
