use std::fmt::Write as _;

use antipanic_core::view::{Action, Button, Screen, Section};

/// Command that triggers a button, shown next to its label.
fn command_hint(action: Action) -> &'static str {
    match action {
        Action::Generate => "generate",
        Action::Complete => "done",
        Action::Regenerate => "more",
        Action::Retry => "retry",
        Action::Refresh => "refresh",
    }
}

fn format_button(b: &Button) -> String {
    if b.enabled {
        format!("[{}] ({})", b.label, command_hint(b.action))
    } else {
        format!("[{}] (disabled)", b.label)
    }
}

fn lock_suffix(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        "  (locked)"
    }
}

/// Plain-text rendering of a screen for the terminal.
pub fn format_screen(screen: &Screen) -> String {
    let mut out = String::new();
    let mut buttons: Vec<String> = Vec::new();

    let flush = |out: &mut String, buttons: &mut Vec<String>| {
        if !buttons.is_empty() {
            let _ = writeln!(out, "{}", buttons.join("  "));
            buttons.clear();
        }
    };

    for section in &screen.sections {
        if !matches!(section, Section::Button(_)) {
            flush(&mut out, &mut buttons);
        }
        match section {
            Section::Spinner { label } => {
                let _ = writeln!(out, "… {label}");
            }
            Section::Notice { message } => {
                let _ = writeln!(out, "{message}");
            }
            Section::Error { message } => {
                let _ = writeln!(out, "! {message}");
            }
            Section::Profile(card) => {
                let _ = writeln!(out, "{}", card.heading);
                let _ = writeln!(
                    out,
                    "Level: {}  XP: {}  Streak: {}",
                    card.level, card.xp, card.streak
                );
            }
            Section::Heading(title) => {
                let _ = writeln!(out, "\n== {title} ==");
            }
            Section::TextInput {
                label,
                value,
                placeholder,
                enabled,
            } => {
                let shown = if value.is_empty() {
                    format!("<{placeholder}>")
                } else {
                    value.clone()
                };
                let _ = writeln!(out, "{label} {shown}{}", lock_suffix(*enabled));
            }
            Section::BlockerSelect {
                label,
                selected,
                enabled,
            } => {
                let _ = writeln!(
                    out,
                    "{label} {} ({selected}){}",
                    selected.label(),
                    lock_suffix(*enabled)
                );
            }
            Section::Options { prompt, items } => {
                let _ = writeln!(out, "{prompt}");
                for item in items {
                    let _ = writeln!(out, "  {item}");
                }
            }
            Section::Button(b) => buttons.push(format_button(b)),
        }
    }
    flush(&mut out, &mut buttons);

    out
}
