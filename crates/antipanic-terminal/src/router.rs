use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use antipanic_core::view::{ViewController, ViewState};

use crate::{
    commands::{Command, HELP},
    display::format_screen,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the controller.
pub async fn dispatch(controller: &mut ViewController, cmd: Command) -> Flow {
    match cmd {
        Command::Title(text) => {
            if !controller.set_step_title(text) {
                tracing::debug!("title ignored: inputs are locked");
            }
        }
        Command::Blocker(b) => {
            if !controller.set_blocker(b) {
                tracing::debug!("blocker ignored: inputs are locked");
            }
        }
        Command::Generate | Command::More => controller.generate().await,
        Command::Done => controller.complete().await,
        Command::Retry => controller.retry_profile().await,
        Command::Refresh => controller.refresh_profile().await,
        Command::Help => {}
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Start the page and process commands until `quit` or end of input.
///
/// A blocked page renders once and returns; nothing can leave that state.
pub async fn run<R, W>(controller: &mut ViewController, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    controller.start().await;
    write_screen(controller, &mut output).await?;

    if matches!(controller.state(), ViewState::Blocked { .. }) {
        return Ok(());
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                output
                    .write_all(format!("{}\n{HELP}\n", e.user_message()).as_bytes())
                    .await?;
                output.flush().await?;
                continue;
            }
        };

        let show_help = cmd == Command::Help;
        if dispatch(controller, cmd).await == Flow::Quit {
            break;
        }
        if show_help {
            output.write_all(format!("{HELP}\n").as_bytes()).await?;
        }
        write_screen(controller, &mut output).await?;
    }

    Ok(())
}

/// Run against the process stdin/stdout.
pub async fn run_stdio(controller: &mut ViewController) -> anyhow::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run(controller, stdin, tokio::io::stdout()).await
}

async fn write_screen<W: AsyncWrite + Unpin>(
    controller: &ViewController,
    output: &mut W,
) -> anyhow::Result<()> {
    let text = format_screen(&controller.screen());
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use antipanic_core::{
        api::GeneratedMicrohits,
        domain::{MicrohitOption, ProgressUpdate, StepId, UserId, UserProfile},
        host::HostBridge,
        testing::{FakeApi, FakeWebApp},
    };

    fn profile() -> UserProfile {
        UserProfile {
            telegram_id: UserId(1),
            username: None,
            first_name: "Ann".into(),
            xp: 150,
            level: 3,
            streak_days: 5,
            timezone_offset: 0,
        }
    }

    fn controller(api: Arc<FakeApi>) -> ViewController {
        let host = HostBridge::new(Some(Arc::new(FakeWebApp::with_init_data("hash=abc"))));
        ViewController::new(host, api)
    }

    #[tokio::test]
    async fn blocked_page_renders_once_and_ignores_input() {
        let api = Arc::new(FakeApi::new());
        let mut vc = ViewController::new(HostBridge::absent(), api.clone());
        let mut out = Vec::new();

        run(&mut vc, &b"title x\ngenerate\n"[..], &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("only works inside Telegram"));
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn scripted_session_generates_and_completes() {
        let api = Arc::new(FakeApi::new());
        api.push_profile(Ok(profile()))
            .push_generation(Ok(GeneratedMicrohits {
                options: vec![MicrohitOption {
                    index: 0,
                    text: "Open the document".into(),
                }],
                step_id: StepId(42),
            }))
            .push_completion(Ok(ProgressUpdate {
                xp_earned: 10,
                total_xp: 160,
                streak_days: 6,
                level: 3,
            }));
        let mut vc = controller(api.clone());
        let mut out = Vec::new();

        let script = b"title Write intro\nblocker fear\ngenerate\ndone\nquit\nrefresh\n";
        run(&mut vc, &script[..], &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  1. Open the document"));
        assert!(text.contains("Level: 3  XP: 160  Streak: 6 days"));
        assert_eq!(api.complete_requests(), vec![StepId(42)]);
        // `refresh` after `quit` never ran.
        assert_eq!(api.profile_calls(), 1);
    }

    #[tokio::test]
    async fn unknown_command_prints_help() {
        let api = Arc::new(FakeApi::new());
        api.push_profile(Ok(profile()));
        let mut vc = controller(api);
        let mut out = Vec::new();

        run(&mut vc, &b"dance\n"[..], &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unknown command: dance"));
        assert!(text.contains("Commands:"));
    }
}
