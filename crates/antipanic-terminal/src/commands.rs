use std::str::FromStr;

use antipanic_core::{domain::BlockerType, errors::Error};

pub const HELP: &str = "\
Commands:
  title <text>      set the task you are stuck on
  blocker <kind>    fear | overwhelm | unclear | boring | distraction
  generate          generate micro-actions
  more              generate different options
  done              complete the current micro-action
  retry             retry loading the profile
  refresh           reload the profile
  help              show this help
  quit              exit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Blocker(BlockerType),
    Generate,
    More,
    Done,
    Retry,
    Refresh,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((n, r)) => (n, r.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "title" => Ok(Command::Title(rest.to_string())),
            "blocker" => rest.parse().map(Command::Blocker),
            "generate" | "gen" => Ok(Command::Generate),
            "more" => Ok(Command::More),
            "done" => Ok(Command::Done),
            "retry" => Ok(Command::Retry),
            "refresh" => Ok(Command::Refresh),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(Error::Validation("empty command".to_string())),
            other => Err(Error::Validation(format!("unknown command: {other}"))),
        }
    }
}
