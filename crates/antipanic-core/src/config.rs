use std::{env, fs, path::Path};

use crate::{errors::Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Typed configuration for the client.
///
/// The backend base URL is the only externally visible setting; the launch
/// payload belongs to the host, not to config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_api_url(env_str("ANTIPANIC_API_URL").and_then(non_empty))
    }

    /// Build a config from an optional raw base URL (defaults to localhost).
    pub fn from_api_url(raw: Option<String>) -> Result<Self> {
        let api_url = normalize_api_url(raw.as_deref().unwrap_or(DEFAULT_API_URL))?;
        Ok(Self { api_url })
    }
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let url = url::Url::parse(raw)
        .map_err(|e| Error::Config(format!("ANTIPANIC_API_URL {raw:?} is not a valid URL: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "ANTIPANIC_API_URL must use http or https, got {:?}",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::Config(format!("ANTIPANIC_API_URL {raw:?} has no host")));
    }

    // Endpoint paths start with `/`, so drop the one trailing path slash.
    let s = url.as_str();
    Ok(s.strip_suffix('/').unwrap_or(s).to_string())
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
