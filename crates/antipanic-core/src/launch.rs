//! Typed view of the host launch payload (`initData`).
//!
//! Telegram passes `initData` as a URL-encoded query string whose `user` field is
//! itself JSON. The backend validates the signature; the client only reads it.

use chrono::{DateTime, Utc};

use crate::domain::HostUser;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchParams {
    pub query_id: Option<String>,
    pub user: Option<HostUser>,
    pub auth_date: Option<DateTime<Utc>>,
    pub start_param: Option<String>,
    pub chat_type: Option<String>,
    pub hash: Option<String>,
}

/// Parse a raw `initData` string.
///
/// Returns `None` for an empty payload or one with a malformed `user`/`auth_date`.
pub fn parse_init_data(raw: &str) -> Option<LaunchParams> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut params = LaunchParams {
        query_id: None,
        user: None,
        auth_date: None,
        start_param: None,
        chat_type: None,
        hash: None,
    };

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "query_id" => params.query_id = Some(value.into_owned()),
            "user" => match serde_json::from_str::<HostUser>(&value) {
                Ok(user) => params.user = Some(user),
                Err(e) => {
                    tracing::warn!("initData user is not valid JSON: {e}");
                    return None;
                }
            },
            "auth_date" => {
                let Some(ts) = value
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                else {
                    tracing::warn!("initData auth_date is not a unix timestamp: {value}");
                    return None;
                };
                params.auth_date = Some(ts);
            }
            "start_param" => params.start_param = Some(value.into_owned()),
            "chat_type" => params.chat_type = Some(value.into_owned()),
            "hash" => params.hash = Some(value.into_owned()),
            _ => {}
        }
    }

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    const SAMPLE: &str = "query_id=AAHdF6IQ&user=%7B%22id%22%3A279058397%2C%22first_name%22%3A%22Vlad%22%2C%22last_name%22%3A%22%22%2C%22username%22%3A%22vdkfrost%22%2C%22language_code%22%3A%22en%22%7D&auth_date=1662771648&hash=c501b71e775f74ce10e377dea85a7ea24ecd640b223ea86dfe453e0eaed2e2b2";

    #[test]
    fn parses_telegram_sample_payload() {
        let p = parse_init_data(SAMPLE).unwrap();
        assert_eq!(p.query_id.as_deref(), Some("AAHdF6IQ"));
        let user = p.user.unwrap();
        assert_eq!(user.id, UserId(279058397));
        assert_eq!(user.first_name, "Vlad");
        assert_eq!(user.username.as_deref(), Some("vdkfrost"));
        assert_eq!(p.auth_date.unwrap().timestamp(), 1662771648);
        assert!(p.hash.unwrap().starts_with("c501b7"));
        assert_eq!(p.start_param, None);
    }

    #[test]
    fn empty_payload_is_none() {
        assert_eq!(parse_init_data(""), None);
        assert_eq!(parse_init_data("   "), None);
    }

    #[test]
    fn malformed_user_or_date_is_none() {
        assert_eq!(parse_init_data("user=%7Bnot-json"), None);
        assert_eq!(parse_init_data("auth_date=yesterday"), None);
    }

    #[test]
    fn payload_without_user_still_parses() {
        let p = parse_init_data("start_param=ref42&chat_type=private").unwrap();
        assert_eq!(p.user, None);
        assert_eq!(p.start_param.as_deref(), Some("ref42"));
        assert_eq!(p.chat_type.as_deref(), Some("private"));
    }
}
