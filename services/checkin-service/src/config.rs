use std::{env, net::IpAddr};

use classhub_common::env_or;

use crate::auth::DEFAULT_USER_AGENT;

#[derive(Clone, Debug)]
pub struct CheckinConfig {
    pub bind_host: IpAddr,
    pub port: u16,
    pub token: Option<String>,
    pub required_user_agent: String,
    pub refresh_secs: u32,
}

impl CheckinConfig {
    pub fn from_env() -> Self {
        // Listen on every interface so devices on the local network can reach us.
        let bind_host = env_or("BIND_HOST", IpAddr::from([0, 0, 0, 0]));
        let port = env_or("PORT", 8080u16);
        let token = resolve_token(
            env::var("CLASS_TOKEN").ok(),
            env::var("CHECKIN_TOKEN").ok(),
        );
        let required_user_agent = env::var("REQUIRED_USER_AGENT")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let refresh_secs = env_or("DASHBOARD_REFRESH_SECS", 2u32);

        Self {
            bind_host,
            port,
            token,
            required_user_agent,
            refresh_secs,
        }
    }
}

/// `CLASS_TOKEN` is the established name; `CHECKIN_TOKEN` is accepted when it is absent.
fn resolve_token(class_token: Option<String>, checkin_token: Option<String>) -> Option<String> {
    class_token
        .filter(|value| !value.is_empty())
        .or_else(|| checkin_token.filter(|value| !value.is_empty()))
}
