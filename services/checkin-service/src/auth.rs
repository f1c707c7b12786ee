use subtle::ConstantTimeEq;

pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";
pub const DEFAULT_USER_AGENT: &str = "ESP32-Class-Device";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenyReason {
    UserAgent,
    Token,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::UserAgent => "user_agent_mismatch",
            DenyReason::Token => "token_mismatch",
        }
    }
}

/// Gatekeeper for device check-ins: a fixed User-Agent plus a shared secret.
#[derive(Clone, Debug)]
pub struct AuthGuard {
    required_user_agent: String,
    token: Option<String>,
}

impl AuthGuard {
    /// An empty token counts as unconfigured; no request can pass without a secret.
    pub fn new(required_user_agent: impl Into<String>, token: Option<String>) -> Self {
        Self {
            required_user_agent: required_user_agent.into(),
            token: token.filter(|value| !value.is_empty()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Passes only when both headers match exactly; otherwise names the first check
    /// that failed.
    pub fn verify(&self, user_agent: &str, token: &str) -> Result<(), DenyReason> {
        if user_agent != self.required_user_agent {
            return Err(DenyReason::UserAgent);
        }
        let expected = self.token.as_deref().ok_or(DenyReason::Token)?;
        if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(DenyReason::Token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> AuthGuard {
        AuthGuard::new(DEFAULT_USER_AGENT, Some("s3cret".to_string()))
    }

    #[test]
    fn accepts_exact_pair() {
        assert_eq!(guard().verify("ESP32-Class-Device", "s3cret"), Ok(()));
    }

    #[test]
    fn rejects_wrong_user_agent() {
        let guard = guard();
        assert_eq!(
            guard.verify("curl/8.0", "s3cret"),
            Err(DenyReason::UserAgent)
        );
        assert!(guard.verify("esp32-class-device", "s3cret").is_err());
        assert!(guard.verify("ESP32-Class-Device ", "s3cret").is_err());
    }

    #[test]
    fn rejects_wrong_or_missing_token() {
        let guard = guard();
        assert_eq!(guard.verify(DEFAULT_USER_AGENT, "wrong"), Err(DenyReason::Token));
        assert_eq!(guard.verify(DEFAULT_USER_AGENT, ""), Err(DenyReason::Token));
        assert!(guard.verify(DEFAULT_USER_AGENT, "s3cret2").is_err());
    }

    #[test]
    fn unconfigured_token_denies_everything() {
        let guard = AuthGuard::new(DEFAULT_USER_AGENT, Some(String::new()));
        assert!(!guard.has_token());
        assert_eq!(guard.verify(DEFAULT_USER_AGENT, ""), Err(DenyReason::Token));
        assert_eq!(
            AuthGuard::new(DEFAULT_USER_AGENT, None).verify(DEFAULT_USER_AGENT, "x"),
            Err(DenyReason::Token)
        );
    }
}
