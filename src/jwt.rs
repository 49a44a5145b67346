//! Reading claims out of the backend's JWT.
//!
//! Signatures are not checked here; the backend verifies every token it receives.
//! The claims are only used to label the session and to drop it once expired.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::{Result, TaskboardError};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Claims {
    /// Account email
    pub sub: String,
    pub role: String,
    pub name: String,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn is_expired(&self, now_unix: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_unix)
    }
}

pub fn decode_claims(token: &str) -> Result<Claims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| TaskboardError::InvalidToken("missing payload segment".to_string()))?;

    // Some issuers keep the padding; the URL-safe engine here expects it gone.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TaskboardError::InvalidToken(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| TaskboardError::InvalidToken(e.to_string()))
}

/// Build an unsigned token carrying `claims`. Test helper.
#[cfg(test)]
pub fn encode_unsigned(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_login_claims() {
        let token = encode_unsigned(&json!({
            "sub": "lead@example.com",
            "role": "LEAD_DEVELOPER",
            "name": "Lena Park",
            "permissions": "TASK_WRITE",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "lead@example.com");
        assert_eq!(claims.role, "LEAD_DEVELOPER");
        assert_eq!(claims.name, "Lena Park");
        assert!(!claims.is_expired(1_700_000_100));
        assert!(claims.is_expired(1_700_003_600));
    }

    #[test]
    fn rejects_tokens_without_payload() {
        assert!(matches!(
            decode_claims("opaque-token"),
            Err(TaskboardError::InvalidToken(_))
        ));
        assert!(decode_claims("a.!!!.c").is_err());
    }

    #[test]
    fn missing_exp_never_expires() {
        let token = encode_unsigned(&json!({"sub": "a@b.co", "role": "DEVELOPER", "name": "A"}));
        assert!(!decode_claims(&token).unwrap().is_expired(i64::MAX));
    }
}
