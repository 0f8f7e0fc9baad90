//! Identity provider REST client.
//!
//! Sign-in goes through an identity-toolkit style endpoint:
//! `POST {base}/v1/accounts:signInWithPassword?key={api_key}`.

use anyhow::{Context, Result};
use serde::Deserialize;

use super::Session;

/// Client for the email/password sign-in operation.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
    #[serde(rename = "idToken")]
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl IdentityClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Verifies credentials with the provider and returns the session handle.
    ///
    /// # Errors
    /// Fails on transport errors, non-2xx responses (with the provider's
    /// error code mapped to a readable message), or an unparseable payload.
    pub async fn sign_in(&self, email: &str, secret: &str) -> Result<Session> {
        let url = format!(
            "{}/v1/accounts:signInWithPassword?key={}",
            self.base_url, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": secret,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .context("Failed to send sign-in request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| describe_sign_in_error(&envelope.error.message))
                .unwrap_or_else(|_| format!("provider returned HTTP {status}"));
            tracing::warn!(%status, "sign-in rejected: {reason}");
            anyhow::bail!("Sign-in failed: {reason}");
        }

        let data: SignInResponse = response
            .json()
            .await
            .context("Failed to parse sign-in response")?;

        Ok(Session {
            user_id: data.local_id,
            email: data.email,
            id_token: data.id_token,
        })
    }
}

/// Maps the provider's error codes to messages fit for the sign-in form.
fn describe_sign_in_error(code: &str) -> String {
    match code {
        "EMAIL_NOT_FOUND" => "no account exists for that email".to_string(),
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "email or password is incorrect".to_string()
        }
        "USER_DISABLED" => "this account has been disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "too many failed attempts, try again later".to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_error_codes() {
        assert_eq!(
            describe_sign_in_error("INVALID_PASSWORD"),
            "email or password is incorrect"
        );
        assert_eq!(
            describe_sign_in_error("EMAIL_NOT_FOUND"),
            "no account exists for that email"
        );
    }

    #[test]
    fn test_describe_unknown_error_code_passes_through() {
        assert_eq!(describe_sign_in_error("OPERATION_NOT_ALLOWED"), "OPERATION_NOT_ALLOWED");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = IdentityClient::new("https://id.example.com/", "k");
        assert_eq!(client.base_url, "https://id.example.com");
    }
}
