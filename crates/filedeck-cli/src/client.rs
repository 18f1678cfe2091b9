//! Shared client utilities and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use filedeck_api_models::ErrorBody;
use filedeck_core::guard::{self, GuardDecision};
use filedeck_core::{ClientConfig, Session};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, StatusCode};
use url::Url;

use crate::token_store::FileTokenStore;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Application context passed to command handlers.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
    pub(crate) tokens: FileTokenStore,
}

impl AppContext {
    /// Session from the token file, or a validation error telling the user to
    /// log in. No request is issued either way.
    pub(crate) fn require_session(&self) -> CliResult<Session> {
        match guard::check(&self.tokens) {
            GuardDecision::Admit(session) => Ok(session),
            GuardDecision::RedirectToLogin => Err(CliError::validation(
                "not logged in; run `filedeck login` first",
            )),
        }
    }

    /// Request builder for an API path with the bearer header attached.
    pub(crate) fn authorized(
        &self,
        method: reqwest::Method,
        path: &str,
        session: &Session,
    ) -> RequestBuilder {
        self.client
            .request(method, self.config.endpoint(path))
            .header(AUTHORIZATION, session.bearer())
    }
}

/// Build the HTTP client shared by every command.
pub(crate) fn build_http_client(timeout_secs: u64) -> CliResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))
}

/// Parse a base URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Map a transport failure into a CLI error carrying the user-facing text.
pub(crate) fn transport_failure(message: &str, err: &reqwest::Error) -> CliError {
    tracing::warn!(error = %err, "request failed before a response arrived");
    CliError::failure(anyhow!("{message} ({err})"))
}

/// Classify an error response into a CLI error. `describe` turns the parsed
/// error body into the user-facing text.
pub(crate) async fn classify_problem<F>(response: reqwest::Response, describe: F) -> CliError
where
    F: FnOnce(&ErrorBody) -> String,
{
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();
    let body = ErrorBody::from_slice(&bytes);
    let message = describe(&body);
    tracing::warn!(status = status.as_u16(), message = %message, "server rejected request");

    if matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::CONFLICT
            | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        CliError::validation(message)
    } else {
        CliError::failure(anyhow!("{message} (status {status})"))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{alice_token, context};
    use super::*;
    use httpmock::MockServer;
    use httpmock::prelude::*;

    #[test]
    fn exit_codes_separate_validation_from_failure() {
        assert_eq!(CliError::validation("bad").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("boom")).exit_code(), 3);
        assert_eq!(CliError::validation("bad").display_message(), "bad");
    }

    #[test]
    fn parse_url_rejects_garbage() {
        assert!(parse_url("http://127.0.0.1:8000/api").is_ok());
        assert!(parse_url("not a url").is_err());
    }

    #[tokio::test]
    async fn missing_session_is_a_validation_error() {
        let server = MockServer::start_async().await;
        let (ctx, _dir) = context(&server, None);
        let err = ctx.require_session().expect_err("no token");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn authorized_requests_carry_bearer() {
        let server = MockServer::start_async().await;
        let token = alice_token();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/ping")
                .header("authorization", format!("Bearer {token}"));
            then.status(204);
        });
        let (ctx, _dir) = context(&server, Some(&token));
        let session = ctx.require_session().expect("session");
        let response = ctx
            .authorized(reqwest::Method::GET, "/ping", &session)
            .send()
            .await
            .expect("send");
        assert!(response.status().is_success());
        mock.assert();
    }

    #[tokio::test]
    async fn classify_problem_uses_described_text() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/conflict");
            then.status(409).json_body(serde_json::json!({"message": "exists"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(500).body("oops");
        });

        let conflict = Client::new()
            .get(server.url("/conflict"))
            .send()
            .await
            .expect("send");
        let err = classify_problem(conflict, |body| {
            body.any_message().unwrap_or("fallback").to_string()
        })
        .await;
        assert!(matches!(err, CliError::Validation(ref msg) if msg == "exists"));

        let broken = Client::new()
            .get(server.url("/broken"))
            .send()
            .await
            .expect("send");
        let err = classify_problem(broken, |_| "fallback".to_string()).await;
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().starts_with("fallback"));
    }
}
