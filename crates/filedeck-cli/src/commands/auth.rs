use anyhow::anyhow;
use filedeck_api_models::{LOGIN_PATH, LoginResponse, MessageResponse, REGISTER_PATH};
use filedeck_core::TokenStore;
use filedeck_core::auth::{
    LOGIN_FAILURE_FALLBACK, LoginForm, REGISTER_FAILURE_FALLBACK, RegisterForm,
    login_failure_text, login_success_text, register_failure_text, register_success_text,
};
use filedeck_core::session::{end_session, persist_login};

use crate::cli::{LoginArgs, OutputFormat, RegisterArgs, resolve_password};
use crate::client::{AppContext, CliError, CliResult, classify_problem, transport_failure};
use crate::output::render_whoami;

pub(crate) async fn handle_register(ctx: &AppContext, args: RegisterArgs) -> CliResult<()> {
    let password = resolve_password(args.password)?;
    let request = RegisterForm {
        name: args.name,
        email: args.email,
        password,
    }
    .into_request()
    .map_err(|err| CliError::validation(err.to_string()))?;

    tracing::debug!(email = %request.email, "registering account");
    let response = ctx
        .client
        .post(ctx.config.endpoint(REGISTER_PATH))
        .json(&request)
        .send()
        .await
        .map_err(|err| transport_failure(REGISTER_FAILURE_FALLBACK, &err))?;

    if response.status().is_success() {
        let body = response.json::<MessageResponse>().await.unwrap_or_default();
        println!("{}", register_success_text(&body));
        println!("Log in with `filedeck login --email {}`.", request.email);
        Ok(())
    } else {
        Err(classify_problem(response, |body| register_failure_text(Some(body))).await)
    }
}

pub(crate) async fn handle_login(ctx: &AppContext, args: LoginArgs) -> CliResult<()> {
    let password = resolve_password(args.password)?;
    let request = LoginForm {
        email: args.email,
        password,
    }
    .into_request()
    .map_err(|err| CliError::validation(err.to_string()))?;

    tracing::debug!(email = %request.email, "logging in");
    let response = ctx
        .client
        .post(ctx.config.endpoint(LOGIN_PATH))
        .json(&request)
        .send()
        .await
        .map_err(|err| transport_failure(LOGIN_FAILURE_FALLBACK, &err))?;

    if !response.status().is_success() {
        return Err(classify_problem(response, |body| login_failure_text(Some(body))).await);
    }

    let body = response
        .json::<LoginResponse>()
        .await
        .map_err(|err| CliError::failure(anyhow!("failed to parse login response: {err}")))?;
    let notice = login_success_text(&body);

    match body.token.as_deref().filter(|token| !token.trim().is_empty()) {
        Some(token) => {
            let session = persist_login(&ctx.tokens, token).map_err(|err| {
                CliError::failure(anyhow::Error::new(err).context("server issued an unusable token"))
            })?;
            println!("{notice}");
            println!("{}", session.welcome_message());
        }
        None => {
            println!("{notice}");
            tracing::warn!("login succeeded without a session token");
            eprintln!("no session token was issued; you are still logged out");
        }
    }
    Ok(())
}

pub(crate) fn handle_logout(ctx: &AppContext) -> CliResult<()> {
    let had_session = ctx.tokens.load_token().is_some();
    end_session(&ctx.tokens).map_err(|err| CliError::failure(anyhow::Error::new(err)))?;
    if had_session {
        println!("Logged out.");
    } else {
        println!("No session was stored.");
    }
    Ok(())
}

pub(crate) fn handle_whoami(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.require_session()?;
    render_whoami(&session, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{alice_token, context};
    use httpmock::prelude::*;
    use serde_json::json;

    fn register_args() -> RegisterArgs {
        RegisterArgs {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: Some("secret".into()),
        }
    }

    fn login_args() -> LoginArgs {
        LoginArgs {
            email: "alice@example.com".into(),
            password: Some("secret".into()),
        }
    }

    #[tokio::test]
    async fn register_posts_form() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/register").json_body(json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "secret"
            }));
            then.status(201)
                .json_body(json!({"message": "User registered successfully"}));
        });
        let (ctx, _dir) = context(&server, None);

        handle_register(&ctx, register_args())
            .await
            .expect("register should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn register_failure_surfaces_server_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/register");
            then.status(422)
                .json_body(json!({"message": "The email has already been taken."}));
        });
        let (ctx, _dir) = context(&server, None);

        let err = handle_register(&ctx, register_args())
            .await
            .expect_err("register should fail");
        assert!(
            matches!(err, CliError::Validation(ref message) if message == "The email has already been taken.")
        );
    }

    #[tokio::test]
    async fn register_rejects_blank_fields_without_request() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/register");
            then.status(201);
        });
        let (ctx, _dir) = context(&server, None);
        let args = RegisterArgs {
            name: "  ".into(),
            ..register_args()
        };

        let err = handle_register(&ctx, args).await.expect_err("blank name");
        assert_eq!(err.display_message(), "name is required");
        mock.assert_calls(0);
    }

    #[tokio::test]
    async fn login_persists_token_and_username() {
        let server = MockServer::start_async().await;
        let token = alice_token();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/login").json_body(json!({
                "email": "alice@example.com",
                "password": "secret"
            }));
            then.status(200)
                .json_body(json!({"token": token, "message": "Login successful"}));
        });
        let (ctx, _dir) = context(&server, None);

        handle_login(&ctx, login_args()).await.expect("login");
        mock.assert();
        assert_eq!(ctx.tokens.load_token().as_deref(), Some(token.as_str()));
        assert_eq!(ctx.tokens.load_username().as_deref(), Some("alice"));
        let session = ctx.require_session().expect("session");
        assert_eq!(session.welcome_message(), "Welcome, alice 👋!");
    }

    #[tokio::test]
    async fn login_failure_reads_error_field() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/login");
            then.status(401).json_body(json!({"error": "Invalid credentials"}));
        });
        let (ctx, _dir) = context(&server, None);

        let err = handle_login(&ctx, login_args()).await.expect_err("login fails");
        assert_eq!(err.display_message(), "Invalid credentials");
        assert!(ctx.tokens.load_token().is_none());
    }

    #[tokio::test]
    async fn login_failure_without_body_uses_fallback() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/login");
            then.status(500);
        });
        let (ctx, _dir) = context(&server, None);

        let err = handle_login(&ctx, login_args()).await.expect_err("login fails");
        assert!(err.display_message().starts_with(LOGIN_FAILURE_FALLBACK));
    }

    #[tokio::test]
    async fn login_without_token_stays_logged_out() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/login");
            then.status(200).json_body(json!({"message": "ok"}));
        });
        let (ctx, _dir) = context(&server, None);

        handle_login(&ctx, login_args()).await.expect("login");
        assert!(ctx.require_session().is_err());
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let server = MockServer::start_async().await;
        let (ctx, _dir) = context(&server, Some(&alice_token()));
        ctx.tokens.save_username("alice").expect("seed username");

        handle_logout(&ctx).expect("logout");
        assert!(ctx.tokens.load_token().is_none());
        assert!(ctx.tokens.load_username().is_none());
        assert!(handle_whoami(&ctx, OutputFormat::Table).is_err());
    }

    #[tokio::test]
    async fn whoami_renders_session() {
        let server = MockServer::start_async().await;
        let (ctx, _dir) = context(&server, Some(&alice_token()));
        handle_whoami(&ctx, OutputFormat::Json).expect("whoami");
    }
}
