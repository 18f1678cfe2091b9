//! Argument parsing, logging setup and command dispatch.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand, ValueEnum};
use filedeck_core::ClientConfig;
use filedeck_core::config::{DEFAULT_API_BASE_URL, DEFAULT_FILE_BASE_URL};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use crate::client::{AppContext, CliError, CliResult, build_http_client, parse_url};
use crate::commands::auth::{handle_login, handle_logout, handle_register, handle_whoami};
use crate::commands::files::{
    handle_delete, handle_list, handle_preview, handle_search, handle_upload,
};
use crate::token_store::{FileTokenStore, default_token_path};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command and reports failures
/// on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli.log_level, LogFormat::infer()) {
        eprintln!("warning: {err}");
    }

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let ctx = AppContext {
        client: build_http_client(cli.timeout)?,
        config: ClientConfig::new(cli.api_url.as_str(), cli.file_url.as_str()),
        tokens: FileTokenStore::new(cli.token_file.unwrap_or_else(default_token_path)),
    };
    tracing::debug!(
        api = ctx.config.api_base_url(),
        token_file = %ctx.tokens.path().display(),
        "dispatching command"
    );

    match cli.command {
        Command::Register(args) => handle_register(&ctx, args).await,
        Command::Login(args) => handle_login(&ctx, args).await,
        Command::Logout => handle_logout(&ctx),
        Command::Whoami => handle_whoami(&ctx, cli.output),
        Command::Ls(args) => handle_list(&ctx, args, cli.output).await,
        Command::Search(args) => handle_search(&ctx, args, cli.output).await,
        Command::Upload(args) => handle_upload(&ctx, args, cli.output).await,
        Command::Rm(args) => handle_delete(&ctx, args, cli.output).await,
        Command::Preview(args) => handle_preview(&ctx, args, cli.output).await,
    }
}

#[derive(Parser)]
#[command(name = "filedeck", about = "Upload, browse and preview files on a FileDeck server")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "FILEDECK_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_BASE_URL
    )]
    api_url: Url,
    #[arg(
        long,
        global = true,
        env = "FILEDECK_FILE_URL",
        value_parser = parse_url,
        default_value = DEFAULT_FILE_BASE_URL,
        help = "Base URL that stored file paths are appended to"
    )]
    file_url: Url,
    #[arg(
        long,
        global = true,
        env = "FILEDECK_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long,
        global = true,
        env = "FILEDECK_TOKEN_FILE",
        help = "Where the session token is stored (defaults to the user config directory)"
    )]
    token_file: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "FILEDECK_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter used when RUST_LOG is unset"
    )]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Register(RegisterArgs),
    /// Log in and store the session token.
    Login(LoginArgs),
    /// Forget the stored session token.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List one page of your files.
    Ls(ListArgs),
    /// Search your files by name.
    Search(SearchArgs),
    /// Upload a local file.
    Upload(UploadArgs),
    /// Delete files by id.
    Rm(DeleteArgs),
    /// Show how a file would be previewed.
    Preview(PreviewArgs),
}

#[derive(Args)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
}

#[derive(Args)]
pub(crate) struct ListArgs {
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) page: u32,
}

#[derive(Args)]
pub(crate) struct SearchArgs {
    pub(crate) query: String,
}

#[derive(Args)]
pub(crate) struct UploadArgs {
    pub(crate) path: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    #[arg(help = "Ids of the files to delete")]
    pub(crate) ids: Vec<i64>,
}

#[derive(Args)]
pub(crate) struct PreviewArgs {
    pub(crate) id: i64,
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Page the file is listed on"
    )]
    pub(crate) page: u32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Output formats for the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Pretty logs for debug builds, JSON for release builds.
    pub(crate) const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// parseable.
fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
    }
    .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Password from the flag, or an interactive prompt.
pub(crate) fn resolve_password(provided: Option<String>) -> CliResult<String> {
    if let Some(value) = provided {
        return Ok(value);
    }
    rpassword::prompt_password("Password: ")
        .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_and_defaults() {
        let cli = Cli::try_parse_from([
            "filedeck",
            "--api-url",
            "http://files.test/api",
            "--output",
            "json",
            "ls",
        ])
        .expect("parse");
        assert_eq!(cli.api_url.as_str(), "http://files.test/api");
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Ls(ListArgs { page: 1 })));
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(Cli::try_parse_from(["filedeck", "ls", "--page", "0"]).is_err());
    }

    #[test]
    fn rm_accepts_many_ids() {
        let cli = Cli::try_parse_from(["filedeck", "rm", "3", "5"]).expect("parse");
        let Command::Rm(args) = cli.command else {
            panic!("expected rm");
        };
        assert_eq!(args.ids, vec![3, 5]);
    }

    #[test]
    fn provided_password_skips_prompt() {
        assert_eq!(resolve_password(Some("pw".into())).expect("pw"), "pw");
    }

    #[test]
    fn log_format_follows_build_profile() {
        let expected = if cfg!(debug_assertions) {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        };
        assert_eq!(LogFormat::infer(), expected);
        let _ = init_logging("info", LogFormat::Pretty);
    }
}
