//! Entry point for the translation sync/audit tool.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Args,
    Parser,
    Subcommand,
};
use medal_i18n::audit::{
    AuditError,
    run_audit,
    write_report,
};
use medal_i18n::catalog::{
    DiscoveryError,
    discover_locale_files,
};
use medal_i18n::config::{
    BackendCredentials,
    CACHE_CONTROL,
    ConfigError,
    ConfigManager,
    CredentialsError,
};
use medal_i18n::locale::{
    FilePreferenceStore,
    LanguageSwitcher,
    SwitchError,
    environment_language,
};
use medal_i18n::render::MarkupDocument;
use medal_i18n::store::{
    FsTranslationSource,
    parse_vars,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Where `resolve` remembers the chosen language, relative to the project root.
const PREFERENCES_PATH: &str = ".medal-i18n/preferences.json";

/// Exit code for failures of the tool itself.
const FAILURE: u8 = 2;

/// Everything that stops a command from finishing. All of these exit with [`FAILURE`].
#[derive(Error, Debug)]
enum CliError {
    /// `.medal-i18n.json` could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The audit could not start.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// The language directory could not be listed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The requested locale could not be loaded.
    #[error(transparent)]
    Switch(#[from] SwitchError),

    /// Backend credentials are missing from the environment.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// `--vars` is not a JSON object.
    #[error("Invalid --vars: {0}")]
    Vars(#[source] serde_json::Error),

    /// The client configuration could not be serialized.
    #[error("Failed to serialize the client configuration: {0}")]
    ClientConfig(#[source] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "medal-i18n", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Project root holding `.medal-i18n.json` and the language directory.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    check: CheckArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare every locale with the baseline (default).
    Check(CheckArgs),

    /// Resolve a key the way the page would.
    Resolve {
        key: String,

        /// Switch to this locale instead of the remembered one.
        #[arg(long)]
        lang: Option<String>,

        /// JSON object of placeholder values, e.g. '{"name": "Alice"}'.
        #[arg(long)]
        vars: Option<String>,
    },

    /// Print the client configuration served to the browser.
    ClientConfig {
        /// Print the response headers before the body.
        #[arg(long)]
        headers: bool,
    },
}

#[derive(Debug, Clone, Copy, Args)]
struct CheckArgs {
    /// Add missing keys as draft copies of the baseline value.
    #[arg(long)]
    fix: bool,

    /// Exit with 1 when differences remain.
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(writer)
        .init();

    let cli = Cli::parse();

    match run(cli, &mut io::stdout()).await {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::from(FAILURE)
        }
    }
}

/// Dispatches the parsed command and writes its output to `out`.
async fn run(cli: Cli, out: &mut (impl Write + Send)) -> Result<u8, CliError> {
    match cli.command {
        None => check(&cli.root, cli.check, out).await,
        Some(Command::Check(args)) => check(&cli.root, args, out).await,
        Some(Command::Resolve { key, lang, vars }) => {
            resolve(&cli.root, &key, lang.as_deref(), vars.as_deref(), out).await
        }
        Some(Command::ClientConfig { headers }) => client_config(headers, out),
    }
}

/// 設定ファイルを読み込む
fn load_config(root: &Path) -> Result<ConfigManager, ConfigError> {
    let mut manager = ConfigManager::new();
    manager.load_settings(Some(root.to_path_buf()))?;
    Ok(manager)
}

/// Audits every locale against the baseline and prints the report.
async fn check(root: &Path, args: CheckArgs, out: &mut (impl Write + Send)) -> Result<u8, CliError> {
    let manager = load_config(root)?;
    let settings = manager.get_settings();

    let summary = run_audit(settings, &manager.translation_dir(), args.fix).await?;
    write_report(out, &summary)?;

    Ok(summary.exit_code(args.strict || settings.fail_on_mismatch))
}

/// Resolves `key` after switching to `lang` (or the remembered/detected locale).
async fn resolve(
    root: &Path,
    key: &str,
    lang: Option<&str>,
    vars: Option<&str>,
    out: &mut (impl Write + Send),
) -> Result<u8, CliError> {
    let manager = load_config(root)?;
    let settings = manager.get_settings();
    let translation_dir = manager.translation_dir();

    let vars = vars.map(parse_vars).transpose().map_err(CliError::Vars)?;

    let supported = match &settings.languages {
        Some(languages) => languages.clone(),
        None => discover_locale_files(&translation_dir, settings)?
            .into_iter()
            .map(|(locale, _)| locale)
            .collect(),
    };

    let switcher = LanguageSwitcher::new(
        FsTranslationSource::new(&translation_dir),
        FilePreferenceStore::new(root.join(PREFERENCES_PATH)),
        MarkupDocument::new(),
        supported,
        settings.default_language.clone(),
    )
    .with_separator(settings.key_separator.clone());

    match lang {
        Some(lang) => switcher.switch_to(lang).await?,
        None => switcher.start(environment_language().as_deref()).await?,
    };

    let text = switcher.resolve(key, vars.as_ref()).await;
    writeln!(out, "{text}")?;

    Ok(0)
}

/// Prints the client configuration body, optionally with its response headers.
fn client_config(headers: bool, out: &mut impl Write) -> Result<u8, CliError> {
    let credentials = BackendCredentials::from_env()?;
    let body = credentials.to_response_body().map_err(CliError::ClientConfig)?;

    if headers {
        writeln!(out, "Content-Type: application/json")?;
        writeln!(out, "Cache-Control: {CACHE_CONTROL}")?;
        writeln!(out)?;
    }
    writeln!(out, "{body}")?;

    Ok(0)
}
