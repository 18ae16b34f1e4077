use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wupdate_core::config::UpdateConfig;
use wupdate_core::console::StdConsole;
use wupdate_core::download::HttpDownloader;
use wupdate_core::fs::LocalFileSystem;
use wupdate_core::launcher;

use wupdate_script::error::ScriptError;
use wupdate_script::executor::ScriptExecutor;
use wupdate_script::parser;

#[derive(Parser)]
#[command(name = "wupdate", version, about = "Run an update script")]
struct Cli {
    /// Path to the update script
    script: PathBuf,

    /// Compile the script and list its directives without running them
    #[arg(long)]
    check: bool,

    /// Updater binary to hand off to after a successful run
    #[arg(long, env = "WUPDATE_UPDATER")]
    updater: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    init_logging(cli.log_file.as_deref(), cli.verbose);

    if let Err(e) = run(cli, UpdateConfig::load()).await {
        eprintln!("[e]: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_logging(log_file: Option<&Path>, verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("WUPDATE_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("wupdate.log"));
            let file_appender = tracing_appender::rolling::never(dir, name);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file_appender)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run(cli: Cli, config: UpdateConfig) -> Result<(), ScriptError> {
    let script_path = cli.script;
    if !script_path.exists() {
        return Err(ScriptError::NotFound(script_path));
    }

    let bytes = tokio::fs::read(&script_path).await?;
    let source = String::from_utf8_lossy(&bytes);
    let script = parser::parse(&source);
    info!(path = %script_path.display(), directives = script.len(), "script compiled");

    if cli.check {
        for directive in &script.directives {
            println!("{:>4}  {}", directive.line, directive);
        }
        return Ok(());
    }

    let downloader = HttpDownloader::new(&config)?;
    let mut executor = ScriptExecutor::new(
        Arc::new(LocalFileSystem),
        Arc::new(downloader),
        Box::new(StdConsole::new()),
    );
    executor.execute_script(&script).await;

    if let Some(updater) = cli.updater.or(config.updater_path) {
        return Err(launcher::hand_off(&updater, &script_path).into());
    }

    Ok(())
}
