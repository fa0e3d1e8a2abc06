mod cli;
mod command;
mod command_result;
mod commands;
mod output_utils;
mod text_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

// Every subcommand is a read-transform-print pass over one document,
// so a single-threaded runtime is all the async resolver needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    let Some(command) = cli.cmd.take() else {
        cli.run_default().await.unwrap();
        return std::process::ExitCode::SUCCESS;
    };

    let result = command.run(cli).await;
    if let Some(stdout) = result.stdout {
        println!("{stdout}");
    }
    if let Some(stderr) = result.stderr {
        eprintln!("{stderr}");
    }
    result.exit_code
}

fn setup_logger(cli: &Cli) {
    let (log_level, invalid_env_value) = if cli.verbose {
        (tracing::Level::DEBUG, None)
    } else {
        level_from_env(std::env::var("LOG_LEVEL").ok().as_deref())
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();
    log::trace!("Logging at `{log_level}`.");

    if let Some(value) = invalid_env_value {
        log::warn!(
            "Ignoring invalid `LOG_LEVEL` environment variable value \
            `{value}`."
        );
    }
}

/// Maps a `LOG_LEVEL` environment value to a level, reporting an
/// unrecognized value so it can be warned about once logging is up.
fn level_from_env(value: Option<&str>) -> (tracing::Level, Option<String>) {
    let Some(value) = value else {
        return (DEFAULT_LOG_LEVEL, None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => (tracing::Level::TRACE, None),
        "debug" | "verbose" => (tracing::Level::DEBUG, None),
        "info" => (tracing::Level::INFO, None),
        "warn" => (tracing::Level::WARN, None),
        "error" => (tracing::Level::ERROR, None),
        other => (DEFAULT_LOG_LEVEL, Some(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env_recognized_values() {
        assert_eq!(
            level_from_env(Some("TRACE")),
            (tracing::Level::TRACE, None)
        );
        assert_eq!(
            level_from_env(Some(" debug ")),
            (tracing::Level::DEBUG, None)
        );
        assert_eq!(
            level_from_env(Some("warn")),
            (tracing::Level::WARN, None)
        );
    }

    #[test]
    fn test_level_from_env_defaults() {
        assert_eq!(level_from_env(None), (DEFAULT_LOG_LEVEL, None));
        assert_eq!(
            level_from_env(Some("noisy")),
            (DEFAULT_LOG_LEVEL, Some("noisy".to_string())),
            "unrecognized values fall back and are reported"
        );
    }
}
