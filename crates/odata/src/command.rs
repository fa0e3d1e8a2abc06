use crate::Cli;
use crate::CommandResult;

/// One `odata` subcommand: consumes its parsed arguments plus the
/// global flags and produces output and an exit code. Commands never
/// print directly; `main` owns the stdout/stderr streams.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}
