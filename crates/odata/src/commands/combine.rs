use crate::commands;
use crate::output_utils;
use crate::text_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::path::PathBuf;

/// Collapses a multi-line query document into the single-line form
/// suitable for pasting into an address bar.
#[derive(Debug, clap::Args)]
pub(crate) struct CombineCmd {
    #[arg(
        help="Path to the OData query document to combine.",
        name="FILE_PATH",
        required=true,
    )]
    file_path: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for CombineCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match commands::read_document(&self.file_path) {
            Ok(text) => CommandResult::stdout(format_args!(
                "{}",
                text_utils::combine_text(&text),
            )),
            Err(e) => CommandResult::stderr(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        }
    }
}
