use crate::commands;
use crate::output_utils;
use crate::text_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::path::PathBuf;

/// Percent-encodes a query document as a single URI component.
#[derive(Debug, clap::Args)]
pub(crate) struct EncodeCmd {
    #[arg(
        help="Path to the OData query document to encode.",
        name="FILE_PATH",
        required=true,
    )]
    file_path: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for EncodeCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match commands::read_document(&self.file_path) {
            Ok(text) => CommandResult::stdout(format_args!(
                "{}",
                text_utils::encode_text(&text),
            )),
            Err(e) => CommandResult::stderr(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        }
    }
}
