use crate::commands;
use crate::output_utils;
use crate::text_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::path::PathBuf;

/// Percent-decodes a query document pasted from an address bar.
#[derive(Debug, clap::Args)]
pub(crate) struct DecodeCmd {
    #[arg(
        help="Path to the OData query document to decode.",
        name="FILE_PATH",
        required=true,
    )]
    file_path: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for DecodeCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let text = match commands::read_document(&self.file_path) {
            Ok(text) => text,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} {e:#}",
                    output_utils::RED_X,
                ));
            }
        };
        match text_utils::decode_text(&text) {
            Ok(decoded) => CommandResult::stdout(format_args!("{decoded}")),
            Err(e) => CommandResult::stderr(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        }
    }
}
