use crate::commands;
use crate::output_utils;
use crate::text_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libodata_core::format::format_document;
use libodata_core::format::FormatOptions;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct FormatCmd {
    #[arg(
        help="Path to a JSON configuration file supplying formatting \
             gates.",
        long,
    )]
    config: Option<PathBuf>,

    #[arg(
        help="Maximum character count for the one-line $select form.",
        long,
    )]
    line_width: Option<usize>,

    #[arg(
        help="Path to the OData query document to format.",
        name="FILE_PATH",
        required=true,
    )]
    file_path: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for FormatCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let config = match commands::load_config(self.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} {e:#}",
                    output_utils::RED_X,
                ));
            }
        };

        let text = match commands::read_document(&self.file_path) {
            Ok(text) => text,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} {e:#}",
                    output_utils::RED_X,
                ));
            }
        };

        if !config.format.enable {
            // Formatting is off; the document passes through untouched.
            return CommandResult::stdout(format_args!("{text}"));
        }

        let mut text = text;

        if config.format.syntax {
            let mut options = FormatOptions::default();
            if let Some(line_width) = self.line_width {
                options.line_width = line_width;
            }
            match format_document(&text, &options) {
                Ok(formatted) => text = formatted,
                Err(e) => {
                    // A hard parse failure leaves the input untouched.
                    log::error!(
                        "Formatting could not be performed:\n{}",
                        e.format_detailed(Some(&text)),
                    );
                }
            }
        }

        // Decode in case the query was copied straight from an
        // address bar.
        if config.format.decode {
            match text_utils::decode_text(&text) {
                Ok(decoded) => text = decoded,
                Err(e) => {
                    return CommandResult::stderr(format_args!(
                        "{} {e:#}",
                        output_utils::RED_X,
                    ));
                }
            }
        }

        CommandResult::stdout(format_args!("{text}"))
    }
}
