use crate::commands;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libodata_core::analyzer::analyze;
use libodata_core::diagnostics::Diagnostic;
use libodata_core::diagnostics::Severity;
use libodata_core::metadata::MetadataResolver;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, clap::Args)]
pub(crate) struct CheckCmd {
    #[arg(
        help="Path to a JSON configuration file supplying metadata \
             mappings and feature gates.",
        long,
    )]
    config: Option<PathBuf>,

    #[arg(
        help="Emit diagnostics as a JSON array instead of a text report.",
        long,
    )]
    json: bool,

    #[arg(
        help="Path to the OData query document to analyze.",
        name="FILE_PATH",
        required=true,
    )]
    file_path: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for CheckCmd {
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
        if !config.diagnostic.enable {
            return CommandResult::stdout(format_args!(
                "Diagnostics are disabled by configuration.",
            ));
        }

        let text = match commands::read_document(&self.file_path) {
            Ok(text) => text,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} {e:#}",
                    output_utils::RED_X,
                ));
            }
        };

        log::debug!("Analyzing {:#?}...", self.file_path);
        let resolver = MetadataResolver::new(config.metadata.map);
        let diagnostics = analyze(&text, &resolver).await;

        let has_errors = diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error);

        if self.json {
            return match serde_json::to_string_pretty(&diagnostics) {
                Ok(json) => CommandResult {
                    exit_code: if has_errors {
                        ExitCode::FAILURE
                    } else {
                        ExitCode::SUCCESS
                    },
                    stderr: None,
                    stdout: Some(json),
                },
                Err(e) => CommandResult::stderr(format_args!(
                    "{} Failed to serialize diagnostics: {e}",
                    output_utils::RED_X,
                )),
            };
        }

        if diagnostics.is_empty() {
            CommandResult::stdout(format_args!(
                "{} No problems found in {:#?}.",
                output_utils::GREEN_CHECK,
                self.file_path,
            ))
        } else {
            CommandResult::stderr(format_args!(
                "{} {} problem(s) found in {:#?}:\n{}",
                output_utils::RED_X,
                diagnostics.len(),
                self.file_path,
                render_report(&diagnostics),
            ))
        }
    }
}

fn render_report(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| {
            let severity = match diagnostic.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            format!(
                "  {}:{}: {severity}: {}",
                diagnostic.span.start.line(),
                diagnostic.span.start.column(),
                diagnostic.message,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
