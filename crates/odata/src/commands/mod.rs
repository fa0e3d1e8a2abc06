mod check;
mod combine;
mod decode;
mod encode;
mod format;

use crate::Cli;
use crate::CommandResult;
use anyhow::Context;
use check::CheckCmd;
use combine::CombineCmd;
use decode::DecodeCmd;
use encode::EncodeCmd;
use format::FormatCmd;
use libodata_core::config::HostConfig;
use std::path::Path;

#[derive(Debug, clap::Parser)]
#[command(name = "odata")]
pub(crate) enum CommandEnum {
    Check(Box<CheckCmd>),
    Combine(Box<CombineCmd>),
    Decode(Box<DecodeCmd>),
    Encode(Box<EncodeCmd>),
    Format(Box<FormatCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Check(cmd) => cmd.run(cli).await,
            Self::Combine(cmd) => cmd.run(cli).await,
            Self::Decode(cmd) => cmd.run(cli).await,
            Self::Encode(cmd) => cmd.run(cli).await,
            Self::Format(cmd) => cmd.run(cli).await,
        }
    }
}

/// Loads a [`HostConfig`] from a JSON file, or the documented
/// defaults when no path was given.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<HostConfig> {
    let Some(path) = path else {
        return Ok(HostConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {path:#?}."))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {path:#?}."))
}

/// Reads the query document named on the command line.
pub(crate) fn read_document(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read query document {path:#?}."))
}
