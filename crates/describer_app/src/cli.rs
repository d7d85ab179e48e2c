use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use describer_core::AiProvider;
use describer_logging::{LevelFilter, LogDestination};

#[derive(Debug, Parser)]
#[command(name = "describer", about = "Fill in missing link descriptions with an AI provider")]
pub struct Cli {
    /// Directory holding the saved config and link list.
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the saved configuration and all links.
    Show,
    /// Edit and save the provider configuration.
    Configure(ConfigureArgs),
    /// Append a link.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Generate descriptions for every link lacking one. Type `s` + Enter to stop.
    Generate {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Default, clap::Args)]
pub struct ConfigureArgs {
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,
    #[arg(long)]
    pub api_key: Option<String>,
    /// Only used by OpenAI-compatible providers.
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
}

impl ConfigureArgs {
    pub fn is_empty(&self) -> bool {
        self.provider.is_none()
            && self.api_key.is_none()
            && self.base_url.is_none()
            && self.model.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Gemini,
    #[value(alias = "openai-compatible")]
    Openai,
}

impl From<ProviderArg> for AiProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => AiProvider::Gemini,
            ProviderArg::Openai => AiProvider::OpenAiCompatible,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
