use std::path::Path;

use clap::Subcommand;

use crate::render::CommandResult;

mod config;
pub(crate) use config::{Config, ConfigError, ConfigFile};

#[derive(Subcommand, Clone)]
pub(crate) enum ConfigCommand {
    #[command(long_about = "Print the value of a config option.")]
    Get {
        #[arg(help = "Option name, either 'option' or 'section.option'.")]
        option: String,
    },

    #[command(long_about = "Set a config option and save the config file.")]
    Set {
        #[arg(help = "Option name, either 'option' or 'section.option'.")]
        option: String,
        value: String,
    },

    #[command(long_about = "Print the path of the config file in use.")]
    Path,
}

impl ConfigCommand {
    pub(crate) fn run(self, config_path: Option<&Path>) -> CommandResult {
        let mut file = ConfigFile::open(config_path)?;

        match self {
            ConfigCommand::Get { option } => Ok(file.get(&option)?.into()),
            ConfigCommand::Set { option, value } => {
                file.set(&option, &value)?;
                Ok(().into())
            }
            ConfigCommand::Path => Ok(file.path().display().to_string().into()),
        }
    }
}
