use std::path::Path;

use clap::{Args, Subcommand};
use inquire::{error::InquireResult, Text};
use vaultcli_crypto::AuthChallenge;

use crate::{
    key_management::UserKeys,
    render::{CommandOutput, CommandResult},
};

#[derive(Subcommand, Clone)]
pub(crate) enum AuthCommand {
    #[command(long_about = "Sign a login challenge with your private key.")]
    Sign(SignArgs),
}

#[derive(Args, Clone)]
pub(crate) struct SignArgs {
    #[arg(long, help = "Account email, defaults to the one in the config file.")]
    pub(crate) email: Option<String>,

    #[arg(long, help = "Server time of the challenge.")]
    pub(crate) date: Option<String>,

    #[arg(long, help = "Print the whole request body instead of the signature only.")]
    pub(crate) request: bool,
}

impl AuthCommand {
    pub(crate) fn run(self, config_path: Option<&Path>) -> CommandResult {
        match self {
            AuthCommand::Sign(args) => args.run(config_path),
        }
    }
}

impl SignArgs {
    fn run(self, config_path: Option<&Path>) -> CommandResult {
        let keys = UserKeys::load(config_path)?;
        let email = self.email.unwrap_or_else(|| keys.config.email.clone());
        let date = text_prompt_when_none("Server date", self.date)?;

        let challenge = AuthChallenge::new(email, date);
        let cypher = keys.workspace_cypher()?;

        if self.request {
            Ok(CommandOutput::object(challenge.into_request(cypher)?))
        } else {
            Ok(challenge.sign(cypher)?.into())
        }
    }
}

/// Prompt the user for input if the value is None
///
/// Typically used when the user can provide a value via CLI or prompt
fn text_prompt_when_none(prompt: &str, val: Option<String>) -> InquireResult<String> {
    Ok(if let Some(val) = val {
        val
    } else {
        Text::new(prompt).prompt()?
    })
}
