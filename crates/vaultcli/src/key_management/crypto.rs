use std::{
    io::Read,
    path::{Path, PathBuf},
};

use clap::{Args, Subcommand};
use color_eyre::eyre::WrapErr;
use tracing::info;
use vaultcli_crypto::{WrappedWorkspaceKey, DEFAULT_WORKSPACE_KEY_SIZE};

use super::UserKeys;
use crate::render::CommandResult;

#[derive(Args, Clone)]
pub(crate) struct EncryptArgs {
    #[arg(long, help = "Wrapped workspace key, as stored in the workspace membership.")]
    pub(crate) workspace_key: WrappedWorkspaceKey,

    #[arg(long, help = "Read the plaintext from this file instead of stdin.")]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub(crate) struct DecryptArgs {
    #[arg(long, help = "Wrapped workspace key, as stored in the workspace membership.")]
    pub(crate) workspace_key: WrappedWorkspaceKey,

    #[arg(long, help = "Read the encrypted payload from this file instead of stdin.")]
    pub(crate) input: Option<PathBuf>,

    #[arg(
        long,
        help = "Write the decrypted bytes to this file instead of printing them as text."
    )]
    pub(crate) raw_output: Option<PathBuf>,
}

#[derive(Subcommand, Clone)]
pub(crate) enum WorkspaceKeyCommand {
    #[command(long_about = "Generate a new workspace key wrapped for your own key.")]
    New {
        #[arg(long, default_value_t = DEFAULT_WORKSPACE_KEY_SIZE, help = "Key size in bytes.")]
        size: usize,
    },
}

impl EncryptArgs {
    pub(crate) fn run(self, config_path: Option<&Path>) -> CommandResult {
        let plaintext = read_input(self.input.as_deref())?;
        let cypher = UserKeys::load(config_path)?.cypher();

        Ok(cypher.encrypt(&self.workspace_key, &plaintext)?.into())
    }
}

impl DecryptArgs {
    pub(crate) fn run(self, config_path: Option<&Path>) -> CommandResult {
        let payload = String::from_utf8(read_input(self.input.as_deref())?)
            .wrap_err("Encrypted payload is not valid text")?;
        let cypher = UserKeys::load(config_path)?.cypher();

        match self.raw_output {
            Some(path) => {
                let data = cypher.decrypt(&self.workspace_key, &payload)?;
                std::fs::write(&path, &data)
                    .wrap_err_with(|| format!("vaultcli cannot write file '{}'", path.display()))?;
                info!(path = %path.display(), bytes = data.len(), "Wrote decrypted data");
                Ok(().into())
            }
            None => Ok(cypher
                .decrypt_to_string(&self.workspace_key, &payload)?
                .into()),
        }
    }
}

impl WorkspaceKeyCommand {
    pub(crate) fn run(self, config_path: Option<&Path>) -> CommandResult {
        match self {
            WorkspaceKeyCommand::New { size } => {
                let cypher = UserKeys::load(config_path)?.cypher();
                Ok(cypher.generate_wrapped_workspace_key(size)?.to_string().into())
            }
        }
    }
}

/// Read all of `path`, or stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> color_eyre::eyre::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .wrap_err_with(|| format!("vaultcli cannot read file '{}'", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
