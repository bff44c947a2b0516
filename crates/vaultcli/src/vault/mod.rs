use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use color_eyre::eyre::WrapErr;
use tracing::info;
use vaultcli_crypto::{DataCypher, SaltedEnvelope, WrappedWorkspaceKey};
use vaultcli_vault::{Secret, SecretView};

use crate::{
    key_management::{read_input, UserKeys},
    render::{CommandOutput, CommandResult},
};

#[derive(Subcommand, Clone)]
pub(crate) enum SecretCommand {
    #[command(long_about = "Decrypt a secret as returned by the server, read from stdin.")]
    Decrypt(SecretArgs),

    #[command(long_about = "Encrypt a decrypted secret, read from stdin, for upload.")]
    Encrypt(SecretArgs),

    #[command(long_about = "Decrypt the file attached to a secret.")]
    File(FileArgs),
}

#[derive(Args, Clone)]
pub(crate) struct SecretArgs {
    #[arg(long, help = "Wrapped workspace key, as stored in the workspace membership.")]
    pub(crate) workspace_key: WrappedWorkspaceKey,

    #[arg(long, help = "Read the secret JSON from this file instead of stdin.")]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub(crate) struct FileArgs {
    #[arg(long, help = "Wrapped workspace key, as stored in the workspace membership.")]
    pub(crate) workspace_key: WrappedWorkspaceKey,

    #[arg(long, help = "The secret JSON holding the encrypted file metadata.")]
    pub(crate) secret: PathBuf,

    #[arg(long, help = "Read the encrypted blob data from this file instead of stdin.")]
    pub(crate) input: Option<PathBuf>,

    #[arg(long, help = "Where to write the file, defaults to its original name.")]
    pub(crate) output: Option<PathBuf>,
}

impl SecretCommand {
    pub(crate) fn run(self, config_path: Option<&Path>) -> CommandResult {
        match self {
            SecretCommand::Decrypt(args) => {
                let secret: Secret = serde_json::from_slice(&read_input(args.input.as_deref())?)
                    .wrap_err("Input is not a valid secret")?;
                let cypher = UserKeys::load(config_path)?.cypher();

                Ok(CommandOutput::object(
                    secret.decrypt(&cypher, &args.workspace_key)?,
                ))
            }
            SecretCommand::Encrypt(args) => {
                let view: SecretView = serde_json::from_slice(&read_input(args.input.as_deref())?)
                    .wrap_err("Input is not a valid secret")?;
                let cypher = UserKeys::load(config_path)?.cypher();

                Ok(CommandOutput::object(
                    view.encrypt(&cypher, &args.workspace_key)?,
                ))
            }
            SecretCommand::File(args) => args.run(config_path),
        }
    }
}

impl FileArgs {
    fn run(self, config_path: Option<&Path>) -> CommandResult {
        let secret: Secret = serde_json::from_slice(&read_input(Some(self.secret.as_path()))?)
            .wrap_err("Input is not a valid secret")?;
        let blob_data: SaltedEnvelope = String::from_utf8(read_input(self.input.as_deref())?)
            .wrap_err("Encrypted blob is not valid text")?
            .parse()?;

        let cypher = UserKeys::load(config_path)?.cypher();
        let key = DataCypher::from_workspace_key(&cypher.unwrap_workspace_key(&self.workspace_key)?);
        let file = secret.decrypt_file(&blob_data, &key)?;

        let path = self
            .output
            .unwrap_or_else(|| PathBuf::from(sanitize_file_name(&file.meta.filename)));
        std::fs::write(&path, &file.data)
            .wrap_err_with(|| format!("vaultcli cannot write file '{}'", path.display()))?;
        info!(path = %path.display(), bytes = file.data.len(), "Wrote secret file");

        Ok(CommandOutput::object(file.meta))
    }
}

/// Keep only the last component of a server provided name.
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "secret.bin".to_owned())
}
