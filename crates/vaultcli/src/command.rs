use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    auth::AuthCommand,
    color::Color,
    key_management::{DecryptArgs, EncryptArgs, WorkspaceKeyCommand},
    platform::ConfigCommand,
    render::Output,
    vault::SecretCommand,
};

pub(crate) const CONFIG_ENV: &str = "VAULTCLI_CONFIG";

#[derive(Parser, Clone)]
#[command(name = "vaultcli", version, about = "Vaultier CLI", long_about = None)]
pub(crate) struct Cli {
    // Optional as a workaround for https://github.com/clap-rs/clap/issues/3572
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    #[arg(short = 'o', long, global = true, value_enum, default_value_t = Output::JSON)]
    pub(crate) output: Output,

    #[arg(short = 'c', long, global = true, value_enum, default_value_t = Color::Auto)]
    pub(crate) color: Color,

    #[arg(
        long,
        global = true,
        env = CONFIG_ENV,
        help = "Config file to use instead of ~/.config/vaultcli/vaultcli.toml."
    )]
    pub(crate) config: Option<PathBuf>,

    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Don't return anything to stdout."
    )]
    pub(crate) quiet: bool,
}

#[derive(Subcommand, Clone)]
pub(crate) enum Commands {
    #[command(long_about = "Encrypt stdin with a workspace key.")]
    Encrypt(EncryptArgs),

    #[command(long_about = "Decrypt a payload encrypted with a workspace key.")]
    Decrypt(DecryptArgs),

    #[command(long_about = "Manage workspace keys.")]
    WorkspaceKey {
        #[command(subcommand)]
        command: WorkspaceKeyCommand,
    },

    #[command(long_about = "Decrypt and encrypt secrets in the server format.")]
    Secret {
        #[command(subcommand)]
        command: SecretCommand,
    },

    #[command(long_about = "Authentication helpers.")]
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    #[command(long_about = "Configure CLI settings.")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    #[command(long_about = "Generate shell completions.")]
    Completion {
        #[arg(long, help = "The shell to generate completions for.")]
        shell: Option<clap_complete::Shell>,
    },
}
