#![doc = include_str!("../README.md")]

use std::path::Path;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use color_eyre::eyre::Result;
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter,
};

use crate::{color::install_color_eyre, command::*, render::CommandResult};

mod auth;
mod color;
mod command;
mod key_management;
mod platform;
mod render;
mod vault;

fn main() -> Result<()> {
    // the log level hierarchy is determined by:
    //    - if RUST_LOG is detected at runtime
    //    - if RUST_LOG is provided at compile time
    //    - default to INFO
    let filter = EnvFilter::builder()
        .with_default_directive(option_env!("RUST_LOG").unwrap_or("info").parse()?)
        // parse directives from the RUST_LOG environment variable,
        // overriding the default directive for matching targets.
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    install_color_eyre(cli.color)?;
    let render_config = render::RenderConfig::new(&cli);

    let Some(command) = cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()?;
        return Ok(());
    };

    let result = process_commands(command, cli.config.as_deref());

    // Render the result of the command
    render_config.render_result(result)
}

fn process_commands(command: Commands, config: Option<&Path>) -> CommandResult {
    match command {
        // Crypto commands
        Commands::Encrypt(args) => args.run(config),
        Commands::Decrypt(args) => args.run(config),
        Commands::WorkspaceKey { command } => command.run(config),

        // Vault commands
        Commands::Secret { command } => command.run(config),

        // Auth commands
        Commands::Auth { command } => command.run(config),

        // Platform commands
        Commands::Config { command } => command.run(config),

        Commands::Completion { shell } => {
            let Some(shell) = shell.or_else(Shell::from_env) else {
                return Ok(
                    "Couldn't autodetect a valid shell. Run `vaultcli completion --help` for more info."
                        .into(),
                );
            };

            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(().into())
        }
    }
}
