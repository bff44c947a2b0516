use clap::ValueEnum;

use crate::{color::Color, command::Cli};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::upper_case_acronyms)]
pub(crate) enum Output {
    JSON,
    YAML,
    None,
}

pub(crate) enum CommandOutput {
    Plain(String),
    Object(Box<dyn erased_serde::Serialize>),
}
pub(crate) type CommandResult = color_eyre::eyre::Result<CommandOutput>;

impl From<&str> for CommandOutput {
    fn from(text: &str) -> Self {
        CommandOutput::Plain(text.to_owned())
    }
}
impl From<String> for CommandOutput {
    fn from(text: String) -> Self {
        CommandOutput::Plain(text)
    }
}
impl From<()> for CommandOutput {
    fn from(_: ()) -> Self {
        CommandOutput::Plain(String::new())
    }
}

impl CommandOutput {
    pub(crate) fn object<T: serde::Serialize + 'static>(value: T) -> Self {
        CommandOutput::Object(Box::new(value))
    }
}

pub(crate) struct RenderConfig {
    pub(crate) output: Output,
    pub(crate) color: Color,
    pub(crate) quiet: bool,
}

impl RenderConfig {
    pub(crate) fn new(cli: &Cli) -> Self {
        Self {
            output: cli.output,
            color: cli.color,
            quiet: cli.quiet,
        }
    }

    pub(crate) fn render_result(&self, result: CommandResult) -> color_eyre::eyre::Result<()> {
        if self.quiet || self.output == Output::None {
            return result.map(|_| ());
        }

        fn pretty_print(language: &str, data: &str, color: Color) -> color_eyre::eyre::Result<()> {
            if color.is_enabled() {
                bat::PrettyPrinter::new()
                    .input_from_bytes(data.as_bytes())
                    .language(language)
                    .print()?;
            } else {
                print!("{}", data);
            }
            Ok(())
        }

        match result {
            // Errors will be passed through to the caller, and rendered by the main function
            Err(e) => Err(e),

            // Commands that wrote their result somewhere else have nothing to print
            Ok(CommandOutput::Plain(text)) if text.is_empty() => Ok(()),

            Ok(CommandOutput::Plain(text)) => {
                println!("{}", text);
                Ok(())
            }

            // For objects, we serialize them based on the output format,
            Ok(CommandOutput::Object(obj)) => match self.output {
                Output::JSON => {
                    let mut json = serde_json::to_string_pretty(&*obj)?;
                    // Yaml serialization adds a newline at the end, so we do the same here
                    json.push('\n');
                    pretty_print("json", &json, self.color)
                }
                Output::YAML => {
                    let yaml = serde_yaml::to_string(&*obj)?;
                    pretty_print("yaml", &yaml, self.color)
                }
                Output::None => Ok(()),
            },
        }
    }
}
