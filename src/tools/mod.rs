pub mod blender;
pub mod mineways;

use crate::config::Config;
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::fmt;
use std::process::{Child, Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Mineways,
    Blender,
}

impl Tool {
    pub fn config_key(self) -> &'static str {
        match self {
            Tool::Mineways => "mineways-cmd",
            Tool::Blender => "blender-cmd",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Tool::Mineways => "--mineways-cmd",
            Tool::Blender => "--blender-cmd",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tool::Mineways => "Mineways",
            Tool::Blender => "Blender",
        })
    }
}

/// A tool command split into the program and the arguments that precede ours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// `None` for a blank command.
    pub fn parse(command: &str) -> Option<Self> {
        let mut words = split_words(command).into_iter();
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// Splits on whitespace; single or double quotes group words containing spaces.
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in s.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// Commands given at the call site; these win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCommands {
    pub mineways: Option<String>,
    pub blender: Option<String>,
}

impl ToolCommands {
    fn get(&self, tool: Tool) -> Option<&str> {
        let value = match tool {
            Tool::Mineways => self.mineways.as_deref(),
            Tool::Blender => self.blender.as_deref(),
        };
        value.filter(|cmd| !cmd.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Argument,
    Config,
}

/// Everything needed to launch the external tools for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Tools {
    overrides: ToolCommands,
    config: Config,
    verbose: bool,
}

impl Tools {
    pub fn new(overrides: ToolCommands, config: Config) -> Self {
        Self {
            overrides,
            config,
            verbose: false,
        }
    }

    /// Pass the tools' own output through instead of discarding it.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The command that would launch `tool`, and where it was set.
    pub fn command_source(&self, tool: Tool) -> Option<(CommandSource, &str)> {
        match self.overrides.get(tool) {
            Some(cmd) => Some((CommandSource::Argument, cmd)),
            None => self
                .config
                .load_command(tool)
                .map(|cmd| (CommandSource::Config, cmd)),
        }
    }

    pub fn command(&self, tool: Tool) -> Result<CommandLine> {
        self.command_source(tool)
            .and_then(|(_, cmd)| CommandLine::parse(cmd))
            .ok_or(Error::CommandNotSet(tool))
    }

    pub fn world_error_markers(&self) -> Vec<&str> {
        match &self.config.world_error_markers {
            Some(markers) => markers.iter().map(String::as_str).collect(),
            None => mineways::WORLD_ERROR_MARKERS.to_vec(),
        }
    }

    pub(crate) fn spawn<I, S>(&self, tool: Tool, command: &CommandLine, args: I) -> Result<Child>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut process = command.to_command();
        process.args(args).stdin(Stdio::null());
        if self.verbose {
            process.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            process.stdout(Stdio::null()).stderr(Stdio::null());
        }

        log::info!("Launching {tool}: {process:?}");
        process.spawn().map_err(|source| Error::Launch { tool, source })
    }
}
