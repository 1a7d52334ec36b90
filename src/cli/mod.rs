//! Command-line interface for checklist
//!
//! The CLI takes a single "command line" argument that is split on
//! whitespace, plus any trailing arguments, so both `checklist "add buy milk"`
//! and `checklist add buy milk` work. The first word names the command; an
//! unknown or missing command prints the help listing.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::config::{self, Config, DisplayConfig};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;

mod add;
mod list;
mod remove;
mod rename;
mod status;
mod tag;

/// checklist - a personal to-do list in a local JSON file
#[derive(Parser, Debug)]
#[command(name = "checklist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, env = "CHECKLIST_DIR")]
    pub dir: Option<PathBuf>,

    /// Config file (defaults to config.toml in the platform config dir)
    #[arg(long, env = "CHECKLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Command line, e.g. "add buy milk" or "list tagged home"
    pub line: Option<String>,

    /// Extra arguments appended after the command line's words
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Built-in commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    List,
    Check,
    Uncheck,
    Tag,
    Rename,
    Remove,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Add,
        Command::List,
        Command::Check,
        Command::Uncheck,
        Command::Tag,
        Command::Rename,
        Command::Remove,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::List => "list",
            Command::Check => "check",
            Command::Uncheck => "uncheck",
            Command::Tag => "tag",
            Command::Rename => "rename",
            Command::Remove => "remove",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.as_str() == name)
    }
}

/// Everything a command handler needs besides its arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub storage: Storage,
    pub display: DisplayConfig,
    pub output: OutputOptions,
}

/// Split the command line on whitespace and append the trailing arguments.
pub fn tokenize(line: Option<&str>, args: &[String]) -> Vec<String> {
    line.into_iter()
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .chain(args.iter().cloned())
        .collect()
}

impl Cli {
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }

    /// Name reported in error output: the command word after global flags.
    pub fn command_name(&self) -> String {
        tokenize(self.line.as_deref(), &self.args)
            .into_iter()
            .next()
            .unwrap_or_else(|| "checklist".to_string())
    }

    /// Execute the parsed command line
    pub fn run(self) -> Result<()> {
        let output = self.output_options();
        let tokens = tokenize(self.line.as_deref(), &self.args);

        let Some((command, args)) = tokens
            .split_first()
            .and_then(|(name, rest)| Command::from_name(name).map(|command| (command, rest)))
        else {
            tracing::debug!(tokens = ?tokens, "no known command, showing help");
            return help(output);
        };

        let context = self.context(output)?;
        tracing::debug!(
            command = command.as_str(),
            dir = %context.storage.dir().display(),
            "dispatching"
        );

        match command {
            Command::Add => add::run(&context, args),
            Command::List => list::run(&context, args),
            Command::Check => status::run(&context, args, true),
            Command::Uncheck => status::run(&context, args, false),
            Command::Tag => tag::run(&context, args),
            Command::Rename => rename::run(&context, args),
            Command::Remove => remove::run(&context, args),
        }
    }

    fn context(&self, output: OutputOptions) -> Result<Context> {
        let config_path = self.config.clone().or_else(config::default_config_path);
        let config = Config::load_or_default(config_path.as_deref())?;
        let dir = config.data_dir(self.dir.as_deref())?;
        let storage = Storage::new(dir).with_lock_timeout(config.storage.lock_timeout_ms);

        Ok(Context {
            storage,
            display: config.display,
            output,
        })
    }
}

#[derive(Serialize)]
struct HelpReport {
    commands: Vec<&'static str>,
}

/// Print the list of available commands.
pub fn help(output: OutputOptions) -> Result<()> {
    let commands: Vec<&'static str> = Command::ALL.iter().map(|c| c.as_str()).collect();

    let mut human = HumanOutput::new();
    human.push_line("");
    human.push_line("Available commands are:");
    human.push_line("");
    for name in &commands {
        human.push_line(format!("- {name}"));
    }

    emit_success(output, "help", &HelpReport { commands }, Some(&human))
}

/// Join title words with single spaces, rejecting a blank result.
pub(crate) fn join_title(words: &[String], command: &str) -> Result<String> {
    let title = words.join(" ");
    if title.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{command} requires a title")));
    }
    Ok(title)
}

/// First argument as a raw item id, or an error naming the command.
pub(crate) fn require_id<'a>(args: &'a [String], command: &str) -> Result<(&'a str, &'a [String])> {
    match args.split_first() {
        Some((id, rest)) => Ok((id.as_str(), rest)),
        None => Err(Error::InvalidArgument(format!("{command} requires an item id"))),
    }
}
