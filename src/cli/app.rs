//! Main CLI application structure

use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand, ValueEnum};

use super::args::parse_arguments;
use super::output::{Output, OutputFormat};
use super::registry::{CommandRegistry, RegistryError};
use crate::command::{CommandContext, CommandError};
use crate::storage::{CommandWorkspace, Config, FsWorkspaceResolver};

#[derive(Parser)]
#[command(name = "ng")]
#[command(author, version, about = "Project workspace CLI")]
#[command(disable_help_subcommand = true, allow_external_subcommands = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable colored help output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub invocation: Option<Invocation>,
}

/// Registered commands are resolved at runtime, so clap passes them through raw
#[derive(Subcommand, Debug, PartialEq)]
pub enum Invocation {
    #[command(external_subcommand)]
    Command(Vec<String>),
}

impl Cli {
    /// Command name, defaulting to `help`
    pub fn command_name(&self) -> &str {
        match &self.invocation {
            Some(Invocation::Command(raw)) => raw.first().map(String::as_str).unwrap_or("help"),
            None => "help",
        }
    }

    /// Arguments after the command name, including --help and --help-json
    pub fn command_args(&self) -> &[String] {
        match &self.invocation {
            Some(Invocation::Command(raw)) if !raw.is_empty() => &raw[1..],
            _ => &[],
        }
    }

    /// Applies global flags given after the command name
    ///
    /// clap hands external subcommands their arguments untouched, so
    /// `ng status --format json` arrives here with the flag still in the
    /// command's arguments. Everything after `--` is left alone.
    pub fn lift_global_args(&mut self) -> Result<(), String> {
        let Some(Invocation::Command(raw)) = &mut self.invocation else {
            return Ok(());
        };

        let mut args = std::mem::take(raw).into_iter();
        let mut kept: Vec<String> = args.next().into_iter().collect();

        while let Some(arg) = args.next() {
            if arg == "--" {
                kept.push(arg);
                kept.extend(args.by_ref());
            } else if arg == "--verbose" {
                self.verbose = true;
            } else if arg == "--no-color" {
                self.no_color = true;
            } else if arg == "--format" || arg == "-f" {
                let value = args
                    .next()
                    .ok_or_else(|| format!("a value is required for '{}'", arg))?;
                self.format = Some(parse_format(&value)?);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                self.format = Some(parse_format(value)?);
            } else {
                kept.push(arg);
            }
        }

        *raw = kept;
        Ok(())
    }
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(value, true).map_err(|_| format!("invalid output format '{}'", value))
}

/// Main entry point for the CLI
pub fn run() -> ExitCode {
    let mut cli = Cli::parse();
    if let Err(message) = cli.lift_global_args() {
        Output::new(cli.format.unwrap_or_default(), cli.verbose, false).error(&message);
        return ExitCode::FAILURE;
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            let output = Output::new(cli.format.unwrap_or_default(), cli.verbose, false);
            output.error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    let format = cli.format.unwrap_or(config.global.default_format);
    let color = config.global.color && !cli.no_color && !no_color_env();
    let output = Rc::new(Output::new(format, cli.verbose, color));

    output.verbose("ng starting");
    if let Some(dir) = &config.global_dir {
        output.verbose_ctx("config", &format!("Global config in {}", dir.display()));
    }
    let registry = CommandRegistry::builtin();

    match dispatch(&cli, &registry, output.clone()) {
        Ok(code) => {
            output.verbose_ctx("exit", &format!("Command finished with code {}", code));
            ExitCode::from(code)
        }
        Err(CommandError::FatalExit { code }) => {
            // The reason was logged by the command itself
            output.verbose_ctx("exit", &format!("Fatal exit with code {}", code));
            ExitCode::from(code)
        }
        Err(CommandError::Failed(e)) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Resolves the command, builds its context and runs its lifecycle
pub fn dispatch(
    cli: &Cli,
    registry: &CommandRegistry,
    output: Rc<Output>,
) -> Result<u8, CommandError> {
    let name = cli.command_name();
    let description = registry
        .find(name)
        .ok_or_else(|| RegistryError::Unknown(name.to_string()))?;

    let args = parse_arguments(description, cli.command_args())?;
    output.verbose_ctx(name, &format!("help={} help_json={}", args.help, args.help_json));

    let workspace = CommandWorkspace::current()?;
    match workspace.config_file() {
        Some(file) => output.verbose_ctx("workspace", &format!("Found {}", file.display())),
        None => output.verbose_ctx("workspace", "Not inside a workspace"),
    }

    let resolver = FsWorkspaceResolver::for_workspace(&workspace);
    let context = Rc::new(CommandContext::new(workspace, resolver));

    let mut command = registry.instantiate(name, context, output)?;
    command.validate_and_run(&args)
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut cli = Cli::try_parse_from(args).unwrap();
        cli.lift_global_args().unwrap();
        cli
    }

    #[test]
    fn parses_globals_before_command() {
        let cli = parse(&["ng", "--verbose", "--format", "json", "new", "demo", "-d"]);

        assert!(cli.verbose);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.command_name(), "new");
        assert_eq!(cli.command_args(), ["demo", "-d"]);
    }

    #[test]
    fn command_flags_are_forwarded() {
        let cli = Cli::try_parse_from(["ng", "status", "--help-json"]).unwrap();
        assert_eq!(cli.command_name(), "status");
        assert_eq!(cli.command_args(), ["--help-json"]);

        let cli = Cli::try_parse_from(["ng", "new", "--help"]).unwrap();
        assert_eq!(cli.command_args(), ["--help"]);

        let cli = Cli::try_parse_from(["ng", "help"]).unwrap();
        assert_eq!(cli.command_name(), "help");
    }

    #[test]
    fn globals_after_command_are_applied() {
        let cli = parse(&["ng", "status", "--format", "json", "--verbose"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.verbose);
        assert_eq!(cli.command_name(), "status");
        assert!(cli.command_args().is_empty());

        let cli = parse(&["ng", "new", "demo", "-f", "json", "--no-color", "-d"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.no_color);
        assert_eq!(cli.command_args(), ["demo", "-d"]);

        let cli = parse(&["ng", "version", "--format=json"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.command_args().is_empty());
    }

    #[test]
    fn arguments_after_double_dash_are_kept() {
        let cli = parse(&["ng", "new", "--", "--verbose"]);
        assert!(!cli.verbose);
        assert_eq!(cli.command_args(), ["--", "--verbose"]);
    }

    #[test]
    fn bad_global_after_command_is_reported() {
        let mut cli = Cli::try_parse_from(["ng", "status", "--format", "yaml"]).unwrap();
        assert!(cli.lift_global_args().unwrap_err().contains("yaml"));

        let mut cli = Cli::try_parse_from(["ng", "status", "--format"]).unwrap();
        assert!(cli.lift_global_args().is_err());
    }

    #[test]
    fn command_is_optional() {
        let cli = Cli::try_parse_from(["ng"]).unwrap();
        assert!(cli.invocation.is_none());
        assert_eq!(cli.command_name(), "help");
        assert!(cli.command_args().is_empty());
    }

    #[test]
    fn unknown_command_fails() {
        let cli = parse(&["ng", "frobnicate"]);
        let output = Rc::new(Output::new(OutputFormat::Text, false, false));

        let err = dispatch(&cli, &CommandRegistry::builtin(), output).unwrap_err();
        assert!(!err.is_fatal_exit());
        assert!(err.to_string().contains("\"frobnicate\""));
    }
}
