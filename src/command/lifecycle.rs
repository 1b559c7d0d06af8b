//! The command lifecycle
//!
//! Every command goes through the same sequence in [`Command::validate_and_run`]:
//!
//! 1. scope validation, skipped when help was requested
//! 2. [`Command::initialize`]
//! 3. exactly one of help, JSON help, or [`Command::run`]
//!
//! Concrete commands implement [`Command::core`] and [`Command::run`]; the
//! rest has working defaults.

use anyhow::{Context, Result};

use crate::domain::{dasherize, Arguments, CommandDescription, CommandOption, CommandScope};

use super::context::CommandCore;
use super::error::{CommandError, ScopeViolation, SCOPE_VIOLATION_EXIT_CODE};

/// Name of the executable, as shown in usage lines
pub const TOOL_NAME: &str = "ng";

/// A runnable command
pub trait Command {
    /// Shared state set at construction
    fn core(&self) -> &CommandCore;

    /// The command's actual behavior; `None` means success
    fn run(&mut self, args: &Arguments) -> Result<Option<u8>>;

    fn description(&self) -> &CommandDescription {
        self.core().description()
    }

    /// Setup hook, called before help or run
    fn initialize(&mut self, _args: &Arguments) -> Result<()> {
        Ok(())
    }

    /// Checks that the command runs inside or outside a project as declared
    fn validate_scope(&self) -> Result<(), CommandError> {
        let core = self.core();
        let description = core.description();
        let workspace = core.workspace();

        let violation = match description.scope {
            CommandScope::Everywhere => None,
            CommandScope::OutOfProject => {
                workspace
                    .config_file()
                    .map(|file| ScopeViolation::OutsideRequired {
                        command: description.name.clone(),
                        config_file: file.to_path_buf(),
                    })
            }
            CommandScope::InProject => {
                let resolved = match workspace.config_file() {
                    Some(_) => core.context().resolver().get_workspace()?.is_some(),
                    None => false,
                };

                (!resolved).then(|| ScopeViolation::InsideRequired {
                    command: description.name.clone(),
                })
            }
        };

        match violation {
            Some(violation) => {
                core.logger().fatal(&violation.to_string());
                Err(CommandError::fatal(SCOPE_VIOLATION_EXIT_CODE))
            }
            None => Ok(()),
        }
    }

    /// Logs the description and the usage line
    fn print_help_usage(&self) {
        let logger = self.core().logger();
        let description = self.description();

        logger.info(&description.description);
        if let Some(long) = &description.long_description {
            logger.info(long);
        }
        logger.info(&usage_line(description));
        logger.info("");
    }

    /// Logs the argument and option listings
    fn print_help_options(&self, options: &[CommandOption]) {
        let logger = self.core().logger();
        let (args, mut opts): (Vec<&CommandOption>, Vec<&CommandOption>) =
            options.iter().partition(|o| o.is_positional());

        if !args.is_empty() {
            logger.info("arguments:");
            for arg in &args {
                logger.info(&format!("  {}", logger.highlight(&arg.name)));
                if let Some(description) = &arg.description {
                    logger.info(&indent_description(description));
                }
            }
        }

        if !options.is_empty() {
            if !args.is_empty() {
                logger.info("");
            }
            logger.info("options:");

            opts.retain(|o| !o.hidden);
            opts.sort_by(|a, b| a.name.cmp(&b.name));

            for opt in opts {
                let flag = logger.highlight(&format!("--{}", dasherize(&opt.name)));
                let line = if opt.aliases.is_empty() {
                    format!("  {}", flag)
                } else {
                    let aliases: Vec<String> =
                        opt.aliases.iter().map(|a| format!("-{}", a)).collect();
                    format!("  {} ({})", flag, aliases.join(" "))
                };
                logger.info(&line);

                if let Some(description) = &opt.description {
                    logger.info(&indent_description(description));
                }
            }
        }
    }

    /// Human-readable help
    fn print_help(&mut self, _args: &Arguments) -> Result<u8> {
        self.print_help_usage();
        self.print_help_options(&self.description().options);
        Ok(0)
    }

    /// Machine-readable help: the description as JSON
    fn print_json_help(&mut self, _args: &Arguments) -> Result<u8> {
        let json = serde_json::to_string_pretty(self.description())
            .context("Failed to serialize command description")?;
        self.core().logger().info(&json);
        Ok(0)
    }

    /// Validates, initializes, then prints help or runs
    fn validate_and_run(&mut self, args: &Arguments) -> Result<u8, CommandError> {
        if !args.wants_help() {
            self.validate_scope()?;
        }

        self.initialize(args)?;

        let code = if args.help {
            self.print_help(args)?
        } else if args.help_json {
            self.print_json_help(args)?
        } else {
            self.run(args)?.unwrap_or(0)
        };

        Ok(code)
    }
}

/// `usage: ng <name> <arg1> <arg2> [options]`
pub fn usage_line(description: &CommandDescription) -> String {
    let mut line = format!("usage: {} {}", TOOL_NAME, description.name);

    for arg in description.positionals() {
        line.push_str(&format!(" <{}>", arg.name));
    }

    if description.options.iter().any(|o| !o.is_positional()) {
        line.push_str(" [options]");
    }

    line
}

fn indent_description(description: &str) -> String {
    format!("    {}", description.replace('\n', "\n    "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{BufferedLogger, CommandContext, LogLevel, Logger};
    use crate::storage::{CommandWorkspace, LocalWorkspace, WorkspaceResolver};
    use proptest::prelude::*;
    use std::path::PathBuf;
    use std::rc::Rc;

    struct StubResolver(Option<LocalWorkspace>);

    impl WorkspaceResolver for StubResolver {
        fn get_workspace(&self) -> Result<Option<LocalWorkspace>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenResolver;

    impl WorkspaceResolver for BrokenResolver {
        fn get_workspace(&self) -> Result<Option<LocalWorkspace>> {
            anyhow::bail!("workspace file is corrupt")
        }
    }

    #[derive(Default)]
    struct Calls {
        initialize: usize,
        run: usize,
    }

    struct TestCommand {
        core: CommandCore,
        calls: Calls,
        result: Option<u8>,
        fail_initialize: bool,
    }

    impl Command for TestCommand {
        fn core(&self) -> &CommandCore {
            &self.core
        }

        fn initialize(&mut self, _args: &Arguments) -> Result<()> {
            self.calls.initialize += 1;
            if self.fail_initialize {
                anyhow::bail!("initialize failed");
            }
            Ok(())
        }

        fn run(&mut self, _args: &Arguments) -> Result<Option<u8>> {
            self.calls.run += 1;
            Ok(self.result)
        }
    }

    fn workspace(config_file: bool) -> CommandWorkspace {
        let file = config_file.then(|| PathBuf::from("/work/ng.toml"));
        CommandWorkspace::new("/work", file)
    }

    fn command_with(
        description: CommandDescription,
        workspace: CommandWorkspace,
        resolver: impl WorkspaceResolver + 'static,
    ) -> (TestCommand, Rc<BufferedLogger>) {
        let logger = Rc::new(BufferedLogger::new());
        let context = Rc::new(CommandContext::new(workspace, resolver));
        let core = CommandCore::new(context, description, logger.clone() as Rc<dyn Logger>);
        let command = TestCommand {
            core,
            calls: Calls::default(),
            result: None,
            fail_initialize: false,
        };
        (command, logger)
    }

    fn scoped(
        scope: CommandScope,
        config_file: bool,
        resolves: bool,
    ) -> (TestCommand, Rc<BufferedLogger>) {
        let resolved = resolves.then(|| LocalWorkspace::new("demo"));
        command_with(
            CommandDescription::new("mycmd", "Does things").scope(scope),
            workspace(config_file),
            StubResolver(resolved),
        )
    }

    fn help_description() -> CommandDescription {
        CommandDescription::new("mycmd", "Does things")
            .option(CommandOption::positional("first", 0).describe("The first thing"))
            .option(CommandOption::positional("second", 1))
            .option(CommandOption::switch("verbose").alias("v").describe("Print more"))
    }

    // =========================================================================
    // Scope validation
    // =========================================================================

    #[test]
    fn out_of_project_fails_inside_project() {
        let (command, logger) = scoped(CommandScope::OutOfProject, true, true);
        let err = command.validate_scope().unwrap_err();

        assert!(matches!(err, CommandError::FatalExit { code: 1 }));
        let fatal = logger.lines(LogLevel::Fatal);
        assert_eq!(fatal.len(), 1);
        assert!(fatal[0].contains("mycmd"));
        assert!(fatal[0].contains("outside of a project"));
        assert!(fatal[0].contains("/work/ng.toml"));
    }

    #[test]
    fn out_of_project_succeeds_outside_project() {
        let (command, logger) = scoped(CommandScope::OutOfProject, false, false);
        assert!(command.validate_scope().is_ok());
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn in_project_fails_without_config_file() {
        let (command, logger) = scoped(CommandScope::InProject, false, true);
        let err = command.validate_scope().unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert!(logger.lines(LogLevel::Fatal)[0].contains("in a project"));
    }

    #[test]
    fn in_project_fails_when_workspace_unresolved() {
        let (command, _logger) = scoped(CommandScope::InProject, true, false);
        assert!(matches!(
            command.validate_scope(),
            Err(CommandError::FatalExit { code: 1 })
        ));
    }

    #[test]
    fn in_project_succeeds_when_resolved() {
        let (command, _logger) = scoped(CommandScope::InProject, true, true);
        assert!(command.validate_scope().is_ok());
    }

    #[test]
    fn resolver_errors_are_not_fatal_exits() {
        let (command, logger) = command_with(
            CommandDescription::new("mycmd", "d").scope(CommandScope::InProject),
            workspace(true),
            BrokenResolver,
        );

        let err = command.validate_scope().unwrap_err();
        assert!(matches!(err, CommandError::Failed(_)));
        assert!(logger.lines(LogLevel::Fatal).is_empty());
    }

    proptest! {
        #[test]
        fn everywhere_always_succeeds(config_file: bool, resolves: bool) {
            let (command, logger) = scoped(CommandScope::Everywhere, config_file, resolves);
            prop_assert!(command.validate_scope().is_ok());
            prop_assert!(logger.entries().is_empty());
        }

        #[test]
        fn in_project_needs_both(config_file: bool, resolves: bool) {
            let (command, _logger) = scoped(CommandScope::InProject, config_file, resolves);
            prop_assert_eq!(command.validate_scope().is_ok(), config_file && resolves);
        }

        #[test]
        fn out_of_project_depends_only_on_config_file(config_file: bool, resolves: bool) {
            let (command, _logger) = scoped(CommandScope::OutOfProject, config_file, resolves);
            prop_assert_eq!(command.validate_scope().is_ok(), !config_file);
        }
    }

    // =========================================================================
    // Help rendering
    // =========================================================================

    #[test]
    fn usage_lists_positionals_then_options() {
        let (command, logger) =
            command_with(help_description(), workspace(false), StubResolver(None));
        command.print_help_usage();

        assert_eq!(
            logger.info_lines(),
            vec![
                "Does things",
                "usage: ng mycmd <first> <second> [options]",
                "",
            ]
        );
    }

    #[test]
    fn usage_omits_options_suffix_without_flags() {
        let description = CommandDescription::new("mycmd", "d")
            .option(CommandOption::positional("first", 0));
        assert_eq!(usage_line(&description), "usage: ng mycmd <first>");

        let bare = CommandDescription::new("mycmd", "d");
        assert_eq!(usage_line(&bare), "usage: ng mycmd");
    }

    #[test]
    fn usage_includes_long_description() {
        let description = CommandDescription::new("mycmd", "Short").long_description("Longer text");
        let (command, logger) = command_with(description, workspace(false), StubResolver(None));
        command.print_help_usage();

        assert_eq!(logger.info_lines()[..2], ["Short", "Longer text"]);
    }

    #[test]
    fn options_listing_full_layout() {
        let (command, logger) =
            command_with(help_description(), workspace(false), StubResolver(None));
        command.print_help_options(&command.description().options);

        assert_eq!(
            logger.info_lines(),
            vec![
                "arguments:",
                "  first",
                "    The first thing",
                "  second",
                "",
                "options:",
                "  --verbose (-v)",
                "    Print more",
            ]
        );
    }

    #[test]
    fn options_sorted_by_byte_order() {
        let options = vec![
            CommandOption::flag("verbose").alias("v"),
            CommandOption::flag("Zebra"),
            CommandOption::flag("apple"),
        ];
        let (command, logger) =
            command_with(CommandDescription::new("x", "d"), workspace(false), StubResolver(None));
        command.print_help_options(&options);

        assert_eq!(
            logger.info_lines(),
            vec!["options:", "  --zebra", "  --apple", "  --verbose (-v)"]
        );
    }

    #[test]
    fn hidden_options_never_listed() {
        let options = vec![
            CommandOption::flag("aaa").hide(),
            CommandOption::flag("middle"),
            CommandOption::flag("zzz").hide().describe("secret"),
        ];
        let (command, logger) =
            command_with(CommandDescription::new("x", "d"), workspace(false), StubResolver(None));
        command.print_help_options(&options);

        let text = logger.info_text();
        assert!(!text.contains("aaa"));
        assert!(!text.contains("zzz"));
        assert!(!text.contains("secret"));
        assert!(text.contains("--middle"));
    }

    #[test]
    fn option_names_are_dasherized_with_aliases() {
        let options = vec![CommandOption::switch("dryRun").alias("d").alias("n")];
        let (command, logger) =
            command_with(CommandDescription::new("x", "d"), workspace(false), StubResolver(None));
        command.print_help_options(&options);

        assert_eq!(logger.info_lines()[1], "  --dry-run (-d -n)");
    }

    #[test]
    fn multiline_descriptions_are_indented() {
        let options = vec![CommandOption::flag("style").describe("line one\nline two")];
        let (command, logger) =
            command_with(CommandDescription::new("x", "d"), workspace(false), StubResolver(None));
        command.print_help_options(&options);

        assert_eq!(logger.info_lines()[2], "    line one\n    line two");
    }

    #[test]
    fn no_options_prints_nothing() {
        let (command, logger) =
            command_with(CommandDescription::new("x", "d"), workspace(false), StubResolver(None));
        command.print_help_options(&[]);
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn json_help_round_trips() {
        let description = help_description()
            .scope(CommandScope::InProject)
            .option(CommandOption::flag("secret").hide());
        let (mut command, logger) =
            command_with(description.clone(), workspace(false), StubResolver(None));

        assert_eq!(command.print_json_help(&Arguments::help_json()).unwrap(), 0);

        let lines = logger.info_lines();
        assert_eq!(lines.len(), 1);
        let parsed: CommandDescription = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed, description);
    }

    // =========================================================================
    // validate_and_run
    // =========================================================================

    #[test]
    fn help_initializes_and_skips_run() {
        let (mut command, logger) = scoped(CommandScope::Everywhere, false, false);

        let code = command.validate_and_run(&Arguments::help()).unwrap();
        assert_eq!(code, 0);
        assert_eq!(command.calls.initialize, 1);
        assert_eq!(command.calls.run, 0);
        assert_eq!(logger.info_lines()[0], "Does things");
    }

    #[test]
    fn help_skips_scope_validation() {
        let (mut command, logger) = scoped(CommandScope::InProject, false, false);

        assert_eq!(command.validate_and_run(&Arguments::help()).unwrap(), 0);
        assert!(logger.lines(LogLevel::Fatal).is_empty());
    }

    #[test]
    fn help_json_skips_scope_validation() {
        let (mut command, logger) = scoped(CommandScope::OutOfProject, true, true);

        assert_eq!(command.validate_and_run(&Arguments::help_json()).unwrap(), 0);
        assert!(logger.lines(LogLevel::Fatal).is_empty());
        assert_eq!(command.calls.run, 0);
        assert!(logger.info_lines()[0].starts_with('{'));
    }

    #[test]
    fn help_wins_over_help_json() {
        let (mut command, logger) = scoped(CommandScope::Everywhere, false, false);
        let mut args = Arguments::help();
        args.help_json = true;

        command.validate_and_run(&args).unwrap();
        assert_eq!(logger.info_lines()[0], "Does things");
    }

    #[test]
    fn run_result_defaults_to_zero() {
        let (mut command, _logger) = scoped(CommandScope::Everywhere, false, false);

        assert_eq!(command.validate_and_run(&Arguments::new()).unwrap(), 0);
        assert_eq!(command.calls.initialize, 1);
        assert_eq!(command.calls.run, 1);
    }

    #[test]
    fn run_result_is_returned() {
        let (mut command, _logger) = scoped(CommandScope::Everywhere, false, false);
        command.result = Some(3);

        assert_eq!(command.validate_and_run(&Arguments::new()).unwrap(), 3);
    }

    #[test]
    fn scope_violation_aborts_before_initialize() {
        let (mut command, _logger) = scoped(CommandScope::InProject, false, false);

        let err = command.validate_and_run(&Arguments::new()).unwrap_err();
        assert!(err.is_fatal_exit());
        assert_eq!(command.calls.initialize, 0);
        assert_eq!(command.calls.run, 0);
    }

    #[test]
    fn initialize_failure_propagates() {
        let (mut command, _logger) = scoped(CommandScope::Everywhere, false, false);
        command.fail_initialize = true;

        let err = command.validate_and_run(&Arguments::new()).unwrap_err();
        assert!(matches!(err, CommandError::Failed(_)));
        assert_eq!(err.to_string(), "initialize failed");
        assert_eq!(command.calls.run, 0);
    }
}
