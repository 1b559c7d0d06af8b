//! Argument parsing from command descriptions
//!
//! Builds a `clap` parser out of a [`CommandDescription`] so every option a
//! command declares can be given on the command line, and converts the
//! matches into [`Arguments`]. `--help` and `--help-json` are reserved on
//! every command, as are the global flags of the `ng` binary.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches};
use serde_json::Value;

use crate::domain::{dasherize, Arguments, CommandDescription, CommandOption, OptionType};

const HELP_ID: &str = "help";
const HELP_JSON_ID: &str = "helpJson";

/// Long flags no command option may claim
const RESERVED_LONGS: &[&str] = &["help", "help-json", "format", "verbose", "no-color"];

/// Short flags no command option may claim
const RESERVED_SHORTS: &[char] = &['h', 'f'];

/// Builds the parser for one command
pub fn build_parser(description: &CommandDescription) -> clap::Command {
    let mut cmd = clap::Command::new(description.name.clone())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new(HELP_ID)
                .long("help")
                .short('h')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(HELP_JSON_ID)
                .long("help-json")
                .action(ArgAction::SetTrue),
        );

    // clap wants contiguous indexes, so gaps in the declared ones collapse
    let mut positionals: Vec<&CommandOption> = description
        .positionals()
        .filter(|option| !is_reserved(option))
        .collect();
    positionals.sort_by_key(|option| option.positional);
    for (index, option) in positionals.into_iter().enumerate() {
        cmd = cmd.arg(positional_arg(option, index + 1));
    }

    for option in &description.options {
        if option.is_positional() || is_reserved(option) {
            continue;
        }
        cmd = cmd.arg(flag_arg(option));
    }

    cmd
}

/// Parses raw arguments (without the command name) for a command
pub fn parse_arguments(description: &CommandDescription, raw: &[String]) -> Result<Arguments> {
    let matches = build_parser(description)
        .try_get_matches_from(raw)
        .with_context(|| format!("Invalid arguments for '{}'", description.name))?;

    Ok(collect_arguments(description, &matches))
}

fn collect_arguments(description: &CommandDescription, matches: &ArgMatches) -> Arguments {
    let mut args = Arguments::new();
    args.help = matches.get_flag(HELP_ID);
    args.help_json = matches.get_flag(HELP_JSON_ID);

    for option in &description.options {
        if is_reserved(option) {
            continue;
        }

        let value = if option.is_positional() {
            matches
                .get_one::<String>(&option.name)
                .map(|s| Value::from(s.as_str()))
        } else {
            match option.option_type {
                OptionType::Boolean => matches.get_flag(&option.name).then_some(Value::Bool(true)),
                OptionType::Number => matches.get_one::<f64>(&option.name).map(|n| Value::from(*n)),
                OptionType::Array => matches.get_many::<String>(&option.name).map(|values| {
                    Value::Array(values.map(|s| Value::from(s.as_str())).collect())
                }),
                OptionType::String => matches
                    .get_one::<String>(&option.name)
                    .map(|s| Value::from(s.as_str())),
            }
        };

        match (value, &option.default) {
            (Some(value), _) => args.set(option.name.clone(), value),
            (None, Some(default)) => args.set(option.name.clone(), default.clone()),
            (None, None)
                if option.option_type == OptionType::Boolean && !option.is_positional() =>
            {
                args.set(option.name.clone(), false)
            }
            (None, None) => {}
        }
    }

    args
}

fn positional_arg(option: &CommandOption, index: usize) -> Arg {
    Arg::new(option.name.clone())
        .index(index)
        .required(false)
        .action(ArgAction::Set)
        .hide(option.hidden)
}

fn flag_arg(option: &CommandOption) -> Arg {
    let long = dasherize(&option.name);
    let mut arg = Arg::new(option.name.clone())
        .long(long.clone())
        .hide(option.hidden);

    if long != option.name {
        arg = arg.alias(option.name.clone());
    }

    for alias in &option.aliases {
        let mut chars = alias.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if RESERVED_SHORTS.contains(&c) => {}
            (Some(c), None) => arg = arg.short_alias(c),
            _ if RESERVED_LONGS.contains(&alias.as_str()) => {}
            _ => arg = arg.alias(alias.clone()),
        }
    }

    match option.option_type {
        OptionType::Boolean => arg.action(ArgAction::SetTrue),
        OptionType::Number => arg
            .action(ArgAction::Set)
            .value_parser(clap::value_parser!(f64)),
        OptionType::Array => arg.action(ArgAction::Append),
        OptionType::String => arg.action(ArgAction::Set),
    }
}

/// Options the parser never registers because their name is taken
fn is_reserved(option: &CommandOption) -> bool {
    if option.name == HELP_ID || option.name == HELP_JSON_ID {
        return true;
    }
    !option.is_positional() && RESERVED_LONGS.contains(&dasherize(&option.name).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description() -> CommandDescription {
        CommandDescription::new("new", "Creates a workspace")
            .option(CommandOption::positional("name", 0))
            .option(CommandOption::flag("directory"))
            .option(CommandOption::switch("dryRun").alias("d"))
            .option(CommandOption::flag("port").of_type(OptionType::Number).with_default(4200))
            .option(CommandOption::flag("tag").of_type(OptionType::Array))
    }

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn parse(raw: &[&str]) -> Result<Arguments> {
        parse_arguments(&description(), &strings(raw))
    }

    #[test]
    fn empty_arguments() {
        let args = parse(&[]).unwrap();
        assert!(!args.help);
        assert!(!args.help_json);
        assert!(!args.get_bool("dryRun"));
        assert!(args.get_str("name").is_none());
        assert_eq!(args.get("port"), Some(&Value::from(4200)));
    }

    #[test]
    fn reserved_help_flags() {
        assert!(parse(&["--help"]).unwrap().help);
        assert!(parse(&["-h"]).unwrap().help);
        assert!(parse(&["--help-json"]).unwrap().help_json);
    }

    #[test]
    fn positionals_and_flags() {
        let args = parse(&["demo", "--directory", "out", "-d", "--port", "8080"]).unwrap();

        assert_eq!(args.get_str("name"), Some("demo"));
        assert_eq!(args.get_str("directory"), Some("out"));
        assert!(args.get_bool("dryRun"));
        assert_eq!(args.get("port").and_then(Value::as_f64), Some(8080.0));
    }

    #[test]
    fn positionals_follow_declared_index() {
        let description = CommandDescription::new("copy", "Copies")
            .option(CommandOption::positional("second", 1))
            .option(CommandOption::positional("first", 0));

        let args = parse_arguments(&description, &strings(&["A", "B"])).unwrap();

        assert_eq!(args.get_str("first"), Some("A"));
        assert_eq!(args.get_str("second"), Some("B"));
    }

    #[test]
    fn sparse_positional_indexes_keep_their_order() {
        let description = CommandDescription::new("copy", "Copies")
            .option(CommandOption::positional("last", 7))
            .option(CommandOption::positional("first", 2));

        let args = parse_arguments(&description, &strings(&["A", "B"])).unwrap();

        assert_eq!(args.get_str("first"), Some("A"));
        assert_eq!(args.get_str("last"), Some("B"));
    }

    #[test]
    fn reserved_help_flags_win_over_aliases() {
        let description = CommandDescription::new("serve", "Serves")
            .option(CommandOption::switch("host").alias("h").alias("help-json"))
            .option(CommandOption::flag("file").alias("f"));

        let args = parse_arguments(&description, &strings(&["-h"])).unwrap();
        assert!(args.help);
        assert!(!args.get_bool("host"));

        let args = parse_arguments(&description, &strings(&["--help-json"])).unwrap();
        assert!(args.help_json);
        assert!(!args.get_bool("host"));

        let args = parse_arguments(&description, &strings(&["--host"])).unwrap();
        assert!(args.get_bool("host"));

        assert!(parse_arguments(&description, &strings(&["-f", "x"])).is_err());
    }

    #[test]
    fn options_named_like_global_flags_are_skipped() {
        let description = CommandDescription::new("serve", "Serves")
            .option(CommandOption::switch("verbose"))
            .option(CommandOption::flag("noColor"))
            .option(CommandOption::flag("help"));

        let cmd = build_parser(&description);
        let ids: Vec<&str> = cmd.get_arguments().map(|arg| arg.get_id().as_str()).collect();
        assert_eq!(ids, vec![HELP_ID, HELP_JSON_ID]);

        let args = parse_arguments(&description, &strings(&[])).unwrap();
        assert_eq!(args.get("verbose"), None);
    }

    #[test]
    fn dasherized_and_camel_case_longs() {
        assert!(parse(&["--dry-run"]).unwrap().get_bool("dryRun"));
        assert!(parse(&["--dryRun"]).unwrap().get_bool("dryRun"));
    }

    #[test]
    fn array_options_append() {
        let args = parse(&["--tag", "a", "--tag", "b"]).unwrap();
        assert_eq!(args.get("tag"), Some(&serde_json::json!(["a", "b"])));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = parse(&["--nope"]).unwrap_err();
        assert!(err.to_string().contains("Invalid arguments for 'new'"));
    }

    #[test]
    fn invalid_number_is_an_error() {
        assert!(parse(&["--port", "abc"]).is_err());
    }
}
