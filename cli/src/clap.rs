use anstyle::{AnsiColor, Effects, Style};
use clap::{Arg, ArgAction, Command, builder::Styles};

pub const HEADER: Style = AnsiColor::Magenta.on_default().effects(Effects::BOLD);
pub const USAGE: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
pub const LITERAL: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
pub const PLACEHOLDER: Style = AnsiColor::Cyan.on_default();
pub const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
pub const VALID: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
pub const INVALID: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

pub fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help).action(ArgAction::Set)
}

pub fn flag(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).action(ArgAction::SetTrue)
}

pub const VOCABULARY_HEADING: &str = "Vocabulary options";

fn check() -> Command {
    Command::new("check")
        .about("Check that the tags of HTML documents are known and balanced")
        .arg(
            Arg::new("paths")
                .help("Documents or directories to check [default: document.default from tagstack.toml]")
                .num_args(0..)
                .action(ArgAction::Append),
        )
        .arg(
            opt("tags", "Newline-delimited list of recognized tag names")
                .value_name("FILE")
                .requires("self-closing")
                .help_heading(VOCABULARY_HEADING),
        )
        .arg(
            opt("self-closing", "Newline-delimited list of self-closing tag names")
                .value_name("FILE")
                .requires("tags")
                .help_heading(VOCABULARY_HEADING),
        )
        .arg(opt("doctype", "Literal the first line of every document must match").value_name("LINE"))
        .arg(flag("explain", "Print the offending source line for every failed check").short('e'))
}

pub fn cli() -> Command {
    let styles = {
        Styles::styled()
            .header(HEADER)
            .usage(USAGE)
            .literal(LITERAL)
            .placeholder(PLACEHOLDER)
            .error(ERROR)
            .valid(VALID)
            .invalid(INVALID)
    };

    Command::new("tagstack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validates the tag structure of HTML documents")
        .styles(styles)
        .subcommand(check())
        .arg(flag("verbose", "Use verbose output (-vv for trace output)").short('v').action(ArgAction::Count).global(true))
        .arg(flag("no-color", "Disable colored output").global(true))
        .arg(flag("time", "Prints the time taken to check all documents").short('t').global(true))
        .arg(flag("no-backtrace", "Do not print a backtrace on panic").global(true))
}
