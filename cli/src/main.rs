use crate::clap::cli;
use crate::commands::check::check_command;
use crate::logger::{init_logger, level_for};
use crate::panic::setup_panic_handler;
use anyhow::bail;
use ::clap::ArgMatches;
use std::env;
use std::process::ExitCode;
use tagstack_core::TResult;
use tagstack_core::context::Context;
use tagstack_core::fs::to_tpath;

mod clap;
mod commands;
mod logger;
mod panic;

fn main() -> TResult<ExitCode> {
    let args = cli().try_get_matches().unwrap_or_else(|err| err.exit());

    let color = !args.get_flag("no-color");
    if !color {
        colored::control::set_override(false);
    }
    init_logger(level_for(args.get_count("verbose")))?;
    setup_panic_handler(args.get_flag("no-backtrace"));

    let Some((cmd, matches)) = args.subcommand() else {
        cli().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let cwd = to_tpath(env::current_dir()?)?;
    let context = Context::new(&cwd)?;

    let passed = execute(context, cmd, matches)?;
    Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

pub fn execute(ctx: Context, name: &str, matches: &ArgMatches) -> TResult<bool> {
    match name {
        "check" => check_command(ctx, matches),
        _ => bail!("Unknown command: {name}"),
    }
}
