use camino::Utf8Path;
use clap::ArgMatches;
use colored::Colorize;
use glob::glob;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::time::Instant;
use tagstack_core::{
    TPath, TResult,
    context::{Checked, Context},
    fs::to_tpath,
};

/// Options of a `check` run that do not live in the config file.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    pub explain: bool,
    pub color: bool,
    pub time: bool,
}

impl CheckOptions {
    /// Reads the flags of the `check` subcommand, including the propagated globals.
    pub fn from_args(args: &ArgMatches) -> Self {
        Self {
            explain: args.get_flag("explain"),
            color: !args.get_flag("no-color"),
            time: args.get_flag("time"),
        }
    }
}

/// Returns whether every document passed.
///
/// Every document gets its own outcome: a document that cannot be read is
/// reported in place of its verdict and the remaining documents are still checked.
pub fn check_command(mut ctx: Context, args: &ArgMatches) -> TResult<bool> {
    let options = CheckOptions::from_args(args);
    apply_overrides(&mut ctx, args);

    let documents = collect_documents(&ctx, args)?;
    let vocabulary = ctx.vocabulary()?;
    debug!(
        "checking {} documents against {} tags and {} self-closing tags",
        documents.len(),
        vocabulary.tags().len(),
        vocabulary.self_closing().len()
    );

    let started = Instant::now();
    let results: Vec<TResult<Checked>> =
        documents.par_iter().map(|path| ctx.check_file(&vocabulary, path)).collect();

    let show_path = documents.len() > 1;
    let mut all_valid = true;

    for result in results {
        let checked = match result {
            Ok(checked) => checked,
            Err(err) => {
                all_valid = false;
                println!("{}", format!("{err:#}").red());
                continue;
            }
        };

        let line = checked.verdict.to_string();
        let line = if checked.verdict.is_valid() { line.green() } else { line.red() };
        if show_path {
            println!("{}: {line}", checked.path);
        } else {
            println!("{line}");
        }

        if !checked.verdict.is_valid() {
            all_valid = false;
            if options.explain {
                checked.explain(options.color)?;
            }
        }
    }

    if options.time {
        info!("checked {} documents in {:.2?}", documents.len(), started.elapsed());
    }

    Ok(all_valid)
}

fn apply_overrides(ctx: &mut Context, args: &ArgMatches) {
    let tags = args.get_one::<String>("tags").map(|p| ctx.resolve(Utf8Path::new(p)));
    let self_closing = args.get_one::<String>("self-closing").map(|p| ctx.resolve(Utf8Path::new(p)));
    let config = ctx.config_mut();

    if tags.is_some() {
        config.vocabulary.tags = tags;
        config.vocabulary.self_closing = self_closing;
    }

    if let Some(doctype) = args.get_one::<String>("doctype") {
        config.document.doctype.clone_from(doctype);
    }
}

/// Expands directories to the HTML documents below them. Paths that do not exist
/// are kept so they can be reported as missing.
fn collect_documents(ctx: &Context, args: &ArgMatches) -> TResult<Vec<TPath>> {
    let Some(paths) = args.get_many::<String>("paths") else {
        return Ok(vec![ctx.default_document().clone()]);
    };

    let mut documents = Vec::new();
    for path in paths {
        let path = ctx.resolve(Utf8Path::new(path));
        if !path.is_dir() {
            documents.push(path);
            continue;
        }

        let pattern = format!("{}/**/*.html", glob::Pattern::escape(path.as_str()));
        let mut found: Vec<TPath> =
            glob(&pattern)?.filter_map(Result::ok).filter_map(|p| to_tpath(p).ok()).collect();
        found.sort();

        if found.is_empty() {
            warn!("no .html documents found in {path}");
        }
        documents.extend(found);
    }

    Ok(documents)
}
