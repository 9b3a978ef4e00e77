use colored::Colorize;
use std::panic::PanicHookInfo;
use sysinfo::System;
use terminal_size::{Width, terminal_size};

const SYSTEM_PATH_PATTERNS: &[&str] =
    &["/rustc/", "/std/", "\\std\\", "/core/", "\\core\\", "/alloc/", "\\alloc\\", "/backtrace/"];

const SYSTEM_FUNCTION_PATTERNS: &[&str] =
    &["std::", "core::", "alloc::", "backtrace::", "__rust", "__scrt_common_main", "call_once"];

pub fn setup_panic_handler(no_backtrace: bool) {
    std::panic::set_hook(Box::new(move |info| {
        let width = terminal_size().map_or(80, |(Width(w), _)| w as usize);
        let divider = "━".repeat(width).bright_red();
        let title = format!("{:^width$}", " tagstack crashed ", width = width).bright_red().bold();

        let mut text = format!(
            "{divider}\n{title}\n\n{}\n\n{}\n",
            system_info(info),
            panic_message(info).bright_red().bold()
        );

        if !no_backtrace {
            text.push_str(&format_backtrace());
        }
        text.push_str(&format!("{divider}\n"));

        eprint!("{text}");
    }))
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    match (info.payload().downcast_ref::<&str>(), info.payload().downcast_ref::<String>()) {
        (Some(s), _) => (*s).to_string(),
        (_, Some(s)) => s.clone(),
        (None, None) => "unknown error".into(),
    }
}

fn system_info(info: &PanicHookInfo<'_>) -> String {
    let location = info
        .location()
        .map_or_else(String::new, |loc| format!("{}:{}", loc.file(), loc.line()))
        .replace('\\', "/");

    let mut lines = vec![
        format!("VERSION: {}", env!("CARGO_PKG_VERSION")),
        format!(
            "SYSTEM: {} {} {}",
            System::name().unwrap_or_else(|| "unknown".to_string()),
            System::cpu_arch(),
            System::os_version().unwrap_or_else(|| "unknown".to_string())
        ),
    ];

    if let Ok(cwd) = std::env::current_dir() {
        lines.push(format!("WORKING DIR: {}", cwd.display()));
    }
    lines.push(format!("LOCATION: {location}"));

    lines.iter().map(|l| l.dimmed().to_string()).collect::<Vec<_>>().join("\n")
}

fn is_system_frame(name: &str, file: &str) -> bool {
    SYSTEM_FUNCTION_PATTERNS.iter().any(|p| name.contains(p))
        || SYSTEM_PATH_PATTERNS.iter().any(|p| file.contains(p))
}

/// Frames from the standard library and the backtrace machinery are collapsed
/// into a single line per run.
fn format_backtrace() -> String {
    let mut out = String::new();
    let mut collapsed = 0;

    let flush = |out: &mut String, collapsed: &mut usize| {
        if *collapsed > 0 {
            let note = format!("... collapsed {collapsed} lines from system code ...");
            out.push_str(&format!("  {}\n", note.bright_magenta().italic()));
            *collapsed = 0;
        }
    };

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            let name = symbol.name().map_or_else(|| "<unknown>".to_string(), |n| n.to_string());
            let file = symbol.filename().and_then(|f| f.to_str()).unwrap_or("").replace('\\', "/");

            if is_system_frame(&name, &file) || name == "main" {
                collapsed += 1;
                return;
            }

            flush(&mut out, &mut collapsed);
            let line = symbol.lineno().unwrap_or(0);
            out.push_str(&format!("  {} at {} ({file}:{line})\n", "→".bright_green(), name.cyan()));
        });
        true
    });
    flush(&mut out, &mut collapsed);

    out
}
