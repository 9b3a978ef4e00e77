use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use tagstack_core::TResult;

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Log lines go to stderr, stdout is reserved for verdicts.
pub fn init_logger(level: LevelFilter) -> TResult<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    Ok(Dispatch::new()
        .format(move |out, message, record| {
            let colored_level = colors.color(record.level()).to_string().to_ascii_lowercase();

            out.finish(format_args!("{colored_level} {message}"))
        })
        .level(LevelFilter::Warn)
        .level_for("tagstack", level)
        .level_for("tagstack_core", level)
        .chain(std::io::stderr())
        .apply()?)
}
