use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Sets up a global logger that prints to stderr, each line prefixed with `c `
/// so that the output also is a sequence of valid PACE comments. Calling it more
/// than once has no effect.
pub fn build_pace_logger_for_level(level: LevelFilter) {
    let _ = Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "c {:<5} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

/// Same as [`build_pace_logger_for_level`], with `base` raised by one level per
/// `verbosity` (e.g. `-vv` turns `Warn` into `Debug`)
pub fn build_pace_logger_for_verbosity(base: LevelFilter, verbosity: usize) {
    build_pace_logger_for_level(raise_level(base, verbosity));
}

fn raise_level(base: LevelFilter, verbosity: usize) -> LevelFilter {
    LevelFilter::iter()
        .skip_while(|&level| level != base)
        .nth(verbosity)
        .unwrap_or(LevelFilter::Trace)
}
