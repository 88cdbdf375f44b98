use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fern::colors::{Color, ColoredLevelConfig};

pub use glog::LevelFilter as LevelFilter;

lazy_static::lazy_static! {
    /// Chatty targets and the most verbose level they may log at.
    static ref QUIET_TARGETS: HashMap<&'static str, LevelFilter> = HashMap::from([
        ("mirror_reflect::descriptor::inheritance", LevelFilter::Warn),
    ]);
}

/// Log configuration.
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Also write every record into this file, truncated on start.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file: None,
        }
    }
}

/// Initialize log module.
pub fn init_log(config: LogConfig) -> anyhow::Result<()> {
    if let Some(parent) = config.file.as_deref().and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    setup_logger(&config)?;

    glog::trace!("log initialized!");
    Ok(())
}

/// The level of every quiet target, never more verbose than `base`.
fn quiet_target_levels(base: LevelFilter) -> impl Iterator<Item = (&'static str, LevelFilter)> {
    QUIET_TARGETS.iter().map(move |(target, max)| (*target, base.min(*max)))
}

fn setup_logger(config: &LogConfig) -> anyhow::Result<()> {
    // setup colors
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Magenta)
        .info(Color::Cyan)
        .warn(Color::Yellow)
        .error(Color::Red);

    // standard output dispatch, for trace, debug and info messages.
    let stdout = fern::Dispatch::new()
        .filter(|meta| meta.level() >= glog::Level::Info)
        .chain(std::io::stdout());

    // standard error dispatch, for warn and error messages.
    let stderr = fern::Dispatch::new()
        .level(LevelFilter::Warn)
        .chain(std::io::stderr());

    // console output with the colors
    let console_output = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                colors.color(record.level()),
                message
            ))
        })
        .chain(stdout)
        .chain(stderr);

    let mut dispatch = fern::Dispatch::new()
        .level(config.level) // setup base log level from user
        .chain(console_output);

    for (target, level) in quiet_target_levels(config.level) {
        dispatch = dispatch.level_for(target, level);
    }

    if let Some(path) = &config.file {
        let file_output = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}[{}][{}] {}",
                    chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                    record.target(),
                    record.level(),
                    message
                ))
            })
            .chain(std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?);

        dispatch = dispatch.chain(file_output);
    }

    // final apply to all the dispatches
    dispatch.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_targets_still_warn() {
        let levels = quiet_target_levels(LevelFilter::Trace).collect::<HashMap<_, _>>();
        assert_eq!(levels.get("mirror_reflect::descriptor::inheritance"), Some(&LevelFilter::Warn));

        let levels = quiet_target_levels(LevelFilter::Error).collect::<HashMap<_, _>>();
        assert_eq!(levels.get("mirror_reflect::descriptor::inheritance"), Some(&LevelFilter::Error));
    }
}
