use std::path::PathBuf;

use structopt::StructOpt;

use crate::log::{LevelFilter, LogConfig};

/// Collect console configuration into a struct.
pub fn from_args() -> anyhow::Result<ConsoleVars> {
    ConsoleVars::try_from(ConsoleVarsImpl::from_args())
}

/// Same as [`from_args`], but reads the arguments from an iterator instead of the process.
pub fn from_iter<I>(args: I) -> anyhow::Result<ConsoleVars>
where
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    ConsoleVars::try_from(ConsoleVarsImpl::from_iter_safe(args)?)
}

/// Console variables collect from console commands.
#[derive(Clone, Debug)]
pub struct ConsoleVars {
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl ConsoleVars {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            file: self.log_file.clone(),
        }
    }
}

impl TryFrom<ConsoleVarsImpl> for ConsoleVars {
    type Error = anyhow::Error;

    fn try_from(console_var: ConsoleVarsImpl) -> anyhow::Result<Self> {
        let level = match console_var.level.to_lowercase().trim() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            other => anyhow::bail!("Unknown log level `{other}`!"),
        };

        Ok(Self {
            level,
            log_file: console_var.log_file,
        })
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "mirror sandbox", about = "Walks reflected types at runtime.")]
struct ConsoleVarsImpl {
    /// log level (please choose from trace, debug, info, warn, error, off)
    #[structopt(short, long, default_value = "debug")]
    level: String,
    /// also write the log into this file
    #[structopt(long, parse(from_os_str))]
    log_file: Option<PathBuf>,
}
