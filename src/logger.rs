use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Disabled,
}

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

pub fn init(verbose: bool, target: LogTarget<'_>) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(default_filter(verbose));
    let mut builder = env_logger::Builder::from_env(env);

    match target {
        LogTarget::Stderr => {}
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogTarget::Disabled => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.init();
    Ok(())
}
