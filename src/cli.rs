//! Command line options shared by the demo binaries.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::DemoConfig;
use crate::demo::{self, Demo, RunSummary};
use crate::error::Result;
use crate::script::InputScript;

#[derive(Parser, Debug, Default, Clone)]
#[command(version, about, long_about = None)]
pub struct DemoArgs {
    /// TOML configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate, overrides the config
    #[arg(long, short)]
    pub frames: Option<usize>,

    /// Directory the frames are written to, overrides the config
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Write every n-th frame, 0 disables rendering; overrides the config
    #[arg(long, short)]
    pub render_every: Option<usize>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short)]
    pub verbose: bool,
}

impl DemoArgs {
    pub fn init_logging(&self) {
        let default = if self.verbose { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()),
            )
            .init();
    }

    /// The config file, or the defaults, with the command line overrides applied
    pub fn load_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!(path = %path.display(), "loading config");
                DemoConfig::load(path)?
            }
            None => DemoConfig::default(),
        };
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(render_every) = self.render_every {
            config.render_every = render_every;
        }
        Ok(config)
    }
}

/// Run a demo with the script from its config and log where the frames went
pub fn run_with_config<D: Demo + ?Sized>(demo: &mut D, config: &DemoConfig) -> Result<RunSummary> {
    let script = InputScript::new(config.script.clone());
    let summary = demo::run(demo, config, &script)?;
    if let Some(last) = summary.written.last() {
        info!(count = summary.written.len(), last = %last.display(), "frames written");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply() {
        let args = DemoArgs::parse_from(["bezier_curve", "--frames", "7", "-o", "out", "--render-every", "0", "-v"]);
        assert!(args.verbose);
        let config = args.load_config().unwrap();
        assert_eq!(config.frames, 7);
        assert_eq!(config.output, PathBuf::from("out"));
        assert_eq!(config.render_every, 0);
        assert_eq!(config.window.width, 800);
    }

    #[test]
    fn defaults_without_flags() {
        let args = DemoArgs::parse_from(["bezier_teapot"]);
        assert_eq!(args.load_config().unwrap(), DemoConfig::default());
    }
}
