//! CLI argument parsing and command dispatch.
//!
//! The parser accepts any iterator of strings, not just `std::env::args()`,
//! so argument handling is fully testable.

use std::path::PathBuf;

use crate::config::EstimarConfig;
use crate::engine::{default_integrand, estimate_sample_mean, LayoutMode, SampleRng};
use crate::error::EstResult;
use crate::render::{FrameRenderer, JsonLinesRenderer};

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Animate the default integrand in the terminal
    Run {
        /// Optional configuration file.
        config_path: Option<PathBuf>,
        /// Sample count override.
        frames: Option<usize>,
        /// Seed override.
        seed: Option<u64>,
        /// Use exact sample positions instead of adjusted slots.
        exact: bool,
        /// Pacing interval override in seconds.
        interval: Option<f64>,
    },
    /// Export frames as JSON Lines
    Export {
        /// Output file path.
        output_path: PathBuf,
        /// Sample count override.
        frames: Option<usize>,
        /// Seed override.
        seed: Option<u64>,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        // args[0] is the program name
        let command = match args.get(1).map(String::as_str) {
            Some("run") => Self::parse_run(&args[2..]),
            Some("export") => Self::parse_export(&args[2..]),
            Some("version" | "--version" | "-V") => Command::Version,
            _ => Command::Help,
        };

        Self { command }
    }

    fn parse_run(rest: &[String]) -> Command {
        let mut config_path = None;
        let mut frames = None;
        let mut seed = None;
        let mut exact = false;
        let mut interval = None;

        let mut it = rest.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--config" => config_path = it.next().map(PathBuf::from),
                "--frames" => frames = it.next().and_then(|v| v.parse().ok()),
                "--seed" => seed = it.next().and_then(|v| v.parse().ok()),
                "--exact" => exact = true,
                "--interval" => interval = it.next().and_then(|v| v.parse().ok()),
                _ => {}
            }
        }

        Command::Run {
            config_path,
            frames,
            seed,
            exact,
            interval,
        }
    }

    fn parse_export(rest: &[String]) -> Command {
        let mut output_path = None;
        let mut frames = None;
        let mut seed = None;

        let mut it = rest.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--frames" => frames = it.next().and_then(|v| v.parse().ok()),
                "--seed" => seed = it.next().and_then(|v| v.parse().ok()),
                other if !other.starts_with("--") && output_path.is_none() => {
                    output_path = Some(PathBuf::from(other));
                }
                _ => {}
            }
        }

        match output_path {
            Some(output_path) => Command::Export {
                output_path,
                frames,
                seed,
            },
            None => Command::Help,
        }
    }
}

/// Help text shown for `help` and unrecognized commands.
pub const HELP: &str = "\
estimar - sample-mean Monte Carlo integration with animated convergence

Usage:
  estimar run [--config FILE] [--frames N] [--seed S] [--exact] [--interval SECS]
  estimar export FILE [--frames N] [--seed S]
  estimar version
  estimar help
";

/// Resolve the effective configuration for a `run`/`export` command.
fn resolve_config(
    config_path: Option<&PathBuf>,
    frames: Option<usize>,
    seed: Option<u64>,
    exact: bool,
    interval: Option<f64>,
) -> EstResult<EstimarConfig> {
    let mut config = match config_path {
        Some(path) => EstimarConfig::load(path)?,
        None => EstimarConfig::default(),
    };

    if let Some(frames) = frames {
        config.animation.frames = frames;
    }
    if let Some(seed) = seed {
        config.reproducibility.seed = seed;
    }
    if exact {
        config.layout.mode = LayoutMode::Exact;
    }
    if let Some(interval) = interval {
        config.animation.interval_secs = interval;
    }

    config.validate_semantic()?;
    Ok(config)
}

/// Execute a parsed command.
///
/// # Errors
///
/// Propagates configuration, estimation, and rendering failures.
pub fn execute(args: &Args) -> EstResult<()> {
    match &args.command {
        Command::Run {
            config_path,
            frames,
            seed,
            exact,
            interval,
        } => {
            let config =
                resolve_config(config_path.as_ref(), *frames, *seed, *exact, *interval)?;
            let mut rng = SampleRng::new(config.seed());
            let mut renderer = make_terminal_renderer(&config);

            let result =
                estimate_sample_mean(default_integrand, &config, &mut rng, renderer.as_mut())?;

            println!();
            println!("samples:        {}", result.n);
            println!("estimate:       {:.6}", result.estimate);
            println!("standard error: {:.6}", result.standard_error());
            Ok(())
        }
        Command::Export {
            output_path,
            frames,
            seed,
        } => {
            let config = resolve_config(None, *frames, *seed, false, None)?;
            let mut rng = SampleRng::new(config.seed());

            let file = std::fs::File::create(output_path)?;
            let mut renderer = JsonLinesRenderer::new(std::io::BufWriter::new(file));

            let result =
                estimate_sample_mean(default_integrand, &config, &mut rng, &mut renderer)?;

            println!("wrote {} frames to {}", result.n, output_path.display());
            println!("estimate: {:.6}", result.estimate);
            Ok(())
        }
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Version => {
            println!("estimar v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[cfg(feature = "tui")]
fn make_terminal_renderer(config: &EstimarConfig) -> Box<dyn FrameRenderer> {
    let interval = std::time::Duration::from_secs_f64(config.animation.interval_secs);
    Box::new(crate::render::AnsiRenderer::new(
        std::io::stdout(),
        72,
        20,
        interval,
    ))
}

#[cfg(not(feature = "tui"))]
fn make_terminal_renderer(_config: &EstimarConfig) -> Box<dyn FrameRenderer> {
    Box::new(crate::render::TextRenderer::stdout())
}
