//! Command-line front end: runs the climbers until interrupted.
//!
//! Usage:
//!   hillclimb <CLIMBERS> <FUNCTION>
//!
//! `SIGINT` stops the run and prints the best result, `SIGUSR1` prints the
//! best so far and lets the run continue.

use std::process::ExitCode;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use hillclimb::tracker::SharedBestTracker;
use hillclimb::{BestRecord, ClimbError, ClimbLauncher, Result, RunConfiguration, SearchControl};

/// Number of dimensions searched by the command-line tool.
const DIMENSIONS: usize = 2;

#[derive(Parser, Debug)]
#[command(name = "hillclimb", version)]
#[command(about = "Stochastic hill climbing over classic benchmark functions")]
struct Args {
    /// Number of concurrent climbers (1-8)
    #[arg(value_name = "CLIMBERS", allow_negative_numbers = true)]
    climbers: String,

    /// Benchmark function: 1 Egg Holder, 2 Schwefel, 3 Rastrigin, 4 Griewank,
    /// 5 Sphere, 6 Dixon-Price, 7 Sum Squares, 8 Sum of Different Powers
    #[arg(value_name = "FUNCTION", allow_negative_numbers = true)]
    function: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                println!("{}", ClimbError::ArgumentCount);
                return ExitCode::FAILURE;
            }
        },
    };

    let config = match RunConfiguration::<DIMENSIONS>::from_args(&args.climbers, &args.function) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: RunConfiguration<DIMENSIONS>) -> Result<()> {
    let tracker = SharedBestTracker::<DIMENSIONS>::with_observer(|record| {
        println!("New minimum: {}", record);
    });
    let control = Arc::new(SearchControl::with_tracker(tracker));

    let signals = signals::install(Arc::clone(&control))?;
    let summary = ClimbLauncher::new(config).run(&control);
    signals.close();

    println!();
    println!("Best in run: {}", describe(summary?.best));
    Ok(())
}

fn describe(best: Option<BestRecord<DIMENSIONS>>) -> String {
    best.map(|record| record.to_string())
        .unwrap_or_else(|| "none".to_string())
}

#[cfg(unix)]
mod signals {
    use std::sync::Arc;
    use std::thread;

    use signal_hook::consts::{SIGINT, SIGUSR1};
    use signal_hook::iterator::{Handle, Signals};

    use hillclimb::{Result, ResultExt, SearchControl};

    use tracing::debug;

    use super::{describe, DIMENSIONS};

    /// Forwards OS signals to the run's control until the first interrupt.
    pub struct SignalAdapter {
        handle: Handle,
    }

    impl SignalAdapter {
        pub fn close(self) {
            self.handle.close();
        }
    }

    pub fn install(control: Arc<SearchControl<DIMENSIONS>>) -> Result<SignalAdapter> {
        let mut signals = Signals::new([SIGINT, SIGUSR1])?;
        let handle = signals.handle();

        thread::Builder::new()
            .name("signals".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    match signal {
                        SIGINT => {
                            control.request_stop();
                            break;
                        }
                        SIGUSR1 => println!("Best so far: {}", describe(control.request_status())),
                        _ => {}
                    }
                }
                debug!("signal adapter finished");
            })
            .context("Failed to start signal thread")?;

        Ok(SignalAdapter { handle })
    }
}

#[cfg(not(unix))]
mod signals {
    use std::sync::Arc;

    use hillclimb::{Result, SearchControl};

    use tracing::warn;

    use super::DIMENSIONS;

    pub struct SignalAdapter;

    impl SignalAdapter {
        pub fn close(self) {}
    }

    pub fn install(_control: Arc<SearchControl<DIMENSIONS>>) -> Result<SignalAdapter> {
        warn!("signal controls are only available on unix");
        Ok(SignalAdapter)
    }
}
