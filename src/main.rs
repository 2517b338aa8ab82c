use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::PathBuf;

use rusty_lif::core::current::Exponential;
use rusty_lif::core::params::Parameters;
use rusty_lif::core::trace::SpikeKind;
use rusty_lif::error::LIFError;
use rusty_lif::simulator::simulator::{Mode, ModeArgs, Simulation};
use rusty_lif::simulator::{DEFAULT_CURRENT, DEFAULT_MIN_SPACING_FACTOR, DEFAULT_SPIKE_RATE};

/// Simulate the membrane potential of a leaky integrate-and-fire neuron
#[derive(Parser, Debug)]
struct Args {
    /// The simulation mode, must be one of: current, spike
    mode: String,
    /// The simulation duration in milliseconds
    duration_ms: f64,
    /// The JSON file holding the neuron parameters
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    /// The injected current in nanoamperes (current mode)
    #[arg(long, default_value_t = DEFAULT_CURRENT)]
    current: f64,
    /// The input spike rate in Hz (spike mode)
    #[arg(long, default_value_t = DEFAULT_SPIKE_RATE)]
    spike_rate: f64,
    /// Set to 1 to use the Taylor approximation of the exponential (spike mode)
    #[arg(long, default_value = "0")]
    bonus: u8,
    /// The minimum quiet time before an input spike forces a spike, in input intervals (spike mode)
    #[arg(long, default_value_t = DEFAULT_MIN_SPACING_FACTOR)]
    min_spacing_factor: f64,
    /// The JSON file to which the trace is written
    #[arg(long)]
    output: Option<PathBuf>,
    /// The file to which logs are also written
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// The logging level
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn init_logging(args: &Args) -> Result<(), LIFError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}{n}")))
        .build();

    let mut config =
        Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");

    if let Some(path) = &args.log_file {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} {l} - {m}{n}")))
            .build(path)
            .map_err(|e| LIFError::IOError(e.to_string()))?;
        config = config.appender(Appender::builder().build("logfile", Box::new(logfile)));
        root = root.appender("logfile");
    }

    let config = config
        .build(root.build(args.log_level))
        .map_err(|e| LIFError::IOError(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| LIFError::IOError(e.to_string()))?;
    Ok(())
}

fn simulate(args: &Args) -> Result<(), LIFError> {
    // Validate the invocation before touching the parameter file
    let mode: Mode = args.mode.parse()?;
    let exponential = Exponential::from_toggle(args.bonus)?;

    let params = Parameters::load_from(&args.config)?;
    log::info!("Parameters loaded from {}", args.config.display());

    let mode_args = ModeArgs {
        current_na: args.current,
        spike_rate_hz: args.spike_rate,
        exponential,
        min_spacing_factor: args.min_spacing_factor,
        ..ModeArgs::new(args.duration_ms)
    };

    let trace = Simulation::build(params, mode, &mode_args)?.run();
    log::info!(
        "Firing rate: {:.3} Hz ({} output spikes, {} input spikes)",
        trace.firing_rate(),
        trace.num_spikes(SpikeKind::Output),
        trace.num_spikes(SpikeKind::Input)
    );

    if let Some(path) = &args.output {
        trace.save_to(path)?;
        log::info!("Trace saving: done! Saved to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<(), LIFError> {
    let args = Args::parse();
    init_logging(&args)?;
    log::debug!("{:?}", args);

    simulate(&args).map_err(|e| {
        log::error!("{}", e);
        e
    })
}
