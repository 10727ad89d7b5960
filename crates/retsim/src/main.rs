use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{WrapErr, bail};
use retsim::{CliPresenter, OutputFormat, RetsimConfig, init_logging, repl};
use retsim_core::ensemble::{EnsembleConfig, run_ensemble};
use retsim_core::{SamplerMethod, SimulationController, SimulationSession};

#[derive(Parser, Debug)]
#[command(name = "retsim")]
#[command(about = "Simulate monthly portfolio returns from an annual drift and volatility")]
struct Args {
    /// Annualized drift in percent (0-50)
    #[arg(short, long)]
    drift: Option<f64>,

    /// Annualized volatility in percent (0-100)
    #[arg(short, long)]
    volatility: Option<f64>,

    /// Horizon in months (1-120)
    #[arg(short, long)]
    months: Option<u32>,

    /// Seed for reproducible runs (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Sampler: box-muller, single-draw-box-muller or ziggurat
    #[arg(long)]
    sampler: Option<SamplerMethod>,

    /// Config file (default: <config dir>/retsim/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Regenerate the random sequence this many times after the first run
    #[arg(long, default_value_t = 0)]
    regenerate: u32,

    /// Show the monthly table
    #[arg(short, long)]
    table: bool,

    /// First month of the table (YYYY-MM)
    #[arg(long)]
    start: Option<String>,

    /// Run an ensemble of this many independent paths instead
    #[arg(long)]
    ensemble: Option<usize>,

    /// Read parameter edits from stdin
    #[arg(short, long, conflicts_with = "ensemble")]
    interactive: bool,

    /// Emit JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn apply_to(&self, config: &mut RetsimConfig) {
        if let Some(drift) = self.drift {
            config.params.drift = drift;
        }
        if let Some(volatility) = self.volatility {
            config.params.volatility = volatility;
        }
        if let Some(months) = self.months {
            config.params.horizon_months = months;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(sampler) = self.sampler {
            config.sampler = sampler;
        }
        if let Some(start) = &self.start {
            config.start_month = Some(start.clone());
        }
        config.show_table |= self.table;
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut config = match &args.config {
        Some(path) => RetsimConfig::load(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => RetsimConfig::load_or_default(),
    };
    args.apply_to(&mut config);

    if let Some(path) = &args.write_config {
        config.save(path)?;
        tracing::info!(path = %path.display(), "Wrote config");
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let start = config.start_date()?;
    let presenter = CliPresenter::new(std::io::stdout(), std::io::stderr(), format)
        .with_table(config.show_table)
        .with_start(start);

    if let Some(paths) = args.ensemble {
        let seed = config.seed.unwrap_or_else(rand::random);
        let ensemble = EnsembleConfig::new(paths, seed).with_method(config.sampler);
        tracing::info!(paths, seed, "Starting ensemble");
        let summary = run_ensemble(&config.params, &ensemble)?;
        let mut presenter = presenter;
        presenter.write_ensemble(&summary)?;
        return Ok(());
    }

    let session = match config.seed {
        Some(seed) => SimulationSession::with_seed(seed, config.sampler),
        None => SimulationSession::new(config.sampler),
    };
    let mut controller = SimulationController::new(session, config.params, presenter)
        .with_debounce(Duration::from_millis(config.debounce_ms));

    controller.load();
    for _ in 0..args.regenerate {
        controller.regenerate();
    }

    if args.interactive {
        eprintln!("{}", repl::HELP);
        repl::run(&mut controller, repl::spawn_stdin_reader());
    }

    let rejected = controller.last_outcome().is_none();
    let (mut out, _) = controller.into_presenter().into_writers();
    out.flush()?;

    // Validation errors were already printed by the presenter
    if rejected && !args.interactive {
        bail!("simulation parameters rejected");
    }

    Ok(())
}
