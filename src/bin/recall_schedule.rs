use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recall_schedule::models::DomainModel;
use recall_schedule::render::{render_text, save_svg};
use recall_schedule::scheduler::{
    GeneratedSchedule, ScheduleAudit, ScheduleGenerator, SolverConfig, DEFAULT_MAX_ATTEMPTS,
};
use recall_schedule::ScheduleError;

/// Generate an active-recall study schedule.
#[derive(Parser, Debug)]
#[command(name = "recall-schedule")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON domain model (default: the built-in Monday-to-Monday week)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Randomize the order of equally-scored combinations
    #[arg(short, long)]
    shuffle: bool,

    /// Base seed for --shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Attempt ceiling
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Also write the calendar grid as SVG
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Print the schedule as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn run(cli: &Cli) -> Result<(), ScheduleError> {
    let model = match &cli.model {
        Some(path) => DomainModel::from_path(path)?,
        None => DomainModel::recall_week(),
    };

    let mut config = SolverConfig::default()
        .with_shuffle(cli.shuffle)
        .with_max_attempts(cli.max_attempts);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let generator = ScheduleGenerator::new(model, config)?;
    let config = generator.config();
    info!(
        shuffle = config.shuffle,
        seed = ?config.seed,
        max_attempts = config.max_attempts,
        "generating schedule"
    );
    let GeneratedSchedule {
        assignment,
        counter,
        attempts,
        stats,
    } = generator.generate()?;
    info!(
        attempts,
        nodes = stats.nodes,
        backtracks = stats.backtracks,
        "search finished"
    );

    let model = generator.model();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&assignment)?);
    } else {
        print!("{}", render_text(&assignment, model));
    }

    let audit = ScheduleAudit::inspect(&assignment, &counter, model);
    if audit.is_clean() {
        info!("audit passed");
    } else {
        audit.log();
    }

    if let Some(path) = &cli.svg {
        save_svg(path, &assignment, model)?;
        info!(path = %path.display(), "calendar written");
    }

    Ok(())
}

fn main() -> ExitCode {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
