use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info, LevelFilter};
use thiserror::Error;
use u_maxsat::report::{write_best_solution, write_summary, CsvTrace};
use u_maxsat::{ParamMode, SaConfig, Solver, SolverError, TraceSink};

#[derive(Debug, Parser)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    /// The instance to solve, in the MWCNF format.
    instance_path: PathBuf,

    /// Start temperature.
    #[arg(required_unless_present = "auto_tune")]
    temp_start: Option<f64>,

    /// Cooling factor in (0, 1).
    #[arg(required_unless_present = "auto_tune")]
    alpha: Option<f64>,

    /// Minimum temperature; the search stops once it is reached.
    #[arg(required_unless_present = "auto_tune")]
    temp_min: Option<f64>,

    /// Number of moves tried at each temperature.
    #[arg(required_unless_present = "auto_tune")]
    iters_per_temp: Option<usize>,

    /// Derive the annealing parameters from the instance instead.
    #[arg(long, conflicts_with_all = ["temp_start", "alpha", "temp_min", "iters_per_temp"])]
    auto_tune: bool,

    /// File the CSV result line is appended to.
    #[arg(long)]
    output: Option<PathBuf>,

    /// File the per-step CSV trace is written to (truncated).
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Seed of the random generator. Drawn from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Enables debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Solver(#[from] SolverError),
    #[error("failed to open '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("IO error, more details: {0}")]
    Io(#[from] io::Error),
    #[error("missing annealing parameters, pass all four or --auto-tune")]
    MissingParameters,
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "c {}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    let args = Args::parse();
    configure_logging(args.verbose);

    if let Err(e) = run(args) {
        error!("Execution failed, error: {e}");
        std::process::exit(1);
    }
}

fn param_mode(args: &Args) -> Result<ParamMode, CliError> {
    if args.auto_tune {
        return Ok(ParamMode::Auto);
    }
    match (args.temp_start, args.alpha, args.temp_min, args.iters_per_temp) {
        (Some(t0), Some(alpha), Some(t_min), Some(iters)) => Ok(SaConfig::default()
            .with_initial_temperature(t0)
            .with_alpha(alpha)
            .with_min_temperature(t_min)
            .with_iterations_per_temperature(iters)
            .into()),
        _ => Err(CliError::MissingParameters),
    }
}

fn open(path: &Path, append: bool) -> Result<File, CliError> {
    let mut options = OpenOptions::new();
    if append {
        options.append(true).create(true);
    } else {
        options.write(true).create(true).truncate(true);
    }
    options.open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let mode = param_mode(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("using seed {seed}");

    let mut solver = Solver::new(seed);
    solver.load(&args.instance_path)?;

    let output = args
        .output
        .as_ref()
        .map(|path| open(path, true))
        .transpose()?;
    let mut trace = args
        .trace
        .as_ref()
        .map(|path| open(path, false).and_then(|f| Ok(CsvTrace::new(BufWriter::new(f))?)))
        .transpose()?;

    solver.solve(&mode, trace.as_mut().map(|t| t as &mut dyn TraceSink))?;

    if let Some(trace) = trace.as_mut() {
        trace.flush()?;
    }
    if let Some(output) = output {
        write_summary(output, &solver.complete_summary()?)?;
    }

    let stdout = io::stdout();
    write_best_solution(stdout.lock(), &solver.best_solution_summary()?)?;
    Ok(())
}
