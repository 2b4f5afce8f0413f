use clap::{Parser, Subcommand, ValueEnum};
use kep_core::ModelStats;
use kep_formulation::FormulationKind;
use kep_highs::highs_version;
use kep_runner::logging::init_logging;
use kep_runner::{
    DEFAULT_TIME_LIMIT_SECONDS, ExperimentGrid, RunResult, append_records_jsonl,
    default_parallelism, run_batch,
};
use kep_solver::SolverConfig;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Kidney exchange formulation runner"
)]
struct Cli {
    /// Log filter (for example `debug` or `kep_highs=debug`); overrides KEP_TRACE
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate instances, solve every combination and record the results
    Run(RunArgs),
    /// Build formulations and report model sizes without solving
    Build(BuildArgs),
}

#[derive(Parser, Debug)]
struct GridArgs {
    /// Comma-separated formulations (cycle, arcPath, arcPathRowGen, arcCycleRowGen, edge, mtz)
    #[arg(long = "formulation", value_delimiter = ',', default_value = "cycle")]
    formulations: Vec<FormulationKind>,

    /// Comma-separated node counts
    #[arg(short = 'n', long = "nodes", value_delimiter = ',', default_value = "10")]
    nodes: Vec<usize>,

    /// Comma-separated maximum cycle lengths
    #[arg(short = 'k', long = "max-cycle-length", value_delimiter = ',', default_value = "3")]
    max_cycle_lengths: Vec<usize>,

    /// Comma-separated arc densities in [0, 1]
    #[arg(short = 'd', long = "density", value_delimiter = ',', default_value = "0.2")]
    densities: Vec<f64>,

    /// Comma-separated weight modes: true for random real weights, false for unit weights
    #[arg(short = 'w', long = "weights", value_delimiter = ',', default_value = "false")]
    weights: Vec<bool>,

    /// Seeds per combination, counting up from 42
    #[arg(long, default_value_t = 1)]
    runs: usize,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    grid: GridArgs,

    /// Independent runs solved at the same time (defaults to the CPU count)
    #[arg(long)]
    parallelism: Option<usize>,

    /// Wall-clock limit per run in seconds
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_SECONDS)]
    time_limit: f64,

    /// Relative MIP gap
    #[arg(long, default_value_t = 0.0)]
    mip_gap: f64,

    /// HiGHS threads per run
    #[arg(long, default_value_t = 1)]
    threads: u32,

    /// Stop row generation after this many rounds
    #[arg(long)]
    max_lazy_rounds: Option<u32>,

    /// Print HiGHS output
    #[arg(long)]
    solver_log: bool,

    /// JSONL file the results are appended to
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    #[command(flatten)]
    grid: GridArgs,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

#[derive(Debug, Clone, Serialize)]
struct BuildRecord {
    formulation: FormulationKind,
    n: usize,
    k: usize,
    density: f64,
    seed: i32,
    real_weights: bool,
    row_generation: bool,
    build_seconds: f64,
    model: ModelStats,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;
    match cli.command {
        Command::Run(args) => run_command(args),
        Command::Build(args) => build_command(args),
    }
}

fn grid_from_args(args: &GridArgs, solver: SolverConfig) -> ExperimentGrid {
    ExperimentGrid {
        formulations: args.formulations.clone(),
        nodes: args.nodes.clone(),
        max_cycle_lengths: args.max_cycle_lengths.clone(),
        densities: args.densities.clone(),
        real_weights: args.weights.clone(),
        runs: args.runs,
        solver,
    }
}

fn run_command(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.parallelism == Some(0) {
        return Err(boxed_input_error("parallelism must be greater than zero"));
    }

    let mut solver = SolverConfig::new()
        .with_time_limit(args.time_limit)
        .with_mip_gap(args.mip_gap)
        .with_threads(args.threads)
        .with_log_to_console(args.solver_log);
    if let Some(rounds) = args.max_lazy_rounds {
        solver = solver.with_max_lazy_rounds(rounds);
    }
    let configs = grid_from_args(&args.grid, solver).expand()?;
    let parallelism = args.parallelism.unwrap_or_else(default_parallelism);
    tracing::debug!(
        component = "runner",
        operation = "start",
        status = "start",
        solver = "HiGHS",
        solver_version = highs_version().as_deref().unwrap_or("unknown"),
        runs = configs.len() as u64,
        parallelism = parallelism as u64,
        "Starting runs"
    );

    let mut records = Vec::new();
    let mut failures = 0usize;
    for (config, outcome) in configs.iter().zip(run_batch(&configs, parallelism)?) {
        match outcome {
            Ok(record) => records.push(record),
            Err(err) => {
                failures += 1;
                eprintln!(
                    "{} n={} k={} d={} seed={}: {err}",
                    config.formulation,
                    config.instance.n,
                    config.k,
                    config.instance.density,
                    config.instance.seed
                );
            }
        }
    }

    if let Some(path) = &args.output {
        append_records_jsonl(path, &records)?;
    }
    render_run_output(args.format, &records)?;

    if failures > 0 {
        return Err(boxed_input_error(&format!(
            "{failures} of {} runs failed",
            configs.len()
        )));
    }
    Ok(())
}

fn build_command(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let configs = grid_from_args(&args.grid, SolverConfig::new()).expand()?;
    let mut records = Vec::with_capacity(configs.len());
    for config in &configs {
        let started = Instant::now();
        let instance = config.instance.generate()?;
        let formulation = config.formulation.build(&instance, config.k)?;
        records.push(BuildRecord {
            formulation: config.formulation,
            n: config.instance.n,
            k: config.k,
            density: config.instance.density,
            seed: config.instance.seed,
            real_weights: config.instance.real_weights,
            row_generation: formulation.separator().is_some(),
            build_seconds: started.elapsed().as_secs_f64(),
            model: formulation.stats(),
        });
    }
    render_build_output(args.format, &records)
}

fn render_run_output(
    format: OutputFormat,
    records: &[RunResult],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            print_run_table(records);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
            Ok(())
        }
    }
}

fn render_build_output(
    format: OutputFormat,
    records: &[BuildRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            print_build_table(records);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
            Ok(())
        }
    }
}

fn print_run_table(records: &[RunResult]) {
    if records.is_empty() {
        println!("No runs completed.");
        return;
    }

    println!(
        "{:<15} {:>5} {:>3} {:>8} {:>6} {:>7} {:>10} {:>10} {:>12} {:>10} {:<16}",
        "formulation",
        "n",
        "k",
        "density%",
        "seed",
        "weights",
        "setup_s",
        "solve_s",
        "objective",
        "gap",
        "status"
    );
    for record in records {
        let gap = record
            .mip_gap
            .map_or_else(|| "-".to_string(), |gap| format!("{gap:.4}"));
        println!(
            "{:<15} {:>5} {:>3} {:>8.0} {:>6} {:>7} {:>10.3} {:>10.3} {:>12.4} {:>10} {:<16}",
            record.formulation.as_str(),
            record.n,
            record.k,
            record.density * 100.0,
            record.seed,
            record.real_weights,
            record.setup_seconds,
            record.solve_seconds,
            record.objective,
            gap,
            status_label(record)
        );
    }
}

fn print_build_table(records: &[BuildRecord]) {
    if records.is_empty() {
        println!("No formulations built.");
        return;
    }

    println!(
        "{:<15} {:>5} {:>3} {:>8} {:>6} {:>10} {:>10} {:>12} {:>10} {:>8}",
        "formulation",
        "n",
        "k",
        "density%",
        "seed",
        "variables",
        "rows",
        "nonzeros",
        "build_ms",
        "lazy"
    );
    for record in records {
        println!(
            "{:<15} {:>5} {:>3} {:>8.0} {:>6} {:>10} {:>10} {:>12} {:>10.3} {:>8}",
            record.formulation.as_str(),
            record.n,
            record.k,
            record.density * 100.0,
            record.seed,
            record.model.variables,
            record.model.constraints,
            record.model.nonzeros,
            record.build_seconds * 1000.0,
            record.row_generation
        );
    }
}

fn status_label(record: &RunResult) -> String {
    if record.lazy_satisfied {
        record.status.clone()
    } else {
        format!("{}*", record.status)
    }
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
