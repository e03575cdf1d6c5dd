use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polygon_neighbours::search::{
    hardware_concurrency, run_search, NeighbourTable, ScheduleCfg,
};
use polygon_neighbours::tiling::{quad_tiling, GridCfg};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod output;
mod provenance;

use input::InputContainer;
use provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Find edge-sharing neighbours in a polygon collection")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Load polygons, search neighbours for the test indices, write the table
    Run(RunArgs),
    /// Write a jittered quad tiling as a JSON input container
    Generate(GenerateArgs),
    /// Print version, code revision and hardware concurrency as JSON
    Report,
}

#[derive(Args)]
struct RunArgs {
    /// JSON container, or CSV vertex table (`polygon,x,y`)
    #[arg(long, default_value = "data/polygons_todo.json")]
    input: PathBuf,
    /// Padded table output; extension selects json, csv or parquet
    #[arg(long, default_value = "data/neighbours.json")]
    out: PathBuf,
    /// Worker threads (default: hardware concurrency)
    #[arg(long, env = "POLYGON_NEIGHBOURS_WORKERS")]
    workers: Option<usize>,
    /// Test indices, overriding the container's list (CSV input: default all)
    #[arg(long, value_delimiter = ',')]
    test: Vec<usize>,
    /// Also write one `neighbours_<slot>.json` per test index into this directory
    #[arg(long)]
    split: Option<PathBuf>,
    /// Skip the provenance sidecar
    #[arg(long)]
    no_provenance: bool,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, default_value_t = 8)]
    rows: usize,
    #[arg(long, default_value_t = 8)]
    cols: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Corner jitter as a fraction of the cell size
    #[arg(long, default_value_t = 0.25)]
    jitter: f64,
    /// Test indices to store in the container (default: all quads)
    #[arg(long, value_delimiter = ',')]
    test: Vec<usize>,
    #[arg(long, default_value = "data/polygons_todo.json")]
    out: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run(args) => run(args),
        Action::Generate(args) => generate(args),
        Action::Report => report(),
    }
}

fn run(args: RunArgs) -> Result<()> {
    tracing::info!(
        input = %args.input.display(),
        out = %args.out.display(),
        workers = ?args.workers,
        "run"
    );
    let tests = (!args.test.is_empty()).then(|| args.test.clone());
    let ctx = input::load_context(&args.input, tests)
        .with_context(|| format!("loading {}", args.input.display()))?;
    tracing::info!(
        polygons = ctx.n_polygons(),
        tests = ctx.n_tests(),
        "input_loaded"
    );

    let cfg = ScheduleCfg::with_workers(args.workers.unwrap_or(0));
    let outcome = run_search(&ctx, &cfg).context("neighbour search failed")?;
    let workers = outcome.workers;
    let table = NeighbourTable::encode(&ctx, outcome.results)?;

    // The table is the run's result; it goes last so a failed run leaves none.
    let format = output::TableFormat::from_path(&args.out)?;
    if let Some(dir) = &args.split {
        output::write_split(&table, dir)?;
    }
    let sidecar = if args.no_provenance {
        None
    } else {
        let payload = Payload::new(serde_json::json!({
            "n_polygons": ctx.n_polygons(),
            "n_test": ctx.n_tests(),
            "workers": workers,
            "shape": table.shape(),
            "format": format!("{format:?}").to_lowercase(),
            "split": args.split,
        }))
        .with_input(&args.input);
        Some(provenance::write_sidecar(&args.out, payload)?)
    };
    if let Err(err) = output::write_table(&table, &args.out) {
        if let Some(path) = sidecar {
            let _ = std::fs::remove_file(path);
        }
        return Err(err);
    }
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let cfg = GridCfg {
        rows: args.rows,
        cols: args.cols,
        jitter: args.jitter,
        ..GridCfg::default()
    };
    let polygons = quad_tiling(cfg, args.seed);
    let tests = if args.test.is_empty() {
        (0..polygons.len()).collect()
    } else {
        args.test
    };
    let container = InputContainer::from_polygons(&polygons, tests);
    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&args.out, serde_json::to_vec(&container)?)
        .with_context(|| format!("writing {}", args.out.display()))?;
    tracing::info!(
        out = %args.out.display(),
        polygons = container.n_polygons,
        tests = container.n_test,
        seed = args.seed,
        "generate"
    );
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": polygon_neighbours::VERSION,
        "hardware_concurrency": hardware_concurrency(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
