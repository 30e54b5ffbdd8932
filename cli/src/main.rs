//! AirRank CLI: ranks the airports of an OpenFlights route network
//!
//! Reads an airports file and a routes file, runs weighted PageRank and
//! writes the airports ordered by decreasing rank.

use airrank::{
    load_airports, load_routes, rank_airports, ranking, write_report, ExportFormat, RankedAirport,
    RankerConfig, RouteGraph,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "airrank", version, about = "PageRank for air-route networks")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "AIRRANK_CONFIG")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Inputs {
    /// OpenFlights airports file
    #[arg(long, default_value = "airports.txt")]
    airports: PathBuf,

    /// OpenFlights routes file
    #[arg(long, default_value = "routes.txt")]
    routes: PathBuf,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and write airport ranks
    Rank {
        #[command(flatten)]
        inputs: Inputs,

        /// Write the report here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format (overrides the configuration file)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Separator between rank and name in text output
        #[arg(long)]
        separator: Option<String>,

        /// Only write the top N airports
        #[arg(long)]
        limit: Option<usize>,

        /// Damping factor, strictly between 0 and 1
        #[arg(long)]
        damping: Option<f64>,

        /// L1 convergence tolerance
        #[arg(long)]
        tolerance: Option<f64>,

        /// Iteration cap
        #[arg(long)]
        max_iterations: Option<usize>,
    },
    /// Show graph statistics after ingestion
    Stats {
        #[command(flatten)]
        inputs: Inputs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, _) => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => RankerConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => RankerConfig::default(),
    };

    match cli.command {
        Commands::Rank {
            inputs,
            output,
            format,
            separator,
            limit,
            damping,
            tolerance,
            max_iterations,
        } => {
            if let Some(damping) = damping {
                config.solver.damping_factor = damping;
            }
            if let Some(tolerance) = tolerance {
                config.solver.tolerance = tolerance;
            }
            if let Some(max_iterations) = max_iterations {
                config.solver.max_iterations = max_iterations;
            }
            if let Some(separator) = separator {
                config.output.separator = separator;
            }
            if limit.is_some() {
                config.output.limit = limit;
            }
            let table = matches!(format, Some(OutputFormat::Table));
            check_table_output(table, output.as_deref())?;
            match format {
                Some(OutputFormat::Text) => config.output.format = ExportFormat::Text,
                Some(OutputFormat::Csv) => config.output.format = ExportFormat::Csv,
                Some(OutputFormat::Json) => config.output.format = ExportFormat::Json,
                Some(OutputFormat::Table) | None => {}
            }

            run_rank(&inputs, output.as_deref(), table, &config)
        }
        Commands::Stats { inputs, json } => run_stats(&inputs, json),
    }
}

/// The table view only renders to the terminal
fn check_table_output(table: bool, output: Option<&Path>) -> Result<()> {
    if let (true, Some(path)) = (table, output) {
        bail!(
            "--format table prints to the terminal and cannot write to {}; use text, csv or json with --output",
            path.display()
        );
    }
    Ok(())
}

fn load_graph(inputs: &Inputs) -> Result<RouteGraph> {
    let mut graph = RouteGraph::new();
    load_airports(&mut graph, &inputs.airports)
        .with_context(|| format!("failed to read airports from {}", inputs.airports.display()))?;
    load_routes(&mut graph, &inputs.routes)
        .with_context(|| format!("failed to read routes from {}", inputs.routes.display()))?;
    Ok(graph)
}

fn run_rank(
    inputs: &Inputs,
    output: Option<&Path>,
    table: bool,
    config: &RankerConfig,
) -> Result<()> {
    let mut graph = load_graph(inputs)?;
    let solver = config.solver_config();

    let started = Instant::now();
    let outcome = rank_airports(&mut graph, &solver).context("PageRank failed")?;
    let elapsed = started.elapsed();

    if !outcome.converged {
        warn!(
            "Ranks did not converge within {} iterations",
            solver.max_iterations
        );
    }
    info!("Ranked {} airports in {:?}", outcome.ranks.len(), elapsed);
    eprintln!("#Iterations: {}", outcome.iterations);
    eprintln!("Time of PageRank: {:.6}s", elapsed.as_secs_f64());

    let entries = ranking(&outcome.ranks, &graph.names());

    if table {
        let shown = match config.output.limit {
            Some(limit) => &entries[..limit.min(entries.len())],
            None => &entries[..],
        };
        print_table(shown);
        return Ok(());
    }

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_report(BufWriter::new(file), &entries, &config.output)?;
            info!("Wrote {} entries to {}", entries.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_report(stdout.lock(), &entries, &config.output)?;
        }
    }

    Ok(())
}

fn print_table(entries: &[RankedAirport]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Rank", "IATA", "Airport"]);

    for (pos, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (pos + 1).to_string(),
            format!("{:.10}", entry.rank),
            entry.id.to_string(),
            entry.name.clone(),
        ]);
    }

    println!("{}", table);
    println!("{} row(s)", entries.len());
}

fn run_stats(inputs: &Inputs, json: bool) -> Result<()> {
    let graph = load_graph(inputs)?;

    let airports = graph.node_count();
    let routes = graph.edge_count();
    let weight = graph.total_weight();
    let sinks = graph.sinks().count();
    let placeholders = graph.placeholders().count();

    if json {
        let stats = serde_json::json!({
            "airports": airports,
            "routes": routes,
            "route_weight": weight,
            "sinks": sinks,
            "placeholders": placeholders,
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let mut out = std::io::stdout().lock();
        writeln!(out, "Airports:      {}", airports)?;
        writeln!(out, "Routes:        {}", routes)?;
        writeln!(out, "Route weight:  {}", weight)?;
        writeln!(out, "Sinks:         {}", sinks)?;
        writeln!(out, "Placeholders:  {}", placeholders)?;
    }

    Ok(())
}
