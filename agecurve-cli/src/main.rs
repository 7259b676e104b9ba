//! AgeCurve CLI — load both tables and print charts, rankings and lookups.
//!
//! Commands:
//! - `curve` — population curve chart
//! - `rank` — over- and under-performer lists
//! - `plot` — player detail chart for the first name matching a query
//! - `search` — names matching a query

use std::io;
use std::path::PathBuf;

use agecurve_core::chart::{AxisPolicy, PlayerPlotter};
use agecurve_core::data::{load_all, ResourceLocation};
use agecurve_core::domain::ChartSpec;
use agecurve_core::ranking::{rank_outliers, PredictionPolicy, RankedEntry};
use agecurve_core::search::{suggestions, SearchMode};
use agecurve_core::{AppConfig, OutlierRankings};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agecurve",
    about = "AgeCurve CLI - population aging curve and player forecast explorer"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to <config_dir>/agecurve/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Population curve CSV (path or http(s) URL). Overrides the config.
    #[arg(long, global = true)]
    curve: Option<String>,

    /// Player JSON (path or http(s) URL). Overrides the config.
    #[arg(long, global = true)]
    players: Option<String>,

    /// Debug logging on stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the population curve chart.
    Curve {
        /// Emit the chart view-model as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the over- and under-performer lists.
    Rank {
        /// Entries per list. Overrides the config.
        #[arg(long)]
        top: Option<usize>,

        /// Which value a player is measured against.
        #[arg(long, value_enum)]
        prediction: Option<PredictionArg>,

        /// Emit the rankings as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the detail chart of the first player matching a query.
    Plot {
        /// Name or part of a name.
        query: String,

        /// Emit the chart view-model as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Fixed y-axis bounds instead of the dynamic axis.
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
        fixed_axis: Option<Vec<f64>>,

        /// Leave out the backtest marker and connector.
        #[arg(long, default_value_t = false)]
        no_backtest: bool,

        /// Project a forecast from the curve when the player has none.
        #[arg(long, default_value_t = false)]
        project: bool,
    },
    /// List player names matching a query.
    Search {
        /// Name or part of a name. Empty lists the first names.
        #[arg(default_value = "")]
        query: String,

        /// Maximum names to print.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PredictionArg {
    PreferBacktest,
    FirstForecast,
}

impl From<PredictionArg> for PredictionPolicy {
    fn from(arg: PredictionArg) -> Self {
        match arg {
            PredictionArg::PreferBacktest => PredictionPolicy::PreferBacktest,
            PredictionArg::FirstForecast => PredictionPolicy::FirstForecast,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config = AppConfig::discover(cli.config.as_deref()).context("loading config")?;
    if let Some(curve) = &cli.curve {
        config.sources.curve = ResourceLocation::parse(curve);
    }
    if let Some(players) = &cli.players {
        config.sources.players = ResourceLocation::parse(players);
    }
    debug!(
        "sources: curve={} players={}",
        config.sources.curve, config.sources.players
    );

    match cli.command {
        Commands::Curve { json } => run_curve(&config, json),
        Commands::Rank {
            top,
            prediction,
            json,
        } => {
            if let Some(top) = top {
                config.ranking.top_n = top;
            }
            if let Some(prediction) = prediction {
                config.ranking.prediction = prediction.into();
            }
            run_rank(&config, json)
        }
        Commands::Plot {
            query,
            json,
            fixed_axis,
            no_backtest,
            project,
        } => {
            if let Some(bounds) = fixed_axis {
                let [min, max] = bounds[..] else {
                    bail!("--fixed-axis takes exactly two values");
                };
                config.plotter.axis = AxisPolicy::Fixed { min, max };
            }
            if no_backtest {
                config.plotter.show_backtest = false;
            }
            if project {
                config.plotter.project_missing_forecast = true;
            }
            run_plot(&config, &query, json)
        }
        Commands::Search { query, limit } => run_search(&config, &query, limit),
    }
}

fn run_curve(config: &AppConfig, json: bool) -> Result<()> {
    let (curve, _players, problems) = load_all(&config.sources).degrade();
    report_problems(&problems);
    let spec = agecurve_core::chart::population_chart(&curve);
    if json {
        println!("{}", serde_json::to_string_pretty(&spec)?);
    } else {
        print_chart(&spec);
    }
    Ok(())
}

fn run_rank(config: &AppConfig, json: bool) -> Result<()> {
    let (_curve, players, problems) = load_all(&config.sources).degrade();
    report_problems(&problems);
    let rankings = rank_outliers(&players, &config.ranking);
    if json {
        println!("{}", serde_json::to_string_pretty(&rankings)?);
    } else {
        print_rankings(&rankings);
    }
    Ok(())
}

fn run_plot(config: &AppConfig, query: &str, json: bool) -> Result<()> {
    let (curve, players, problems) = load_all(&config.sources).degrade();
    report_problems(&problems);

    // The command line names a player outright, so short queries are allowed.
    let mode = match config.search {
        SearchMode::FreeText { .. } => SearchMode::FreeText { min_query_len: 1 },
        SearchMode::Select => SearchMode::Select,
    };
    let Some(index) = mode.find(&players, query) else {
        bail!("no player matches '{query}'");
    };

    let spec = PlayerPlotter::new(config.plotter).plot(&players[index], &curve);
    if json {
        println!("{}", serde_json::to_string_pretty(&spec)?);
    } else {
        print_chart(&spec);
    }
    Ok(())
}

fn run_search(config: &AppConfig, query: &str, limit: usize) -> Result<()> {
    let (_curve, players, problems) = load_all(&config.sources).degrade();
    report_problems(&problems);
    let names = suggestions(&players, query, limit);
    if names.is_empty() {
        println!("No players match '{query}'.");
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Load problems are never fatal; they are logged and the command carries on.
fn report_problems(problems: &[String]) {
    if !problems.is_empty() {
        warn!("{} load problem(s); output may be incomplete", problems.len());
    }
}

fn print_chart(spec: &ChartSpec) {
    println!("{}", spec.title);
    println!(
        "  x: {} [{}, {}]   y: {} [{}, {}] step {}",
        spec.x_label,
        spec.x_axis.min,
        spec.x_axis.max,
        spec.y_label,
        spec.y_axis.min,
        spec.y_axis.max,
        spec.y_step
    );
    if spec.series.is_empty() {
        println!("  (no data)");
        return;
    }
    for series in &spec.series {
        println!();
        println!("  {} ({:?})", series.label, series.style);
        for (x, y) in &series.points {
            println!("    {x:>5} {y:>9.2}");
        }
    }
}

fn print_rankings(rankings: &OutlierRankings) {
    print_ranked("Over-performers", &rankings.over);
    println!();
    print_ranked("Under-performers", &rankings.under);
}

fn print_ranked(title: &str, entries: &[RankedEntry]) {
    println!("{title}");
    println!(
        "{:<4} {:<24} {:>8} {:>8} {:>8} {:<9}",
        "#", "Player", "Actual", "Pred", "Delta", "Source"
    );
    println!("{}", "-".repeat(66));
    if entries.is_empty() {
        println!("  (none)");
    }
    for (i, e) in entries.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:>8.1} {:>8.1} {:>+8.1} {:<9}",
            i + 1,
            e.name,
            e.actual,
            e.predicted,
            e.delta,
            format!("{:?}", e.source)
        );
    }
}
