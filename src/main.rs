//! Delivery Tour Planner - Command Line Interface
//!
//! Plans and compares delivery tours over a road-network graph.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tour_planner::compare::{random_run_statistics, run_all};
use tour_planner::graph::RoadGraph;
use tour_planner::matrix::DistanceMatrix;
use tour_planner::priority::PriorityMap;
use tour_planner::problem::{DeliveryPlan, PlanningProblem};
use tour_planner::strategies::{
    GreedyEdgeStrategy, MstApproximationStrategy, PriorityGreedyStrategy, RandomStrategy,
    TourStrategy,
};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tour-planner")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Plans delivery tours over a road-network graph")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a tour with a single strategy
    Plan {
        /// Road-network graph file (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Delivery metadata file with HQ and delivery node ids (JSON)
        #[arg(short, long)]
        deliveries: PathBuf,

        /// Strategy to use
        #[arg(short, long, value_enum, default_value = "greedy-edge")]
        strategy: Strategy,

        /// Priority file (JSON map of node id to priority); random
        /// priorities are generated when omitted
        #[arg(short, long)]
        priorities: Option<PathBuf>,

        /// Random seed (random strategy and generated priorities)
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Write the planned tour as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run every strategy and rank the results
    Compare {
        /// Road-network graph file (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Delivery metadata file (JSON)
        #[arg(short, long)]
        deliveries: PathBuf,

        /// Priority file; random priorities when omitted
        #[arg(short, long)]
        priorities: Option<PathBuf>,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Extra runs of the random baseline for cost-spread statistics
        #[arg(short, long, default_value = "10")]
        runs: usize,

        /// Output CSV file for the ranking
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print graph and problem statistics
    Analyze {
        /// Road-network graph file (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Delivery metadata file (JSON)
        #[arg(short, long)]
        deliveries: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Strategy {
    /// Uniform random baseline
    Random,
    /// MST preorder 2-approximation
    Mst,
    /// Priority-weighted greedy (0.7 priority / 0.3 inverse distance)
    PriorityGreedy,
    /// Greedy-edge TSP heuristic
    GreedyEdge,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            graph,
            deliveries,
            strategy,
            priorities,
            seed,
            output,
            verbose,
        } => plan_tour(&graph, &deliveries, strategy, priorities, seed, output, verbose),

        Commands::Compare {
            graph,
            deliveries,
            priorities,
            seed,
            runs,
            output,
        } => compare_strategies(&graph, &deliveries, priorities, seed, runs, output),

        Commands::Analyze { graph, deliveries } => analyze(&graph, deliveries),
    }
}

fn load_graph(path: &PathBuf) -> RoadGraph {
    println!("Loading graph from {:?}...", path);
    let graph = match RoadGraph::from_file(path) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error loading graph: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    if let Some(stats) = graph.edge_stats() {
        println!(
            "Edge length (km) - min: {:.3}, max: {:.3}, avg: {:.3}",
            stats.min, stats.max, stats.mean
        );
    }
    graph
}

fn load_problem(
    graph: &RoadGraph,
    deliveries_path: &PathBuf,
    priorities_path: Option<PathBuf>,
    seed: u64,
) -> PlanningProblem {
    let plan = match DeliveryPlan::from_file(deliveries_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading deliveries: {}", e);
            std::process::exit(1);
        }
    };

    let priorities = match priorities_path {
        Some(path) => match PriorityMap::from_file(&path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading priorities: {}", e);
                std::process::exit(1);
            }
        },
        None => PriorityMap::random(&plan.delivery_nodes, seed),
    };

    let mut selected = Vec::with_capacity(plan.delivery_nodes.len() + 1);
    selected.push(plan.hq_node);
    selected.extend_from_slice(&plan.delivery_nodes);

    println!("Computing distance matrix ({} sources)...", selected.len());
    let bar = ProgressBar::new(selected.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} sources ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let matrix = DistanceMatrix::build_with_progress(graph, &selected, &bar);
    bar.finish_and_clear();

    match PlanningProblem::new(plan.hq_node, plan.delivery_nodes, matrix, priorities) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Invalid planning problem: {}", e);
            std::process::exit(1);
        }
    }
}

fn plan_tour(
    graph_path: &PathBuf,
    deliveries_path: &PathBuf,
    strategy: Strategy,
    priorities_path: Option<PathBuf>,
    seed: u64,
    output: Option<PathBuf>,
    verbose: bool,
) {
    let graph = load_graph(graph_path);
    let problem = load_problem(&graph, deliveries_path, priorities_path, seed);

    if verbose {
        println!("{}", problem.statistics());
    }

    println!("Planning with {:?} strategy...", strategy);
    let tour = match strategy {
        Strategy::Random => RandomStrategy::new(seed).plan(&problem),
        Strategy::Mst => MstApproximationStrategy::new().plan(&problem),
        Strategy::PriorityGreedy => PriorityGreedyStrategy::new().plan(&problem),
        Strategy::GreedyEdge => GreedyEdgeStrategy::new().plan(&problem),
    };

    println!("{}", tour);
    if !tour.is_reachable() {
        println!("Warning: tour includes unreachable hops (sentinel-inflated cost)");
    }
    if strategy == Strategy::PriorityGreedy && verbose {
        let sequence: Vec<u8> = tour
            .interior()
            .iter()
            .map(|&n| problem.priorities.priority(n))
            .collect();
        println!("Priority sequence: {:?}", sequence);
    }

    if let Some(path) = output {
        match std::fs::File::create(&path)
            .map_err(|e| format!("Cannot create output file: {}", e))
            .and_then(|file| {
                serde_json::to_writer_pretty(file, &tour)
                    .map_err(|e| format!("Cannot write output file: {}", e))
            }) {
            Ok(()) => println!("Tour written to {:?}", path),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn compare_strategies(
    graph_path: &PathBuf,
    deliveries_path: &PathBuf,
    priorities_path: Option<PathBuf>,
    seed: u64,
    runs: usize,
    output: Option<PathBuf>,
) {
    let graph = load_graph(graph_path);
    let problem = load_problem(&graph, deliveries_path, priorities_path, seed);

    println!(
        "Comparing strategies on {} deliveries...",
        problem.num_deliveries()
    );
    let report = run_all(&problem, seed);

    println!("\n--- Ranking ---");
    for (rank, result) in report.ranked().iter().enumerate() {
        println!(
            "{}. {:16} cost {:>12.2} km  stops {:>4}  time {:.4}s{}",
            rank + 1,
            result.strategy,
            result.cost,
            result.stops,
            result.time,
            if result.reachable {
                ""
            } else {
                "  [unreachable hops]"
            }
        );
    }

    if runs > 1 {
        let stats = random_run_statistics(&problem, runs, seed);
        println!("\n--- Random baseline over {} runs ---", stats.runs);
        println!(
            "mean {:.2}  best {:.2}  worst {:.2}  std {:.2}",
            stats.mean_cost, stats.best_cost, stats.worst_cost, stats.std_cost
        );
    }

    if let Some(path) = output {
        match report.write_csv(&path) {
            Ok(()) => println!("\nResults written to {:?}", path),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn analyze(graph_path: &PathBuf, deliveries_path: Option<PathBuf>) {
    let graph = load_graph(graph_path);

    if let Some(path) = deliveries_path {
        let problem = load_problem(&graph, &path, None, 42);
        println!("{}", problem.statistics());
    }
}
