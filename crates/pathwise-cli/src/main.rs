//! pathwise CLI: skill graph lookups and instructional text evaluation.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use pathwise_eval::EvaluationType;

mod commands;

#[derive(Parser)]
#[command(
    name = "pathwise",
    version,
    about = "Learning-skill graph and instructional content evaluator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a standard or component and show its skill neighborhood
    Analyze {
        /// Standard identifier (e.g. "3.OA.A.1") or component id
        #[arg(long)]
        standard: String,

        /// Graph document file or directory (overrides config)
        #[arg(long)]
        graph: Option<PathBuf>,

        /// Progression depth in each direction
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Map a free-text skill description onto graph components
    Map {
        /// Skill description to match
        #[arg(long)]
        description: String,

        /// Only consider components tagged with this grade
        #[arg(long)]
        grade: Option<String>,

        /// Graph document file or directory (overrides config)
        #[arg(long)]
        graph: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Build the learning progression around a component
    Progression {
        /// Component id
        #[arg(long)]
        component: String,

        /// Depth in each direction
        #[arg(long)]
        max_depth: Option<usize>,

        /// Graph document file or directory (overrides config)
        #[arg(long)]
        graph: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Evaluate instructional text for complexity and motivation
    Evaluate {
        /// Text to evaluate
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Target grade (e.g. "K", "3", "grade 4")
        #[arg(long)]
        target_grade: Option<String>,

        /// Evaluation type: full, literacy, motivation, standards (default: from config)
        #[arg(long = "type")]
        evaluation_type: Option<EvaluationType>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the evaluation as JSON in the output directory
        #[arg(long)]
        save: bool,

        /// Output directory for --save (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two saved evaluations of a text and its revision
    Compare {
        /// Baseline evaluation JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current evaluation JSON
        #[arg(long)]
        current: PathBuf,

        /// Change threshold on normalised scores
        #[arg(long, default_value = "0.05")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate graph document TOML files
    Validate {
        /// Graph document file or directory
        #[arg(long)]
        graph: PathBuf,
    },

    /// Create starter config and example graph document
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pathwise=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            standard,
            graph,
            max_depth,
            format,
            config,
        } => commands::analyze::execute(standard, graph, max_depth, format, config),
        Commands::Map {
            description,
            grade,
            graph,
            format,
            config,
        } => commands::map::execute(description, grade, graph, format, config),
        Commands::Progression {
            component,
            max_depth,
            graph,
            format,
            config,
        } => commands::progression::execute(component, max_depth, graph, format, config),
        Commands::Evaluate {
            text,
            file,
            target_grade,
            evaluation_type,
            format,
            save,
            output,
            config,
        } => commands::evaluate::execute(commands::evaluate::EvaluateArgs {
            text,
            file,
            target_grade,
            evaluation_type,
            format,
            save,
            output,
            config,
        }),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { graph } => commands::validate::execute(graph),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
