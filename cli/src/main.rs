use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use linkrec::{run_build_index, run_suggest};

#[derive(Parser)]
#[command(name = "linkrec")]
#[command(about = "Semantic internal-link recommendations for a static site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the TF-IDF index over the site's blog pages
    BuildIndex {
        /// Site root directory
        #[arg(long)]
        root: PathBuf,
        /// Blog directory, relative to the root
        #[arg(long = "blogs_dir", default_value = "blogs")]
        blogs_dir: String,
        /// Index output path
        #[arg(long, default_value = "link_index.json")]
        out: PathBuf,
    },
    /// Recommend links for a draft against an existing index
    Suggest {
        /// Index file path
        #[arg(long)]
        index: PathBuf,
        /// Input draft (.md or .html)
        #[arg(long)]
        input: PathBuf,
        /// Report output path
        #[arg(long, default_value = "link_suggestions_REPORT.md")]
        report: PathBuf,
        /// Matches kept per candidate term
        #[arg(long, default_value_t = 3)]
        topk: usize,
        /// Minimum cosine similarity for a match
        #[arg(long, default_value_t = 0.7)]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildIndex { root, blogs_dir, out } => {
            let docs = run_build_index(&root, &blogs_dir, &out)?;
            println!("Index written: {} ({} docs)", out.display(), docs);
        }
        Commands::Suggest { index, input, report, topk, threshold } => {
            let rows = run_suggest(&index, &input, &report, topk, threshold)?;
            println!("Report written: {} ({} rows)", report.display(), rows);
        }
    }
    Ok(())
}
