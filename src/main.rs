mod input;
mod logging;
mod model;
mod pipeline;
mod render;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::input::InputPaths;
use crate::model::settings::PlotProfile;
use crate::pipeline::{PipelineError, RunConfig};
use crate::render::FigureFormat;

#[derive(Debug, Parser)]
#[command(
    name = "kira-admixture",
    version,
    about = "Summarize and plot ancestry-admixture proportions by population hierarchy"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Join inputs, aggregate by population, and write both figures.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Superpopulation code/description table (TSV with header).
    #[arg(long, value_name = "TSV")]
    superpopulations: PathBuf,
    /// Population code/description table (TSV with header).
    #[arg(long, value_name = "TSV")]
    populations: PathBuf,
    /// Ancestry proportion matrix, one row per pedigree sample.
    #[arg(long, value_name = "Q")]
    q: PathBuf,
    /// Pedigree file aligned row-by-row with the Q matrix.
    #[arg(long, value_name = "FAM")]
    fam: PathBuf,
    /// Sample metadata with SampleID, Population, Superpopulation columns.
    #[arg(long, value_name = "FILE")]
    samples: PathBuf,
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Comma-separated component names; defaults to A, B, C, ...
    #[arg(long, value_delimiter = ',')]
    components: Option<Vec<String>>,
    /// Figure format. Vector SVG stands in for PDF, which the plotting
    /// backend cannot write; PNG gives a raster.
    #[arg(long, default_value = "svg", value_parser = ["svg", "png"])]
    format: String,
    /// Figure size multiplier.
    #[arg(long, default_value_t = 2.0)]
    scale: f64,
    /// Also write group_summary.tsv, summary.json and report.txt.
    #[arg(long)]
    report: bool,
    /// Fail on unresolved metadata codes or unmatched samples.
    #[arg(long)]
    strict: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("[ERROR] {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), PipelineError> {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    logging::init_logging(&args.log_level).map_err(PipelineError::Config)?;
    let config = build_config(args)?;
    pipeline::run(&config)?;
    Ok(())
}

fn build_config(args: RunArgs) -> Result<RunConfig, PipelineError> {
    if !(args.scale.is_finite() && args.scale > 0.0) {
        return Err(PipelineError::Config(format!(
            "--scale must be positive, got {}",
            args.scale
        )));
    }
    let components = args.components.map(|names| {
        names
            .into_iter()
            .map(|n| n.trim().to_string())
            .collect::<Vec<_>>()
    });
    if let Some(names) = &components {
        if names.iter().any(|n| n.is_empty()) {
            return Err(PipelineError::Config(
                "--components contains an empty name".to_string(),
            ));
        }
    }

    Ok(RunConfig {
        inputs: InputPaths {
            superpopulations: args.superpopulations,
            populations: args.populations,
            q_matrix: args.q,
            pedigree: args.fam,
            samples: args.samples,
        },
        out_dir: args.out,
        components,
        format: FigureFormat::parse(&args.format)?,
        profile: PlotProfile::default_v1().with_scale(args.scale),
        write_report: args.report,
        strict: args.strict,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
