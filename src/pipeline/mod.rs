//! Staged batch pipeline: load -> dictionaries -> join -> aggregate -> layout
//! -> figure plans -> outputs. Each stage takes explicit inputs and returns a
//! typed value, so any stage can run on synthetic tables.

use std::path::PathBuf;

use thiserror::Error;

pub mod stage1_dictionary;
pub mod stage2_join;
pub mod stage3_aggregate;
pub mod stage4_layout;
pub mod stage5_heatmap;
pub mod stage6_stacked;
pub mod stage7_output;

use crate::input::{InputError, InputPaths, InputTables, load_inputs};
use crate::model::record::{AncestryTable, default_component_names};
use crate::model::settings::PlotProfile;
use crate::model::summary::GroupSummary;
use crate::render::{FigureFormat, RenderError};
use stage1_dictionary::run_stage1;
use stage2_join::{JoinAudit, Stage2Inputs, run_stage2};
use stage3_aggregate::run_stage3;
use stage4_layout::{Stage4Output, run_stage4};
use stage5_heatmap::{HeatmapPlan, run_stage5};
use stage6_stacked::{StackedPlan, run_stage6};
use stage7_output::{OutputPaths, write_outputs};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("referential integrity: {0}")]
    Integrity(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub inputs: InputPaths,
    pub out_dir: PathBuf,
    pub components: Option<Vec<String>>,
    pub format: FigureFormat,
    pub profile: PlotProfile,
    pub write_report: bool,
    pub strict: bool,
}

/// In-memory result of every stage before anything is written.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: AncestryTable,
    pub audit: JoinAudit,
    pub summaries: Vec<GroupSummary>,
    pub individuals: Stage4Output,
    pub heatmap: HeatmapPlan,
    pub stacked: StackedPlan,
}

pub fn analyze(
    tables: &InputTables,
    components: Option<&[String]>,
    profile: &PlotProfile,
) -> Result<Analysis, PipelineError> {
    let k = tables.q_matrix.k;
    let components = match components {
        Some(names) if names.len() != k => {
            return Err(PipelineError::Config(format!(
                "{} component names given but the Q matrix has K={}",
                names.len(),
                k
            )));
        }
        Some(names) => names.to_vec(),
        None => default_component_names(k),
    };

    let dictionaries = run_stage1(&tables.populations, &tables.superpopulations);
    let stage2 = run_stage2(&Stage2Inputs {
        q_matrix: &tables.q_matrix,
        pedigree: &tables.pedigree,
        samples: &tables.samples,
        dictionaries: &dictionaries,
        components: &components,
        proportion_tolerance: profile.proportion_tolerance,
    })?;
    if stage2.table.is_empty() {
        return Err(PipelineError::Integrity(
            "no samples remain after joining pedigree with sample metadata".to_string(),
        ));
    }

    let summaries = run_stage3(&stage2.table);
    let individuals = run_stage4(&stage2.table);
    let heatmap = run_stage5(&summaries, &stage2.table.components, profile);
    let stacked = run_stage6(&stage2.table, &individuals, profile);

    Ok(Analysis {
        table: stage2.table,
        audit: stage2.audit,
        summaries,
        individuals,
        heatmap,
        stacked,
    })
}

/// Referential gaps and unmatched samples become errors in strict mode.
pub fn check_strict(audit: &JoinAudit) -> Result<(), PipelineError> {
    if !audit.has_referential_gaps() && !audit.has_unmatched() {
        return Ok(());
    }
    let mut problems = Vec::new();
    if !audit.unresolved_populations.is_empty() {
        problems.push(format!(
            "unresolved population codes: {}",
            join_codes(audit.unresolved_populations.iter())
        ));
    }
    if !audit.unresolved_superpopulations.is_empty() {
        problems.push(format!(
            "unresolved superpopulation codes: {}",
            join_codes(audit.unresolved_superpopulations.iter())
        ));
    }
    if !audit.unmatched_pedigree.is_empty() {
        problems.push(format!(
            "{} pedigree samples missing from sample metadata",
            audit.unmatched_pedigree.len()
        ));
    }
    if !audit.unmatched_metadata.is_empty() {
        problems.push(format!(
            "{} metadata samples missing from pedigree",
            audit.unmatched_metadata.len()
        ));
    }
    Err(PipelineError::Integrity(problems.join("; ")))
}

fn join_codes<'a>(codes: impl Iterator<Item = &'a String>) -> String {
    codes.map(String::as_str).collect::<Vec<_>>().join(", ")
}

pub fn run(config: &RunConfig) -> Result<OutputPaths, PipelineError> {
    let tables = load_inputs(&config.inputs)?;
    let analysis = analyze(&tables, config.components.as_deref(), &config.profile)?;
    if config.strict {
        check_strict(&analysis.audit)?;
    }
    let paths = write_outputs(&analysis, &config.out_dir, config.format, config.write_report)?;
    tracing::info!(
        heatmap = %paths.heatmap.display(),
        stacked = %paths.stacked.display(),
        "wrote figures"
    );
    Ok(paths)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/fixtures.rs"]
pub(crate) mod fixtures;

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/analyze.rs"]
mod tests;
