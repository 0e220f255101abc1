use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::input::InputError;
use crate::input::pedigree::PedigreeRow;
use crate::input::qmatrix::QMatrix;
use crate::input::samples::{SampleMeta, SampleTable};
use crate::model::record::{AncestryRecord, AncestryTable};
use crate::pipeline::stage1_dictionary::MetadataDictionaries;

/// Bookkeeping for everything the join could lose or fail to resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinAudit {
    pub n_pedigree: usize,
    pub n_metadata: usize,
    pub n_joined: usize,
    pub unmatched_pedigree: Vec<String>,
    pub unmatched_metadata: Vec<String>,
    pub duplicate_metadata: Vec<String>,
    pub unresolved_populations: BTreeSet<String>,
    pub unresolved_superpopulations: BTreeSet<String>,
    pub records_missing_population: usize,
    pub records_missing_superpopulation: usize,
    pub proportion_violations: usize,
    pub max_proportion_deviation: f64,
}

impl JoinAudit {
    pub fn has_referential_gaps(&self) -> bool {
        !self.unresolved_populations.is_empty() || !self.unresolved_superpopulations.is_empty()
    }

    pub fn has_unmatched(&self) -> bool {
        !self.unmatched_pedigree.is_empty() || !self.unmatched_metadata.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub table: AncestryTable,
    pub audit: JoinAudit,
}

pub struct Stage2Inputs<'a> {
    pub q_matrix: &'a QMatrix,
    pub pedigree: &'a [PedigreeRow],
    pub samples: &'a SampleTable,
    pub dictionaries: &'a MetadataDictionaries,
    pub components: &'a [String],
    pub proportion_tolerance: f64,
}

pub fn run_stage2(inputs: &Stage2Inputs<'_>) -> Result<Stage2Output, InputError> {
    let q = inputs.q_matrix;
    if q.rows.len() != inputs.pedigree.len() {
        return Err(InputError::RowCountMismatch {
            left: "Q matrix".to_string(),
            left_rows: q.rows.len(),
            right: "pedigree".to_string(),
            right_rows: inputs.pedigree.len(),
        });
    }
    if inputs.components.len() != q.k {
        return Err(InputError::InvalidInput(format!(
            "{} component names given for a Q matrix with K={}",
            inputs.components.len(),
            q.k
        )));
    }

    let mut audit = JoinAudit {
        n_pedigree: inputs.pedigree.len(),
        n_metadata: inputs.samples.rows.len(),
        ..JoinAudit::default()
    };

    let mut meta_by_id: HashMap<&str, &SampleMeta> = HashMap::with_capacity(inputs.samples.rows.len());
    for meta in &inputs.samples.rows {
        if meta_by_id.contains_key(meta.sample_id.as_str()) {
            tracing::warn!(
                sample = %meta.sample_id,
                "duplicate sample in metadata; keeping first"
            );
            audit.duplicate_metadata.push(meta.sample_id.clone());
            continue;
        }
        meta_by_id.insert(meta.sample_id.as_str(), meta);
    }

    let dicts = inputs.dictionaries;
    let mut records = Vec::with_capacity(inputs.pedigree.len());
    let mut joined_ids: HashSet<&str> = HashSet::with_capacity(inputs.pedigree.len());

    for (row, proportions) in inputs.pedigree.iter().zip(&q.rows) {
        let Some(meta) = meta_by_id.get(row.sample_id.as_str()) else {
            audit.unmatched_pedigree.push(row.sample_id.clone());
            continue;
        };
        joined_ids.insert(row.sample_id.as_str());

        let population = dicts.populations.resolve(&meta.population_code);
        if population.is_missing() {
            audit
                .unresolved_populations
                .insert(meta.population_code.clone());
            audit.records_missing_population += 1;
        }
        let superpopulation = dicts.superpopulations.resolve(&meta.superpopulation_code);
        if superpopulation.is_missing() {
            audit
                .unresolved_superpopulations
                .insert(meta.superpopulation_code.clone());
            audit.records_missing_superpopulation += 1;
        }

        let record = AncestryRecord {
            sample_id: row.sample_id.clone(),
            superpopulation,
            population,
            proportions: proportions.clone(),
        };
        let deviation = (record.proportion_sum() - 1.0).abs();
        if deviation > inputs.proportion_tolerance {
            audit.proportion_violations += 1;
        }
        if deviation > audit.max_proportion_deviation {
            audit.max_proportion_deviation = deviation;
        }
        records.push(record);
    }

    audit.unmatched_metadata = inputs
        .samples
        .rows
        .iter()
        .filter(|m| !joined_ids.contains(m.sample_id.as_str()))
        .map(|m| m.sample_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    audit.n_joined = records.len();

    log_audit(&audit, inputs.proportion_tolerance);

    Ok(Stage2Output {
        table: AncestryTable {
            components: inputs.components.to_vec(),
            records,
        },
        audit,
    })
}

fn log_audit(audit: &JoinAudit, tolerance: f64) {
    tracing::info!(
        pedigree = audit.n_pedigree,
        metadata = audit.n_metadata,
        joined = audit.n_joined,
        "joined ancestry records"
    );
    if !audit.unmatched_pedigree.is_empty() {
        tracing::warn!(
            count = audit.unmatched_pedigree.len(),
            "pedigree samples without metadata were dropped from the join"
        );
    }
    if !audit.unmatched_metadata.is_empty() {
        tracing::warn!(
            count = audit.unmatched_metadata.len(),
            "metadata samples absent from the pedigree"
        );
    }
    if !audit.unresolved_populations.is_empty() {
        tracing::warn!(
            codes = ?audit.unresolved_populations,
            records = audit.records_missing_population,
            "population codes without a description"
        );
    }
    if !audit.unresolved_superpopulations.is_empty() {
        tracing::warn!(
            codes = ?audit.unresolved_superpopulations,
            records = audit.records_missing_superpopulation,
            "superpopulation codes without a description"
        );
    }
    if audit.proportion_violations > 0 {
        tracing::warn!(
            rows = audit.proportion_violations,
            max_deviation = audit.max_proportion_deviation,
            tolerance,
            "ancestry proportions do not sum to 1"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_join.rs"]
mod tests;
