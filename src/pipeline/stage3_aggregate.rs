use std::collections::BTreeMap;

use crate::model::label::GroupKey;
use crate::model::record::AncestryTable;
use crate::model::summary::{ComponentStat, GroupSummary};

/// Quantile with linear interpolation between closest ranks on sorted data.
pub fn quantile_linear(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = h.ceil() as usize;
            sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}

pub fn component_stat(values: &[f64]) -> ComponentStat {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = quantile_linear(&sorted, 0.25);
    let q3 = quantile_linear(&sorted, 0.75);
    ComponentStat {
        median: quantile_linear(&sorted, 0.5),
        q1,
        q3,
        iqr: q3 - q1,
    }
}

/// One summary per (superpopulation, population), ascending by key.
pub fn run_stage3(table: &AncestryTable) -> Vec<GroupSummary> {
    let k = table.k();
    let mut groups: BTreeMap<GroupKey, Vec<Vec<f64>>> = BTreeMap::new();
    for record in &table.records {
        let columns = groups
            .entry(record.group_key())
            .or_insert_with(|| vec![Vec::new(); k]);
        for (column, &value) in columns.iter_mut().zip(&record.proportions) {
            column.push(value);
        }
    }

    let summaries: Vec<GroupSummary> = groups
        .into_iter()
        .map(|(key, columns)| GroupSummary {
            n_samples: columns.first().map_or(0, Vec::len),
            stats: columns.iter().map(|c| component_stat(c)).collect(),
            key,
        })
        .collect();

    tracing::info!(
        groups = summaries.len(),
        samples = table.len(),
        "aggregated group medians and IQRs"
    );
    summaries
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_aggregate.rs"]
mod tests;
