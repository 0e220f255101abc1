use std::cmp::Ordering;

use serde::Serialize;

use crate::model::label::{GroupKey, Label};
use crate::model::record::AncestryTable;

/// A maximal stretch `[start, end)` of equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run<K> {
    pub key: K,
    pub start: usize,
    pub end: usize,
}

impl<K> Run<K> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        self.start as f64 + self.len() as f64 / 2.0
    }
}

/// Indices `i` in `[1, n)` where the key differs from its predecessor.
pub fn break_positions<K: PartialEq>(keys: &[K]) -> Vec<usize> {
    keys.windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] != pair[1])
        .map(|(i, _)| i + 1)
        .collect()
}

/// Run-length encoding of `keys` in order of first appearance.
pub fn runs<K: PartialEq + Clone>(keys: &[K]) -> Vec<Run<K>> {
    let mut out: Vec<Run<K>> = Vec::new();
    let mut start = 0usize;
    for end in break_positions(keys)
        .into_iter()
        .chain((!keys.is_empty()).then_some(keys.len()))
    {
        out.push(Run {
            key: keys[start].clone(),
            start,
            end,
        });
        start = end;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledRun {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub midpoint: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LevelLayout {
    pub breaks: Vec<usize>,
    pub runs: Vec<LabelledRun>,
}

impl LevelLayout {
    fn from_keys<K: PartialEq + Clone>(keys: &[K], label: impl Fn(&K) -> String) -> Self {
        let runs = runs(keys)
            .into_iter()
            .map(|run| LabelledRun {
                label: label(&run.key),
                midpoint: run.midpoint(),
                start: run.start,
                end: run.end,
            })
            .collect();
        Self {
            breaks: break_positions(keys),
            runs,
        }
    }
}

/// Break positions at both hierarchy levels over one sorted key sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayoutBreakSet {
    pub n: usize,
    pub superpopulation: LevelLayout,
    pub population: LevelLayout,
}

/// `keys` must already be in hierarchy order. Population runs are keyed on
/// the full pair so a shared population name under two superpopulations
/// still splits.
pub fn hierarchy_layout(keys: &[GroupKey]) -> LayoutBreakSet {
    let superpops: Vec<&Label> = keys.iter().map(|k| &k.superpopulation).collect();
    LayoutBreakSet {
        n: keys.len(),
        superpopulation: LevelLayout::from_keys(&superpops, |l| l.to_string()),
        population: LevelLayout::from_keys(keys, |k| k.population.to_string()),
    }
}

fn compare_records(table: &AncestryTable, a: usize, b: usize) -> Ordering {
    let ra = &table.records[a];
    let rb = &table.records[b];
    ra.superpopulation
        .cmp(&rb.superpopulation)
        .then_with(|| ra.population.cmp(&rb.population))
        .then_with(|| {
            ra.proportions
                .iter()
                .zip(&rb.proportions)
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| ra.sample_id.cmp(&rb.sample_id))
}

/// Record indices in (superpopulation, population, proportions, sample id) order.
pub fn individual_order(table: &AncestryTable) -> Vec<usize> {
    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by(|&a, &b| compare_records(table, a, b));
    order
}

#[derive(Debug, Clone)]
pub struct Stage4Output {
    pub order: Vec<usize>,
    pub individuals: LayoutBreakSet,
}

pub fn run_stage4(table: &AncestryTable) -> Stage4Output {
    let order = individual_order(table);
    let keys: Vec<GroupKey> = order.iter().map(|&i| table.records[i].group_key()).collect();
    let individuals = hierarchy_layout(&keys);
    tracing::debug!(
        superpopulation_breaks = ?individuals.superpopulation.breaks,
        population_breaks = ?individuals.population.breaks,
        "computed individual layout"
    );
    tracing::info!(
        individuals = order.len(),
        superpopulations = individuals.superpopulation.runs.len(),
        populations = individuals.population.runs.len(),
        "ordered individuals by hierarchy"
    );
    Stage4Output { order, individuals }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_layout.rs"]
mod tests;
