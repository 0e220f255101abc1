pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::summary::GroupSummary;
use crate::pipeline::Analysis;
use crate::pipeline::stage2_join::JoinAudit;
use crate::pipeline::stage4_layout::LayoutBreakSet;

pub const TOOL_NAME: &str = "kira-admixture";

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub components: &'a [String],
    pub n_samples: usize,
    pub n_groups: usize,
    pub audit: &'a JoinAudit,
    pub groups: &'a [GroupSummary],
    pub heatmap_separators: &'a [usize],
    pub individuals: &'a LayoutBreakSet,
}

impl<'a> SummaryData<'a> {
    pub fn from_analysis(analysis: &'a Analysis) -> Self {
        Self {
            tool: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
            components: &analysis.table.components,
            n_samples: analysis.table.len(),
            n_groups: analysis.summaries.len(),
            audit: &analysis.audit,
            groups: &analysis.summaries,
            heatmap_separators: &analysis.heatmap.separators,
            individuals: &analysis.individuals.individuals,
        }
    }
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

/// Per-group medians and IQRs, one row per (superpopulation, population).
pub fn render_group_tsv(components: &[String], summaries: &[GroupSummary]) -> String {
    let mut header = vec![
        "superpopulation".to_string(),
        "population".to_string(),
        "n_samples".to_string(),
    ];
    for c in components {
        header.push(format!("median_{c}"));
        header.push(format!("iqr_{c}"));
    }

    let mut out = header.join("\t");
    out.push('\n');
    for summary in summaries {
        let mut row = vec![
            summary.key.superpopulation.to_string(),
            summary.key.population.to_string(),
            summary.n_samples.to_string(),
        ];
        for stat in &summary.stats {
            row.push(format_f64_6(stat.median));
            row.push(format_f64_6(stat.iqr));
        }
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
