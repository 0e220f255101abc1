use serde::Serialize;

use crate::model::label::GroupKey;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentStat {
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub n_samples: usize,
    pub stats: Vec<ComponentStat>,
}
