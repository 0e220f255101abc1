use crate::model::label::{GroupKey, Label};

#[derive(Debug, Clone, PartialEq)]
pub struct AncestryRecord {
    pub sample_id: String,
    pub superpopulation: Label,
    pub population: Label,
    pub proportions: Vec<f64>,
}

impl AncestryRecord {
    pub fn group_key(&self) -> GroupKey {
        GroupKey::new(self.superpopulation.clone(), self.population.clone())
    }

    pub fn proportion_sum(&self) -> f64 {
        self.proportions.iter().sum()
    }
}

/// The joined per-sample table every downstream stage reads.
#[derive(Debug, Clone, PartialEq)]
pub struct AncestryTable {
    pub components: Vec<String>,
    pub records: Vec<AncestryRecord>,
}

impl AncestryTable {
    pub fn k(&self) -> usize {
        self.components.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Default component names: A, B, C, ... and `K27`, `K28`, ... past the alphabet.
pub fn default_component_names(k: usize) -> Vec<String> {
    (0..k)
        .map(|i| {
            if i < 26 {
                char::from(b'A' + i as u8).to_string()
            } else {
                format!("K{}", i + 1)
            }
        })
        .collect()
}
