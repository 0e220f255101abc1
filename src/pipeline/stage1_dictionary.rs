use std::collections::BTreeMap;

use crate::input::codes::CodeTable;
use crate::model::label::Label;

/// One-directional code -> description lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeDictionary {
    entries: BTreeMap<String, String>,
    duplicates: usize,
}

impl CodeDictionary {
    /// Later rows overwrite earlier ones for the same code.
    pub fn from_table(table: &CodeTable) -> Self {
        let mut entries = BTreeMap::new();
        let mut duplicates = 0usize;
        for row in &table.rows {
            if entries
                .insert(row.code.clone(), row.description.clone())
                .is_some()
            {
                duplicates += 1;
            }
        }
        Self {
            entries,
            duplicates,
        }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn resolve(&self, code: &str) -> Label {
        match self.get(code) {
            Some(description) => Label::resolved(description),
            None => Label::missing(code),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataDictionaries {
    pub populations: CodeDictionary,
    pub superpopulations: CodeDictionary,
}

pub fn run_stage1(populations: &CodeTable, superpopulations: &CodeTable) -> MetadataDictionaries {
    let dicts = MetadataDictionaries {
        populations: CodeDictionary::from_table(populations),
        superpopulations: CodeDictionary::from_table(superpopulations),
    };
    for (name, dict) in [
        ("population", &dicts.populations),
        ("superpopulation", &dicts.superpopulations),
    ] {
        if dict.is_empty() {
            tracing::warn!(table = name, "metadata table has no codes; every label will be missing");
        }
        if dict.duplicates() > 0 {
            tracing::warn!(
                table = name,
                duplicates = dict.duplicates(),
                "duplicate codes in metadata; last entry wins"
            );
        }
    }
    tracing::info!(
        populations = dicts.populations.len(),
        superpopulations = dicts.superpopulations.len(),
        "built metadata dictionaries"
    );
    dicts
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_dictionary.rs"]
mod tests;
