use std::collections::HashSet;
use std::path::Path;

use crate::input::{InputError, read_data_lines};

/// One `.fam` row. Only the first two columns are required; the pedigree-only
/// fields are carried when present and dropped at the join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedigreeRow {
    pub family_id: String,
    pub sample_id: String,
    pub father_id: Option<String>,
    pub mother_id: Option<String>,
    pub sex: Option<String>,
    pub phenotype: Option<String>,
}

pub fn parse_pedigree(path: &Path) -> Result<Vec<PedigreeRow>, InputError> {
    let lines = read_data_lines(path)?;
    let mut rows = Vec::with_capacity(lines.len());
    let mut seen: HashSet<String> = HashSet::with_capacity(lines.len());

    for (line_no, line) in &lines {
        let fields: Vec<&str> = line.split_ascii_whitespace().collect();
        if fields.len() < 2 {
            return Err(InputError::parse(
                path,
                *line_no,
                "pedigree row needs at least FamilyID and SampleID",
            ));
        }
        let sample_id = fields[1].to_string();
        if !seen.insert(sample_id.clone()) {
            return Err(InputError::parse(
                path,
                *line_no,
                format!("duplicate SampleID `{sample_id}`"),
            ));
        }
        let opt = |idx: usize| fields.get(idx).map(|s| s.to_string());
        rows.push(PedigreeRow {
            family_id: fields[0].to_string(),
            sample_id,
            father_id: opt(2),
            mother_id: opt(3),
            sex: opt(4),
            phenotype: opt(5),
        });
    }

    Ok(rows)
}
