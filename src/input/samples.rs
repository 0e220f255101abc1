use std::path::Path;

use crate::input::{InputError, read_data_lines};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleMeta {
    pub sample_id: String,
    pub population_code: String,
    pub superpopulation_code: String,
}

#[derive(Debug, Clone, Default)]
pub struct SampleTable {
    pub rows: Vec<SampleMeta>,
}

pub const COL_SAMPLE: &str = "SampleID";
pub const COL_POPULATION: &str = "Population";
pub const COL_SUPERPOPULATION: &str = "Superpopulation";

pub fn parse_sample_table(path: &Path) -> Result<SampleTable, InputError> {
    let lines = read_data_lines(path)?;
    let Some(((_, header), body)) = lines.split_first() else {
        return Err(InputError::parse(path, 1, "sample metadata is empty"));
    };

    let header_cols: Vec<&str> = header.split_ascii_whitespace().collect();
    let column = |name: &str| -> Result<usize, InputError> {
        header_cols
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| InputError::MissingColumn {
                path: path.display().to_string(),
                column: name.to_string(),
            })
    };
    let sample_col = column(COL_SAMPLE)?;
    let pop_col = column(COL_POPULATION)?;
    let superpop_col = column(COL_SUPERPOPULATION)?;
    let needed = sample_col.max(pop_col).max(superpop_col);

    let mut rows = Vec::with_capacity(body.len());
    for (line_no, line) in body {
        let fields: Vec<&str> = line.split_ascii_whitespace().collect();
        if fields.len() <= needed {
            return Err(InputError::parse(
                path,
                *line_no,
                format!(
                    "expected at least {} columns, found {}",
                    needed + 1,
                    fields.len()
                ),
            ));
        }
        rows.push(SampleMeta {
            sample_id: fields[sample_col].to_string(),
            population_code: fields[pop_col].to_string(),
            superpopulation_code: fields[superpop_col].to_string(),
        });
    }

    Ok(SampleTable { rows })
}
