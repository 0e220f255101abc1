use std::path::Path;

use crate::input::{InputError, read_data_lines};

/// Ancestry proportions, one row per sample in pedigree order, K columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QMatrix {
    pub k: usize,
    pub rows: Vec<Vec<f64>>,
}

pub fn parse_q_matrix(path: &Path) -> Result<QMatrix, InputError> {
    let lines = read_data_lines(path)?;
    let mut k = 0usize;
    let mut rows = Vec::with_capacity(lines.len());

    for (line_no, line) in &lines {
        let mut row = Vec::with_capacity(k.max(1));
        for token in line.split_ascii_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                InputError::parse(path, *line_no, format!("invalid proportion `{token}`"))
            })?;
            if !value.is_finite() {
                return Err(InputError::parse(
                    path,
                    *line_no,
                    format!("non-finite proportion `{token}`"),
                ));
            }
            row.push(value);
        }
        if rows.is_empty() {
            k = row.len();
        } else if row.len() != k {
            return Err(InputError::parse(
                path,
                *line_no,
                format!("expected {} columns, found {}", k, row.len()),
            ));
        }
        rows.push(row);
    }

    if rows.is_empty() || k == 0 {
        return Err(InputError::InvalidInput(format!(
            "Q matrix {} has no rows",
            path.display()
        )));
    }

    Ok(QMatrix { k, rows })
}
