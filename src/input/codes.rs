use std::path::Path;

use crate::input::{InputError, read_data_lines};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRow {
    pub code: String,
    pub description: String,
}

/// A code -> description table such as the population or superpopulation sheet.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    pub rows: Vec<CodeRow>,
}

const CODE_HEADERS: &[&str] = &["population code", "code"];
const DESCRIPTION_HEADERS: &[&str] = &["population description", "description"];

pub fn parse_code_table(path: &Path) -> Result<CodeTable, InputError> {
    let lines = read_data_lines(path)?;
    let Some(((_, header), body)) = lines.split_first() else {
        return Err(InputError::parse(path, 1, "metadata table is empty"));
    };

    let header_cols: Vec<String> = header
        .split('\t')
        .map(|s| s.trim().to_ascii_lowercase())
        .collect();
    if header_cols.len() < 2 {
        return Err(InputError::MissingColumn {
            path: path.display().to_string(),
            column: "Description".to_string(),
        });
    }

    let code_found = find_column(&header_cols, CODE_HEADERS);
    let desc_found = find_column(&header_cols, DESCRIPTION_HEADERS);
    let code_col = code_found.unwrap_or_else(|| first_other(desc_found));
    let desc_col = desc_found.unwrap_or_else(|| first_other(Some(code_col)));
    if code_found.is_none() || desc_found.is_none() {
        tracing::warn!(
            path = %path.display(),
            code_column = code_col + 1,
            description_column = desc_col + 1,
            "metadata header lacks a code or description column; using positional fallback"
        );
    }

    let mut rows = Vec::with_capacity(body.len());
    for (line_no, line) in body {
        let fields: Vec<&str> = line.split('\t').collect();
        let code = fields.get(code_col).map(|s| s.trim()).unwrap_or("");
        if code.is_empty() {
            tracing::warn!(path = %path.display(), line = line_no, "metadata row has no code; skipping");
            continue;
        }
        let description = fields.get(desc_col).map(|s| s.trim()).unwrap_or("");
        // Blank descriptions stay unresolved instead of becoming blank labels.
        if description.is_empty() {
            tracing::warn!(
                path = %path.display(),
                line = line_no,
                code,
                "metadata row has no description; code will resolve as missing"
            );
            continue;
        }
        rows.push(CodeRow {
            code: code.to_string(),
            description: description.to_string(),
        });
    }

    Ok(CodeTable { rows })
}

/// Lowest column index other than `taken`.
fn first_other(taken: Option<usize>) -> usize {
    if taken == Some(0) { 1 } else { 0 }
}

fn find_column(header: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|name| header.iter().position(|h| h == name))
}
