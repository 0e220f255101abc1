use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod codes;
pub mod pedigree;
pub mod qmatrix;
pub mod samples;

use codes::{CodeTable, parse_code_table};
use pedigree::{PedigreeRow, parse_pedigree};
use qmatrix::{QMatrix, parse_q_matrix};
use samples::{SampleTable, parse_sample_table};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("{path}: missing required column `{column}`")]
    MissingColumn { path: String, column: String },
    #[error("{path}:{line}: {msg}")]
    Parse {
        path: String,
        line: usize,
        msg: String,
    },
    #[error("row count mismatch: {left} has {left_rows} rows but {right} has {right_rows}")]
    RowCountMismatch {
        left: String,
        left_rows: usize,
        right: String,
        right_rows: usize,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl InputError {
    pub(crate) fn parse(path: &Path, line: usize, msg: impl Into<String>) -> Self {
        InputError::Parse {
            path: path.display().to_string(),
            line,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputPaths {
    pub superpopulations: PathBuf,
    pub populations: PathBuf,
    pub q_matrix: PathBuf,
    pub pedigree: PathBuf,
    pub samples: PathBuf,
}

/// Every table the pipeline reads, parsed but not yet joined.
#[derive(Debug, Clone)]
pub struct InputTables {
    pub superpopulations: CodeTable,
    pub populations: CodeTable,
    pub q_matrix: QMatrix,
    pub pedigree: Vec<PedigreeRow>,
    pub samples: SampleTable,
}

pub fn load_inputs(paths: &InputPaths) -> Result<InputTables, InputError> {
    for (name, path) in [
        ("superpopulation metadata", &paths.superpopulations),
        ("population metadata", &paths.populations),
        ("Q matrix", &paths.q_matrix),
        ("pedigree", &paths.pedigree),
        ("sample metadata", &paths.samples),
    ] {
        if !path.is_file() {
            return Err(InputError::MissingInput(format!(
                "{} file not found: {}",
                name,
                path.display()
            )));
        }
    }

    let superpopulations = parse_code_table(&paths.superpopulations)?;
    let populations = parse_code_table(&paths.populations)?;
    let q_matrix = parse_q_matrix(&paths.q_matrix)?;
    let pedigree = parse_pedigree(&paths.pedigree)?;
    let samples = parse_sample_table(&paths.samples)?;

    tracing::info!(
        superpopulations = superpopulations.rows.len(),
        populations = populations.rows.len(),
        q_rows = q_matrix.rows.len(),
        k = q_matrix.k,
        pedigree = pedigree.len(),
        samples = samples.rows.len(),
        "loaded input tables"
    );

    Ok(InputTables {
        superpopulations,
        populations,
        q_matrix,
        pedigree,
        samples,
    })
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads the non-blank, non-comment lines of a table with their 1-based line numbers.
pub(crate) fn read_data_lines(path: &Path) -> Result<Vec<(usize, String)>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        out.push((line_no, line.to_string()));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
