use crate::input::InputTables;
use crate::input::codes::{CodeRow, CodeTable};
use crate::input::pedigree::PedigreeRow;
use crate::input::qmatrix::QMatrix;
use crate::input::samples::{SampleMeta, SampleTable};

fn codes(rows: &[(&str, &str)]) -> CodeTable {
    CodeTable {
        rows: rows
            .iter()
            .map(|(code, description)| CodeRow {
                code: code.to_string(),
                description: description.to_string(),
            })
            .collect(),
    }
}

/// Eight samples, K=3, two superpopulations with two populations each.
/// `S8` carries a population code absent from the dictionary.
pub fn sample_tables() -> InputTables {
    let rows: [(&str, &str, &str, [f64; 3]); 8] = [
        ("S1", "GBR", "EUR", [0.80, 0.15, 0.05]),
        ("S2", "YRI", "AFR", [0.05, 0.05, 0.90]),
        ("S3", "GBR", "EUR", [0.70, 0.20, 0.10]),
        ("S4", "TSI", "EUR", [0.60, 0.30, 0.10]),
        ("S5", "ESN", "AFR", [0.10, 0.05, 0.85]),
        ("S6", "YRI", "AFR", [0.02, 0.08, 0.90]),
        ("S7", "TSI", "EUR", [0.50, 0.40, 0.10]),
        ("S8", "XYZ", "EUR", [0.30, 0.30, 0.40]),
    ];

    InputTables {
        superpopulations: codes(&[("EUR", "European"), ("AFR", "African")]),
        populations: codes(&[
            ("GBR", "British"),
            ("TSI", "Tuscan"),
            ("YRI", "Yoruba"),
            ("ESN", "Esan"),
        ]),
        q_matrix: QMatrix {
            k: 3,
            rows: rows.iter().map(|r| r.3.to_vec()).collect(),
        },
        pedigree: rows
            .iter()
            .map(|r| PedigreeRow {
                family_id: r.0.to_string(),
                sample_id: r.0.to_string(),
                father_id: None,
                mother_id: None,
                sex: None,
                phenotype: None,
            })
            .collect(),
        samples: SampleTable {
            rows: rows
                .iter()
                .rev()
                .map(|r| SampleMeta {
                    sample_id: r.0.to_string(),
                    population_code: r.1.to_string(),
                    superpopulation_code: r.2.to_string(),
                })
                .collect(),
        },
    }
}
