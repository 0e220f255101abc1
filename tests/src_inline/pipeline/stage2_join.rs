use super::*;
use crate::input::codes::{CodeRow, CodeTable};
use crate::model::label::Label;
use crate::pipeline::stage1_dictionary::run_stage1;

fn codes(rows: &[(&str, &str)]) -> CodeTable {
    CodeTable {
        rows: rows
            .iter()
            .map(|(c, d)| CodeRow {
                code: c.to_string(),
                description: d.to_string(),
            })
            .collect(),
    }
}

fn pedigree(ids: &[&str]) -> Vec<PedigreeRow> {
    ids.iter()
        .map(|id| PedigreeRow {
            family_id: format!("F{id}"),
            sample_id: id.to_string(),
            father_id: Some("0".to_string()),
            mother_id: Some("0".to_string()),
            sex: Some("1".to_string()),
            phenotype: Some("-9".to_string()),
        })
        .collect()
}

fn samples(rows: &[(&str, &str, &str)]) -> SampleTable {
    SampleTable {
        rows: rows
            .iter()
            .map(|(id, pop, sp)| SampleMeta {
                sample_id: id.to_string(),
                population_code: pop.to_string(),
                superpopulation_code: sp.to_string(),
            })
            .collect(),
    }
}

fn dictionaries() -> MetadataDictionaries {
    run_stage1(
        &codes(&[("GBR", "British"), ("YRI", "Yoruba")]),
        &codes(&[("EUR", "European"), ("AFR", "African")]),
    )
}

fn components() -> Vec<String> {
    vec!["A".to_string(), "B".to_string()]
}

fn q(rows: &[[f64; 2]]) -> QMatrix {
    QMatrix {
        k: 2,
        rows: rows.iter().map(|r| r.to_vec()).collect(),
    }
}

#[test]
fn test_join_complete_keeps_pedigree_order() {
    let q = q(&[[0.9, 0.1], [0.2, 0.8], [0.6, 0.4]]);
    let ped = pedigree(&["S1", "S2", "S3"]);
    let meta = samples(&[
        ("S3", "GBR", "EUR"),
        ("S1", "GBR", "EUR"),
        ("S2", "YRI", "AFR"),
    ]);
    let dicts = dictionaries();
    let comps = components();
    let out = run_stage2(&Stage2Inputs {
        q_matrix: &q,
        pedigree: &ped,
        samples: &meta,
        dictionaries: &dicts,
        components: &comps,
        proportion_tolerance: 1e-3,
    })
    .unwrap();

    assert_eq!(out.table.len(), ped.len());
    assert_eq!(out.audit.n_joined, out.audit.n_pedigree);
    let ids: Vec<&str> = out.table.records.iter().map(|r| r.sample_id.as_str()).collect();
    assert_eq!(ids, vec!["S1", "S2", "S3"]);
    assert_eq!(out.table.records[1].proportions, vec![0.2, 0.8]);
    assert_eq!(out.table.records[1].population, Label::resolved("Yoruba"));
    assert_eq!(out.table.records[1].superpopulation, Label::resolved("African"));
    assert!(!out.audit.has_referential_gaps());
    assert!(!out.audit.has_unmatched());
    assert_eq!(out.audit.proportion_violations, 0);
}

#[test]
fn test_row_count_mismatch_is_fatal() {
    let q = q(&[[0.5, 0.5]]);
    let ped = pedigree(&["S1", "S2"]);
    let meta = samples(&[("S1", "GBR", "EUR"), ("S2", "GBR", "EUR")]);
    let dicts = dictionaries();
    let comps = components();
    let err = run_stage2(&Stage2Inputs {
        q_matrix: &q,
        pedigree: &ped,
        samples: &meta,
        dictionaries: &dicts,
        components: &comps,
        proportion_tolerance: 1e-3,
    })
    .unwrap_err();
    assert!(matches!(
        err,
        InputError::RowCountMismatch {
            left_rows: 1,
            right_rows: 2,
            ..
        }
    ));
}

#[test]
fn test_unmatched_samples_are_counted() {
    let q = q(&[[0.5, 0.5], [0.5, 0.5]]);
    let ped = pedigree(&["S1", "S2"]);
    let meta = samples(&[
        ("S1", "GBR", "EUR"),
        ("S9", "GBR", "EUR"),
        ("S1", "YRI", "AFR"),
    ]);
    let dicts = dictionaries();
    let comps = components();
    let out = run_stage2(&Stage2Inputs {
        q_matrix: &q,
        pedigree: &ped,
        samples: &meta,
        dictionaries: &dicts,
        components: &comps,
        proportion_tolerance: 1e-3,
    })
    .unwrap();
    assert_eq!(out.audit.n_pedigree, 2);
    assert_eq!(out.audit.n_joined, 1);
    assert_eq!(out.audit.unmatched_pedigree, vec!["S2".to_string()]);
    assert_eq!(out.audit.unmatched_metadata, vec!["S9".to_string()]);
    assert_eq!(out.audit.duplicate_metadata, vec!["S1".to_string()]);
    // First metadata row wins for a duplicated sample.
    assert_eq!(out.table.records[0].population, Label::resolved("British"));
}

#[test]
fn test_missing_population_is_visible() {
    let q = q(&[[0.5, 0.5], [0.3, 0.7]]);
    let ped = pedigree(&["S1", "S2"]);
    let meta = samples(&[("S1", "ZZZ", "EUR"), ("S2", "GBR", "QQQ")]);
    let dicts = dictionaries();
    let comps = components();
    let out = run_stage2(&Stage2Inputs {
        q_matrix: &q,
        pedigree: &ped,
        samples: &meta,
        dictionaries: &dicts,
        components: &comps,
        proportion_tolerance: 1e-3,
    })
    .unwrap();

    assert_eq!(out.table.len(), 2);
    assert_eq!(out.table.records[0].population, Label::missing("ZZZ"));
    let missing_pop = out.table.records.iter().filter(|r| r.population.is_missing()).count();
    let missing_sp = out
        .table
        .records
        .iter()
        .filter(|r| r.superpopulation.is_missing())
        .count();
    assert_eq!(missing_pop, 1);
    assert_eq!(missing_sp, 1);
    assert!(!out.audit.has_unmatched());
    assert!(out.audit.unresolved_populations.contains("ZZZ"));
    assert!(out.audit.unresolved_superpopulations.contains("QQQ"));
    assert_eq!(out.audit.records_missing_population, 1);
    assert!(out.audit.has_referential_gaps());
}

#[test]
fn test_proportion_sum_checked_not_rewritten() {
    let q = q(&[[0.5, 0.4995], [0.5, 0.45]]);
    let ped = pedigree(&["S1", "S2"]);
    let meta = samples(&[("S1", "GBR", "EUR"), ("S2", "GBR", "EUR")]);
    let dicts = dictionaries();
    let comps = components();
    let out = run_stage2(&Stage2Inputs {
        q_matrix: &q,
        pedigree: &ped,
        samples: &meta,
        dictionaries: &dicts,
        components: &comps,
        proportion_tolerance: 1e-3,
    })
    .unwrap();
    assert_eq!(out.audit.proportion_violations, 1);
    assert!((out.audit.max_proportion_deviation - 0.05).abs() < 1e-9);
    assert_eq!(out.table.records[1].proportions, vec![0.5, 0.45]);
    for record in &out.table.records[..1] {
        assert!((record.proportion_sum() - 1.0).abs() <= 1e-3);
    }
}

#[test]
fn test_component_count_must_match_k() {
    let q = q(&[[0.5, 0.5]]);
    let ped = pedigree(&["S1"]);
    let meta = samples(&[("S1", "GBR", "EUR")]);
    let dicts = dictionaries();
    let comps = vec!["A".to_string()];
    assert!(
        run_stage2(&Stage2Inputs {
            q_matrix: &q,
            pedigree: &ped,
            samples: &meta,
            dictionaries: &dicts,
            components: &comps,
            proportion_tolerance: 1e-3,
        })
        .is_err()
    );
}
