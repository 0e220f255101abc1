use super::*;
use crate::model::record::AncestryRecord;

fn key(sp: &str, pop: &str) -> GroupKey {
    GroupKey::new(Label::resolved(sp), Label::resolved(pop))
}

fn record(id: &str, sp: &str, pop: &str, proportions: &[f64]) -> AncestryRecord {
    AncestryRecord {
        sample_id: id.to_string(),
        superpopulation: Label::resolved(sp),
        population: Label::resolved(pop),
        proportions: proportions.to_vec(),
    }
}

#[test]
fn test_breaks_and_midpoints() {
    let keys = ["X", "X", "Y", "Y", "Y", "Z"];
    assert_eq!(break_positions(&keys), vec![2, 5]);
    let runs = runs(&keys);
    let midpoints: Vec<f64> = runs.iter().map(Run::midpoint).collect();
    assert_eq!(midpoints, vec![1.0, 3.5, 5.5]);
    assert_eq!(runs[1].key, "Y");
    assert_eq!((runs[1].start, runs[1].end), (2, 5));
}

#[test]
fn test_size_one_groups_and_empty_input() {
    let keys = [1, 2, 3];
    assert_eq!(break_positions(&keys), vec![1, 2]);
    let r = runs(&keys);
    assert_eq!(r.len(), 3);
    assert!(r.iter().all(|run| run.len() == 1));
    assert_eq!(r[2].midpoint(), 2.5);

    let empty: [u8; 0] = [];
    assert!(break_positions(&empty).is_empty());
    assert!(runs(&empty).is_empty());

    assert!(break_positions(&["only"]).is_empty());
    assert_eq!(runs(&["only"]).len(), 1);
}

#[test]
fn test_breaks_stay_in_range() {
    let keys = ["a", "b", "b", "c", "a", "a"];
    let breaks = break_positions(&keys);
    assert!(breaks.iter().all(|&b| b >= 1 && b < keys.len()));
    assert!(breaks.windows(2).all(|w| w[0] < w[1]));
    let total: usize = runs(&keys).iter().map(Run::len).sum();
    assert_eq!(total, keys.len());
}

#[test]
fn test_hierarchy_layout_both_levels() {
    let keys = vec![
        key("African", "Esan"),
        key("African", "Yoruba"),
        key("European", "British"),
        key("European", "Finnish"),
        key("European", "Tuscan"),
    ];
    let layout = hierarchy_layout(&keys);
    assert_eq!(layout.n, 5);
    assert_eq!(layout.superpopulation.breaks, vec![2]);
    assert_eq!(layout.population.breaks, vec![1, 2, 3, 4]);
    let sp: Vec<&str> = layout
        .superpopulation
        .runs
        .iter()
        .map(|r| r.label.as_str())
        .collect();
    assert_eq!(sp, vec!["African", "European"]);
    assert_eq!(layout.superpopulation.runs[1].midpoint, 3.5);
    assert_eq!(layout.population.runs[4].label, "Tuscan");
}

#[test]
fn test_shared_population_name_splits_across_superpopulations() {
    let keys = vec![key("A", "Mixed"), key("B", "Mixed")];
    let layout = hierarchy_layout(&keys);
    assert_eq!(layout.population.breaks, vec![1]);
    assert_eq!(layout.population.runs.len(), 2);
}

#[test]
fn test_individual_order_sorts_by_hierarchy_then_proportions() {
    let table = AncestryTable {
        components: vec!["A".to_string(), "B".to_string()],
        records: vec![
            record("S1", "European", "British", &[0.9, 0.1]),
            record("S2", "African", "Yoruba", &[0.2, 0.8]),
            record("S3", "European", "British", &[0.3, 0.7]),
            record("S4", "African", "Yoruba", &[0.2, 0.8]),
            record("S5", "European", "Finnish", &[0.5, 0.5]),
        ],
    };
    assert_eq!(individual_order(&table), vec![1, 3, 2, 0, 4]);

    let out = run_stage4(&table);
    assert_eq!(out.individuals.n, 5);
    assert_eq!(out.individuals.superpopulation.breaks, vec![2]);
    assert_eq!(out.individuals.population.breaks, vec![2, 4]);
}

#[test]
fn test_missing_labels_sort_last() {
    let mut table = AncestryTable {
        components: vec!["A".to_string()],
        records: vec![
            record("S1", "Zulu", "Z", &[1.0]),
            record("S2", "Alpha", "A", &[1.0]),
        ],
    };
    table.records.push(AncestryRecord {
        sample_id: "S0".to_string(),
        superpopulation: Label::missing("AAA"),
        population: Label::resolved("A"),
        proportions: vec![1.0],
    });
    assert_eq!(individual_order(&table), vec![1, 0, 2]);
    let out = run_stage4(&table);
    assert_eq!(
        out.individuals.superpopulation.runs[2].label,
        "<missing: AAA>"
    );
}

#[test]
fn test_layout_independent_of_input_order() {
    let records = vec![
        record("S1", "European", "British", &[0.9, 0.1]),
        record("S2", "African", "Yoruba", &[0.2, 0.8]),
        record("S3", "European", "Finnish", &[0.5, 0.5]),
        record("S4", "African", "Esan", &[0.3, 0.7]),
        record("S5", "European", "British", &[0.4, 0.6]),
    ];
    let mut shuffled = records.clone();
    shuffled.rotate_left(2);
    shuffled.swap(1, 3);

    let ids = |records: Vec<AncestryRecord>| {
        let table = AncestryTable {
            components: vec!["A".to_string(), "B".to_string()],
            records,
        };
        let out = run_stage4(&table);
        let ids: Vec<String> = out
            .order
            .iter()
            .map(|&i| table.records[i].sample_id.clone())
            .collect();
        (ids, out.individuals)
    };
    assert_eq!(ids(records), ids(shuffled));
}
