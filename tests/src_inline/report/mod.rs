use super::json::render_summary_json;
use super::text::render_report_text;
use super::*;
use crate::model::label::{GroupKey, Label};
use crate::model::settings::PlotProfile;
use crate::model::summary::ComponentStat;
use crate::pipeline::analyze;
use crate::pipeline::fixtures::sample_tables;

fn summary(sp: Label, pop: Label, medians: &[f64]) -> GroupSummary {
    GroupSummary {
        key: GroupKey::new(sp, pop),
        n_samples: 2,
        stats: medians
            .iter()
            .map(|&m| ComponentStat {
                median: m,
                q1: m,
                q3: m + 0.1,
                iqr: 0.1,
            })
            .collect(),
    }
}

#[test]
fn test_group_tsv_layout() {
    let components = vec!["A".to_string(), "B".to_string()];
    let summaries = vec![
        summary(Label::resolved("African"), Label::resolved("Yoruba"), &[0.05, 0.95]),
        summary(Label::resolved("European"), Label::missing("XYZ"), &[0.5, 0.5]),
    ];
    let tsv = render_group_tsv(&components, &summaries);
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(
        lines[0],
        "superpopulation\tpopulation\tn_samples\tmedian_A\tiqr_A\tmedian_B\tiqr_B"
    );
    assert_eq!(
        lines[1],
        "African\tYoruba\t2\t0.050000\t0.100000\t0.950000\t0.100000"
    );
    assert!(lines[2].starts_with("European\t<missing: XYZ>\t2\t"));
    assert!(tsv.ends_with('\n'));
}

#[test]
fn test_format_f64_6() {
    assert_eq!(format_f64_6(0.25), "0.250000");
    assert_eq!(format_f64_6(1.0 / 3.0), "0.333333");
}

#[test]
fn test_summary_json_and_text_from_analysis() {
    let analysis = analyze(&sample_tables(), None, &PlotProfile::default_v1()).unwrap();
    let data = SummaryData::from_analysis(&analysis);
    assert_eq!(data.n_samples, 8);
    assert_eq!(data.n_groups, 5);

    let json = render_summary_json(&data).unwrap();
    assert!(json.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["components"], serde_json::json!(["A", "B", "C"]));
    assert_eq!(value["groups"][0]["key"]["population"]["status"], "resolved");
    assert_eq!(value["groups"][4]["key"]["population"]["status"], "missing");
    assert_eq!(value["groups"][4]["key"]["population"]["code"], "XYZ");

    let text = render_report_text(&data);
    assert!(text.starts_with("Ancestry Admixture Summary Report\n"));
    assert!(text.contains("Ancestral components (K=3): A, B, C"));
    assert!(text.contains("Joined samples: 8"));
    assert!(text.contains("European: <missing: XYZ> (n=1)"));
    assert!(text.contains("Superpopulation blocks: 2"));
}
