use std::collections::BTreeSet;

use crate::report::{SummaryData, format_f64_6};

const LIST_LIMIT: usize = 20;

pub fn render_report_text(data: &SummaryData<'_>) -> String {
    let audit = data.audit;
    let mut out = String::new();

    out.push_str("Ancestry Admixture Summary Report\n");
    out.push_str("=================================\n\n");

    out.push_str("1. Inputs\n");
    out.push_str(&format!("Tool: {} {}\n", data.tool, data.version));
    out.push_str(&format!(
        "Ancestral components (K={}): {}\n",
        data.components.len(),
        data.components.join(", ")
    ));
    out.push_str(&format!("Pedigree samples: {}\n", audit.n_pedigree));
    out.push_str(&format!("Metadata samples: {}\n", audit.n_metadata));
    out.push_str(&format!("Joined samples: {}\n\n", audit.n_joined));

    out.push_str("2. Join integrity\n");
    push_list(&mut out, "Pedigree samples without metadata", &audit.unmatched_pedigree);
    push_list(&mut out, "Metadata samples without pedigree", &audit.unmatched_metadata);
    push_list(&mut out, "Duplicate metadata samples", &audit.duplicate_metadata);
    out.push('\n');

    out.push_str("3. Metadata resolution\n");
    push_set(&mut out, "Unresolved population codes", &audit.unresolved_populations);
    out.push_str(&format!(
        "Records with missing population: {}\n",
        audit.records_missing_population
    ));
    push_set(
        &mut out,
        "Unresolved superpopulation codes",
        &audit.unresolved_superpopulations,
    );
    out.push_str(&format!(
        "Records with missing superpopulation: {}\n\n",
        audit.records_missing_superpopulation
    ));

    out.push_str("4. Proportion sanity\n");
    out.push_str(&format!(
        "Rows outside tolerance: {}\n",
        audit.proportion_violations
    ));
    out.push_str(&format!(
        "Max |sum - 1|: {}\n\n",
        format_f64_6(audit.max_proportion_deviation)
    ));

    out.push_str("5. Groups\n");
    out.push_str(&format!("Groups: {}\n", data.n_groups));
    for group in data.groups {
        out.push_str(&format!("{} (n={})\n", group.key, group.n_samples));
    }
    out.push_str(&format!(
        "Superpopulation blocks: {}\n",
        data.individuals.superpopulation.runs.len()
    ));

    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("{}: {}", title, items.len()));
    if !items.is_empty() {
        let shown: Vec<&str> = items.iter().take(LIST_LIMIT).map(String::as_str).collect();
        out.push_str(&format!(" ({}", shown.join(", ")));
        if items.len() > LIST_LIMIT {
            out.push_str(", ...");
        }
        out.push(')');
    }
    out.push('\n');
}

fn push_set(out: &mut String, title: &str, items: &BTreeSet<String>) {
    let items: Vec<String> = items.iter().cloned().collect();
    push_list(out, title, &items);
}
