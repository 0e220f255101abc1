use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::pipeline::{Analysis, PipelineError};
use crate::render::{FigureFormat, render_to_file};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{SummaryData, render_group_tsv};

pub const HEATMAP_STEM: &str = "median_iqr_each_population";
pub const STACKED_STEM: &str = "ancestry_fraction_each_individual";

#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub heatmap: PathBuf,
    pub stacked: PathBuf,
    pub report: Vec<PathBuf>,
}

/// Hidden sibling of `dest` that keeps the extension, since the bitmap
/// encoder picks its format from it.
pub fn staging_path(dest: &Path) -> PathBuf {
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match dest.extension() {
        Some(ext) => format!(".{}.partial.{}", stem, ext.to_string_lossy()),
        None => format!(".{}.partial", stem),
    };
    dest.with_file_name(name)
}

pub fn write_outputs(
    analysis: &Analysis,
    out_dir: &Path,
    format: FigureFormat,
    write_report: bool,
) -> Result<OutputPaths, PipelineError> {
    fs::create_dir_all(out_dir)?;
    let ext = format.extension();
    let heatmap = out_dir.join(format!("{HEATMAP_STEM}.{ext}"));
    let stacked = out_dir.join(format!("{STACKED_STEM}.{ext}"));
    let heatmap_tmp = staging_path(&heatmap);
    let stacked_tmp = staging_path(&stacked);

    let rendered = render_to_file(&analysis.heatmap, &heatmap_tmp)
        .and_then(|_| render_to_file(&analysis.stacked, &stacked_tmp));
    if let Err(err) = rendered {
        discard(&[heatmap_tmp.as_path(), stacked_tmp.as_path()]);
        return Err(err.into());
    }
    if let Err(err) = fs::rename(&heatmap_tmp, &heatmap) {
        discard(&[heatmap_tmp.as_path(), stacked_tmp.as_path()]);
        return Err(err.into());
    }
    // Both figures or neither: withdraw the heatmap if the second publish fails.
    if let Err(err) = fs::rename(&stacked_tmp, &stacked) {
        discard(&[heatmap.as_path(), stacked_tmp.as_path()]);
        tracing::error!(path = %stacked.display(), "could not publish figure; removed both outputs");
        return Err(err.into());
    }

    let report = if write_report {
        write_report_files(analysis, out_dir)?
    } else {
        Vec::new()
    };

    Ok(OutputPaths {
        heatmap,
        stacked,
        report,
    })
}

pub fn write_report_files(
    analysis: &Analysis,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, PipelineError> {
    fs::create_dir_all(out_dir)?;
    let summary = SummaryData::from_analysis(analysis);

    let tsv_path = out_dir.join("group_summary.tsv");
    write_text(&tsv_path, &render_group_tsv(&analysis.table.components, &analysis.summaries))?;

    let json_path = out_dir.join("summary.json");
    let json = render_summary_json(&summary)
        .map_err(|e| PipelineError::Io(std::io::Error::other(e)))?;
    write_text(&json_path, &json)?;

    let text_path = out_dir.join("report.txt");
    write_text(&text_path, &render_report_text(&summary))?;

    tracing::info!(dir = %out_dir.display(), "wrote tabular report");
    Ok(vec![tsv_path, json_path, text_path])
}

fn discard(paths: &[&Path]) {
    for path in paths {
        if path.is_file() {
            let _ = fs::remove_file(path);
        }
    }
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_output.rs"]
mod tests;
