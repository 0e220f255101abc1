use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::model::label::GroupKey;
use crate::model::settings::PlotProfile;
use crate::model::summary::GroupSummary;
use crate::pipeline::stage4_layout::hierarchy_layout;
use crate::render::palette::{Rgb, coolwarm, format_median_iqr};
use crate::render::{Figure, FigureShape};

const FONT: &str = "sans-serif";
const HEATMAP_SIZE_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub median_pct: f64,
    pub iqr_pct: f64,
    pub text: String,
    pub color: Rgb,
}

/// Everything needed to draw the group summary grid, already laid out.
#[derive(Debug, Clone)]
pub struct HeatmapPlan {
    pub title: String,
    pub subtitle: String,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// Row-major, one row per summary.
    pub cells: Vec<Vec<HeatmapCell>>,
    /// Row indices where the superpopulation changes.
    pub separators: Vec<usize>,
    pub size: (u32, u32),
    pub profile: PlotProfile,
}

pub fn heatmap_title(k: usize) -> String {
    format!(
        "Median (IQR) for estimated percentage of the genome in each of the inferred {k} ancestral superpopulations"
    )
}

pub fn heatmap_subtitle(components: &[String]) -> String {
    let span = match (components.first(), components.last()) {
        (Some(first), Some(last)) if components.len() > 1 => format!("{first}-{last}"),
        (Some(first), _) => first.clone(),
        _ => String::new(),
    };
    format!("Rows = populations; Columns = inferred ancestral populations ({span})")
}

pub fn run_stage5(
    summaries: &[GroupSummary],
    components: &[String],
    profile: &PlotProfile,
) -> HeatmapPlan {
    let keys: Vec<GroupKey> = summaries.iter().map(|s| s.key.clone()).collect();
    let layout = hierarchy_layout(&keys);

    let cells = summaries
        .iter()
        .map(|summary| {
            summary
                .stats
                .iter()
                .map(|stat| HeatmapCell {
                    median_pct: stat.median * 100.0,
                    iqr_pct: stat.iqr * 100.0,
                    text: format_median_iqr(stat.median, stat.iqr),
                    // Fixed 0..100% scale, independent of the data range.
                    color: coolwarm(stat.median),
                })
                .collect()
        })
        .collect();

    tracing::debug!(separators = ?layout.superpopulation.breaks, "heatmap row separators");

    HeatmapPlan {
        title: heatmap_title(components.len()),
        subtitle: heatmap_subtitle(components),
        row_labels: keys.iter().map(|k| k.to_string()).collect(),
        column_labels: components.to_vec(),
        cells,
        separators: layout.superpopulation.breaks,
        size: FigureShape::Square.size(HEATMAP_SIZE_FACTOR, profile),
        profile: profile.clone(),
    }
}

fn edge(origin: i32, extent: i32, idx: usize, count: usize) -> i32 {
    if count == 0 {
        return origin;
    }
    origin + ((idx as f64) * (extent as f64) / (count as f64)).round() as i32
}

impl Figure for HeatmapPlan {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let p = &self.profile;
        let (w, h) = (self.size.0 as i32, self.size.1 as i32);
        let title_px = p.font_px(p.title_font) as i32;
        let subtitle_px = p.font_px(p.subtitle_font) as i32;
        let cell_px = p.font_px(p.cell_font) as i32;
        let axis_px = p.font_px(p.axis_font) as i32;
        let pad = cell_px;

        let longest = self
            .row_labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as f64;
        let label_w = ((longest * cell_px as f64 * 0.55) as i32)
            .min(w * 45 / 100)
            .max(pad);

        let x0 = label_w + pad;
        let x1 = w - pad;
        let y0 = title_px * 2 + subtitle_px * 2 + pad;
        let y1 = h - axis_px * 2 - pad;
        let n_rows = self.row_labels.len();
        let n_cols = self.column_labels.len();

        root.draw(&Text::new(
            self.title.clone(),
            (w / 2, pad + title_px / 2),
            (FONT, title_px as f64)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        root.draw(&Text::new(
            self.subtitle.clone(),
            (w / 2, pad + title_px * 2),
            (FONT, subtitle_px as f64)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;

        let cell_style = (FONT, cell_px as f64)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let grid = BLACK.stroke_width(p.stroke_px(p.grid_width));

        for (r, row) in self.cells.iter().enumerate() {
            let ya = edge(y0, y1 - y0, r, n_rows);
            let yb = edge(y0, y1 - y0, r + 1, n_rows);
            for (c, cell) in row.iter().enumerate() {
                let xa = edge(x0, x1 - x0, c, n_cols);
                let xb = edge(x0, x1 - x0, c + 1, n_cols);
                root.draw(&Rectangle::new(
                    [(xa, ya), (xb, yb)],
                    RGBColor::from(cell.color).filled(),
                ))?;
                root.draw(&Rectangle::new([(xa, ya), (xb, yb)], grid))?;
                root.draw(&Text::new(
                    cell.text.clone(),
                    ((xa + xb) / 2, (ya + yb) / 2),
                    cell_style.clone(),
                ))?;
            }
            root.draw(&Text::new(
                self.row_labels[r].clone(),
                (x0 - pad / 2, (ya + yb) / 2),
                (FONT, cell_px as f64)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Right, VPos::Center)),
            ))?;
        }

        for (c, label) in self.column_labels.iter().enumerate() {
            let xa = edge(x0, x1 - x0, c, n_cols);
            let xb = edge(x0, x1 - x0, c + 1, n_cols);
            root.draw(&Text::new(
                label.clone(),
                ((xa + xb) / 2, y1 + pad / 2),
                (FONT, axis_px as f64)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Top)),
            ))?;
        }

        let separator = BLACK.stroke_width(p.stroke_px(p.superpopulation_separator_width));
        for &row in &self.separators {
            let y = edge(y0, y1 - y0, row, n_rows);
            root.draw(&PathElement::new(vec![(x0, y), (x1, y)], separator))?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_heatmap.rs"]
mod tests;
