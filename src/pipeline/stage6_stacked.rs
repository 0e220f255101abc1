use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, FontTransform};

use crate::model::record::AncestryTable;
use crate::model::settings::PlotProfile;
use crate::pipeline::stage4_layout::{LevelLayout, Stage4Output};
use crate::render::palette::{Rgb, component_palette, format_percent};
use crate::render::{Figure, FigureShape};

const FONT: &str = "sans-serif";
const LEGEND_TITLE: &str = "Ancestral population";
const Y_DESC: &str = "Ancestry proportion";
const Y_TICKS: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedSegment {
    pub component: usize,
    pub bottom: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedBar {
    pub sample_id: String,
    pub segments: Vec<StackedSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub x: f64,
}

#[derive(Debug, Clone)]
pub struct StackedPlan {
    /// Bar `i` spans `[i, i + 1)` on the x axis.
    pub bars: Vec<StackedBar>,
    pub component_labels: Vec<String>,
    pub palette: Vec<Rgb>,
    pub superpopulation_separators: Vec<usize>,
    pub superpopulation_labels: Vec<AxisLabel>,
    pub population_separators: Vec<usize>,
    pub population_labels: Vec<AxisLabel>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub size: (u32, u32),
    pub profile: PlotProfile,
}

fn axis_labels(level: &LevelLayout) -> Vec<AxisLabel> {
    level
        .runs
        .iter()
        .map(|run| AxisLabel {
            text: run.label.clone(),
            x: run.midpoint,
        })
        .collect()
}

pub fn run_stage6(
    table: &AncestryTable,
    stage4: &Stage4Output,
    profile: &PlotProfile,
) -> StackedPlan {
    let bars: Vec<StackedBar> = stage4
        .order
        .iter()
        .map(|&idx| {
            let record = &table.records[idx];
            let mut bottom = 0.0f64;
            let segments = record
                .proportions
                .iter()
                .enumerate()
                .map(|(component, &value)| {
                    let seg = StackedSegment {
                        component,
                        bottom,
                        top: bottom + value,
                    };
                    bottom = seg.top;
                    seg
                })
                .collect();
            StackedBar {
                sample_id: record.sample_id.clone(),
                segments,
            }
        })
        .collect();

    let layout = &stage4.individuals;
    StackedPlan {
        x_range: (0.0, bars.len() as f64),
        y_range: (0.0, 1.0),
        bars,
        component_labels: table.components.clone(),
        palette: component_palette(table.k()),
        superpopulation_separators: layout.superpopulation.breaks.clone(),
        superpopulation_labels: axis_labels(&layout.superpopulation),
        population_separators: layout.population.breaks.clone(),
        population_labels: axis_labels(&layout.population),
        size: FigureShape::Golden.size(1.0, profile),
        profile: profile.clone(),
    }
}

impl Figure for StackedPlan {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let p = &self.profile;
        let axis_px = p.font_px(p.axis_font);
        let group_px = p.font_px(p.group_label_font);
        let pop_px = p.font_px(p.population_label_font);
        let pad = group_px as i32;

        let longest_pop = self
            .population_labels
            .iter()
            .map(|l| l.text.chars().count())
            .max()
            .unwrap_or(0) as f64;
        let bottom_area = (longest_pop * pop_px as f64 * 0.6) as u32 + pop_px;
        let longest_legend = self
            .component_labels
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(LEGEND_TITLE.len()))
            .max()
            .unwrap_or(0) as f64;
        let legend_area = (longest_legend * axis_px as f64 * 0.6) as u32 + axis_px * 3;

        let mut chart = ChartBuilder::on(root)
            .margin_top(group_px as i32 * 3)
            .margin_left(pad)
            .margin_right(legend_area as i32)
            .margin_bottom(pad)
            .x_label_area_size(bottom_area as i32)
            .y_label_area_size(axis_px as i32 * 5)
            .build_cartesian_2d(
                self.x_range.0..self.x_range.1.max(1.0),
                self.y_range.0..self.y_range.1,
            )?;

        // Axis drawn by hand: no tick text measurement, x ticks suppressed.
        let (x_left, y_bottom) = chart.backend_coord(&(self.x_range.0, self.y_range.0));
        let (x_right, y_top) = chart.backend_coord(&(self.x_range.1.max(1.0), self.y_range.1));
        let axis = BLACK.stroke_width(1);
        root.draw(&PathElement::new(vec![(x_left, y_top), (x_left, y_bottom)], axis))?;
        root.draw(&PathElement::new(vec![(x_left, y_bottom), (x_right, y_bottom)], axis))?;
        let tick_style = (FONT, axis_px as f64)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        let tick_len = (axis_px / 2) as i32;
        for tick in Y_TICKS {
            let (_, y) = chart.backend_coord(&(self.x_range.0, tick));
            root.draw(&PathElement::new(vec![(x_left - tick_len, y), (x_left, y)], axis))?;
            root.draw(&Text::new(
                format_percent(tick),
                (x_left - tick_len * 2, y),
                tick_style.clone(),
            ))?;
        }
        root.draw(&Text::new(
            Y_DESC,
            (pad, (y_top + y_bottom) / 2),
            (FONT, axis_px as f64)
                .into_font()
                .transform(FontTransform::Rotate270)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;

        let palette = &self.palette;
        chart.draw_series(self.bars.iter().enumerate().flat_map(|(x, bar)| {
            bar.segments.iter().map(move |seg| {
                Rectangle::new(
                    [(x as f64, seg.bottom), (x as f64 + 1.0, seg.top)],
                    RGBColor::from(palette[seg.component]).filled(),
                )
            })
        }))?;

        let pop_line = BLACK.stroke_width(p.stroke_px(p.population_separator_width));
        chart.draw_series(self.population_separators.iter().map(|&b| {
            PathElement::new(vec![(b as f64, 0.0), (b as f64, 1.0)], pop_line)
        }))?;
        let superpop_line = BLACK.stroke_width(p.stroke_px(p.superpopulation_separator_width));
        chart.draw_series(self.superpopulation_separators.iter().map(|&b| {
            PathElement::new(vec![(b as f64, 0.0), (b as f64, 1.0)], superpop_line)
        }))?;

        let superpop_style = (FONT, group_px as f64)
            .into_font()
            .style(FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        for label in &self.superpopulation_labels {
            let (px, py) = chart.backend_coord(&(label.x, self.y_range.1));
            root.draw(&Text::new(
                label.text.clone(),
                (px, py - pad / 2),
                superpop_style.clone(),
            ))?;
        }

        let pop_style = (FONT, pop_px as f64)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for label in &self.population_labels {
            let (px, py) = chart.backend_coord(&(label.x, self.y_range.0));
            root.draw(&Text::new(
                label.text.clone(),
                (px, py + pop_px as i32 / 2),
                pop_style.clone(),
            ))?;
        }

        let (legend_x, legend_top) = chart.backend_coord(&(self.x_range.1.max(1.0), self.y_range.1));
        let legend_x = legend_x + axis_px as i32;
        let row_h = (axis_px as f64 * 1.5) as i32;
        root.draw(&Text::new(
            LEGEND_TITLE,
            (legend_x, legend_top),
            (FONT, axis_px as f64)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Top)),
        ))?;
        let entry_style = (FONT, axis_px as f64)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (i, name) in self.component_labels.iter().enumerate() {
            let y = legend_top + row_h * (i as i32 + 2);
            let swatch = axis_px as i32;
            root.draw(&Rectangle::new(
                [(legend_x, y - swatch / 2), (legend_x + swatch, y + swatch / 2)],
                RGBColor::from(self.palette[i]).filled(),
            ))?;
            root.draw(&Text::new(
                name.clone(),
                (legend_x + swatch + swatch / 2, y),
                entry_style.clone(),
            ))?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_stacked.rs"]
mod tests;
