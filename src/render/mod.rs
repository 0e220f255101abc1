//! Backend-neutral figure plumbing shared by the heatmap and stacked charts.
//!
//! Plans are built from plain tables; only [`Figure::draw`] touches `plotters`.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::model::settings::PlotProfile;

pub mod palette;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported figure format `{0}` (use svg or png)")]
    UnsupportedFormat(String),
    #[error("failed to draw {path}: {msg}")]
    Draw { path: String, msg: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureFormat {
    Svg,
    Png,
}

impl FigureFormat {
    pub fn parse(value: &str) -> Result<Self, RenderError> {
        match value.to_ascii_lowercase().as_str() {
            "svg" => Ok(FigureFormat::Svg),
            "png" => Ok(FigureFormat::Png),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::parse(ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            FigureFormat::Svg => "svg",
            FigureFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FigureShape {
    Square,
    Golden,
}

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

impl FigureShape {
    /// Pixel size for `factor` figure units under `profile`.
    pub fn size(self, factor: f64, profile: &PlotProfile) -> (u32, u32) {
        let unit = profile.base_unit_px as f64 * profile.scale * factor;
        let (w, h) = match self {
            FigureShape::Square => (unit, unit),
            FigureShape::Golden => (unit * GOLDEN_RATIO, unit),
        };
        (w.round().max(1.0) as u32, h.round().max(1.0) as u32)
    }
}

pub trait Figure {
    fn size(&self) -> (u32, u32);

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>;
}

/// Draws `figure` to `path`, choosing the backend from the extension.
pub fn render_to_file<F: Figure>(figure: &F, path: &Path) -> Result<(), RenderError> {
    let draw_err = |msg: String| RenderError::Draw {
        path: path.display().to_string(),
        msg,
    };
    match FigureFormat::from_path(path)? {
        FigureFormat::Svg => {
            let root = SVGBackend::new(path, figure.size()).into_drawing_area();
            figure.draw(&root).map_err(|e| draw_err(e.to_string()))?;
            root.present().map_err(|e| draw_err(e.to_string()))?;
        }
        FigureFormat::Png => {
            let root = BitMapBackend::new(path, figure.size()).into_drawing_area();
            figure.draw(&root).map_err(|e| draw_err(e.to_string()))?;
            root.present().map_err(|e| draw_err(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/tests.rs"]
mod tests;
