#[derive(Debug, Clone)]
pub struct PlotProfile {
    /// Allowed |sum(proportions) - 1| before a row is reported.
    pub proportion_tolerance: f64,
    /// Pixels per figure unit before `scale` is applied.
    pub base_unit_px: u32,
    pub scale: f64,
    pub title_font: u32,
    pub subtitle_font: u32,
    pub cell_font: u32,
    pub axis_font: u32,
    pub group_label_font: u32,
    pub population_label_font: u32,
    pub grid_width: u32,
    pub superpopulation_separator_width: u32,
    pub population_separator_width: u32,
}

impl PlotProfile {
    pub fn default_v1() -> Self {
        Self {
            proportion_tolerance: 1e-3,
            base_unit_px: 480,
            scale: 2.0,
            title_font: 16,
            subtitle_font: 12,
            cell_font: 11,
            axis_font: 14,
            group_label_font: 10,
            population_label_font: 7,
            grid_width: 1,
            superpopulation_separator_width: 3,
            population_separator_width: 1,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Font size in pixels after scaling.
    pub fn font_px(&self, size: u32) -> u32 {
        ((size as f64) * self.scale).round().max(1.0) as u32
    }

    pub fn stroke_px(&self, width: u32) -> u32 {
        ((width as f64) * self.scale).round().max(1.0) as u32
    }
}
