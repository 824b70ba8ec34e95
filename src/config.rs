use serde::{Deserialize, Serialize};

/// Size and typography of a rendered history figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Figure width in pixels, shared evenly by the two panels.
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub caption_font_size: u32,
    pub label_font_size: u32,
    pub line_width: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            width: 1000,
            height: 300,
            font_family: "sans-serif".to_string(),
            caption_font_size: 20,
            label_font_size: 12,
            line_width: 2,
        }
    }
}

impl PlotConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
