//! Indeterminate progress bar shown while sections reload.

use crate::html::escape_html;

pub const DEFAULT_COLOR: &str = "#ea580c";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingBar {
    color: String,
    visible: bool,
}

impl LoadingBar {
    /// Blank or missing `color` falls back to the theme orange.
    #[must_use]
    pub fn new(color: Option<&str>) -> Self {
        let mut bar = Self {
            color: DEFAULT_COLOR.to_string(),
            visible: false,
        };
        bar.set_color(color);
        bar
    }

    pub fn set_color(&mut self, color: Option<&str>) {
        self.color = color
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLOR)
            .to_string();
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        let display = if self.visible { "block" } else { "none" };
        format!(
            "<div class=\"loading-bar\" style=\"display:{display}\"><div class=\"bar\" style=\"background:linear-gradient(90deg, transparent, {}, transparent)\"></div></div>",
            escape_html(&self.color)
        )
    }
}

impl Default for LoadingBar {
    fn default() -> Self {
        Self::new(None)
    }
}
