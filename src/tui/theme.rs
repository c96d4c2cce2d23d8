//! Workbench Theme - Visual Design System
//!
//! Light pastel panels on a deep background, one tint per panel kind.

use ratatui::style::{Color, Modifier, Style};

use crate::panel::PanelKind;

/// Workbench color palette
pub struct WorkbenchTheme {
    // Primary palette
    pub brand_blue: Color,
    pub deep_space: Color,
    pub paper_white: Color,
    pub muted_gray: Color,

    // Panel tints (one per kind)
    pub pdf_gray: Color,
    pub web_blue: Color,
    pub data_yellow: Color,
    pub slides_purple: Color,
    pub code_green: Color,
    pub summary_pink: Color,

    // Status colors
    pub success_green: Color,
    pub warning_orange: Color,
    pub error_red: Color,
}

impl Default for WorkbenchTheme {
    fn default() -> Self {
        Self {
            brand_blue: Color::Rgb(37, 99, 235),    // #2563EB
            deep_space: Color::Rgb(13, 17, 23),     // #0D1117
            paper_white: Color::Rgb(230, 237, 243), // #E6EDF3
            muted_gray: Color::Rgb(128, 128, 128),

            pdf_gray: Color::Rgb(229, 231, 235),      // #E5E7EB
            web_blue: Color::Rgb(191, 219, 254),      // #BFDBFE
            data_yellow: Color::Rgb(254, 240, 138),   // #FEF08A
            slides_purple: Color::Rgb(233, 213, 255), // #E9D5FF
            code_green: Color::Rgb(187, 247, 208),    // #BBF7D0
            summary_pink: Color::Rgb(251, 207, 232),  // #FBCFE8

            success_green: Color::Rgb(63, 185, 80),   // #3FB950
            warning_orange: Color::Rgb(210, 153, 34), // #D29922
            error_red: Color::Rgb(248, 81, 73),       // #F85149
        }
    }
}

impl WorkbenchTheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tint for a panel kind
    pub fn kind_color(&self, kind: PanelKind) -> Color {
        match kind {
            PanelKind::Pdf => self.pdf_gray,
            PanelKind::Web => self.web_blue,
            PanelKind::Data => self.data_yellow,
            PanelKind::Slides => self.slides_purple,
            PanelKind::Code => self.code_green,
            PanelKind::Summary => self.summary_pink,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> Style {
        Style::default().fg(self.paper_white)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.muted_gray)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.brand_blue)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.brand_blue)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    /// Border for a panel tile.
    ///
    /// The carried panel is drawn dim, the cursor slot bold.
    pub fn panel_border(&self, kind: PanelKind, selected: bool, dragging: bool) -> Style {
        let style = Style::default().fg(self.kind_color(kind));
        if dragging {
            style.add_modifier(Modifier::DIM)
        } else if selected {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

pub mod icons {
    pub const BRAIN: &str = "🧠";
    pub const THOUGHT: &str = "•";
    pub const ARROW: &str = "→";
    pub const GRAB: &str = "✥";
    pub const DONE: &str = "✓";
    pub const HALTED: &str = "■";

    /// Braille spinner frames
    pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    #[test]
    fn every_kind_has_a_distinct_tint() {
        let theme = WorkbenchTheme::new();
        let colors: std::collections::HashSet<Color> = PanelKind::ALL
            .iter()
            .map(|k| theme.kind_color(*k))
            .collect();
        assert_eq!(colors.len(), PanelKind::ALL.len());
    }

    #[test]
    fn dragged_panel_is_dimmed() {
        let theme = WorkbenchTheme::new();
        let style = theme.panel_border(PanelKind::Web, true, true);
        assert!(style.add_modifier.contains(Modifier::DIM));
        assert_eq!(style.fg, Some(theme.web_blue));
    }
}
