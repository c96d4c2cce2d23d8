//! TUI Widgets - UI Components
//!
//! Stateless helpers shared by the views in `app.rs`.

/// Common widget utilities
pub mod utils {
    use crate::tui::theme::icons;

    /// Spinner glyph for an animation frame
    pub fn spinner(frame: usize) -> char {
        icons::SPINNER[frame % icons::SPINNER.len()]
    }

    /// Truncate string with ellipsis, counting chars rather than bytes
    pub fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else if max_len <= 3 {
            s.chars().take(max_len).collect()
        } else {
            let head: String = s.chars().take(max_len - 3).collect();
            format!("{}...", head)
        }
    }
}
