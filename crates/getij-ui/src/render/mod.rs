//! Text renderers for the three views.
//!
//! Every renderer returns the full frame body as a `String`; an empty model
//! renders to an empty string.

pub mod cards;
pub mod grid;
pub mod raw;
pub mod status;

pub use cards::render_cards;
pub use grid::render_grid;
pub use raw::render_raw;
pub use status::Status;

use getij_forecast::DaypartEntry;

/// Scores are shown without a trailing ".0".
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

/// Advice lines for a daypart; absent advice produces no line at all.
pub fn advisory_lines(part: &DaypartEntry) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(pro) = &part.go_pro {
        lines.push(format!("Pro: {}", pro));
    }
    if let Some(beginner) = &part.go_beginner {
        lines.push(format!("Beginner: {}", beginner));
    }
    lines
}
