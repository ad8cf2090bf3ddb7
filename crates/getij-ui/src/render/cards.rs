//! Accordion cards: one card per location, one collapsible section per day.

use getij_forecast::{DayEntry, DaypartEntry, ForecastModel, LocationEntry};

use super::{advisory_lines, format_score};

const EXPANDED: &str = "▾";
const COLLAPSED: &str = "▸";

fn day_header(day: &DayEntry, expanded: bool) -> String {
    let marker = if expanded { EXPANDED } else { COLLAPSED };
    let mut header = format!("│ {} {}", marker, day.label);
    if let Some(score) = day.score {
        header.push_str(&format!(" · {}", format_score(score)));
    }
    if !expanded {
        let count = day.parts.len();
        header.push_str(&format!(
            " ({} {})",
            count,
            if count == 1 { "dagdeel" } else { "dagdelen" }
        ));
    }
    header
}

fn part_lines(part: &DaypartEntry) -> Vec<String> {
    let title = match part.score {
        Some(score) => format!("{} · {}", part.name, format_score(score)),
        None => part.name.clone(),
    };

    let mut lines = vec![
        format!("│     {}", title),
        format!("│       Wind: {}", part.wind),
        format!("│       Getij: {}", part.tide),
        format!(
            "│       Golven: {} | Clean: {} | Swell: {} | Periode: {}",
            part.wave_height, part.clean, part.swell, part.period
        ),
    ];
    lines.extend(
        advisory_lines(part)
            .into_iter()
            .map(|note| format!("│       {}", note)),
    );
    lines
}

fn render_card(location: &LocationEntry, expand_all: bool) -> String {
    let mut lines = vec![format!("╭─ {}", location.name)];

    for (i, day) in location.days.iter().enumerate() {
        let expanded = expand_all || i == 0;
        lines.push(day_header(day, expanded));
        if expanded {
            for part in &day.parts {
                lines.extend(part_lines(part));
            }
        }
    }

    lines.push("╰─".to_string());
    lines.join("\n")
}

/// Render one card per location. Only the first day is expanded unless
/// `expand_all` is set.
pub fn render_cards(model: &ForecastModel, expand_all: bool) -> String {
    model
        .iter()
        .map(|location| render_card(location, expand_all))
        .collect::<Vec<_>>()
        .join("\n\n")
}
