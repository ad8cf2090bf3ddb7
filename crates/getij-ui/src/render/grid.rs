//! Multi-day grid: one table per location, one row per daypart.

use getij_forecast::{ForecastModel, LocationEntry};

use super::{advisory_lines, format_score};

const HEADERS: [&str; 8] = [
    "Dag", "Dagdeel", "Wind", "Getij", "Golven", "Clean", "Swell", "Periode",
];

const NOTE_INDENT: &str = "    ";

enum Line {
    Cells(Vec<String>),
    Note(String),
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, target: usize) -> String {
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat(' ').take(target.saturating_sub(width(text))));
    padded
}

fn location_lines(location: &LocationEntry) -> Vec<Line> {
    let mut lines = Vec::new();

    for day in &location.days {
        let day_label = match day.score {
            Some(score) => format!("{} ({})", day.label, format_score(score)),
            None => day.label.clone(),
        };

        for (i, part) in day.parts.iter().enumerate() {
            let name = match part.score {
                Some(score) => format!("{} ({})", part.name, format_score(score)),
                None => part.name.clone(),
            };
            lines.push(Line::Cells(vec![
                if i == 0 { day_label.clone() } else { String::new() },
                name,
                part.wind.clone(),
                part.tide.clone(),
                part.wave_height.clone(),
                part.clean.clone(),
                part.swell.clone(),
                part.period.clone(),
            ]));
            lines.extend(advisory_lines(part).into_iter().map(Line::Note));
        }
    }

    lines
}

fn render_location(location: &LocationEntry) -> String {
    let lines = location_lines(location);

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| width(h)).collect();
    for line in &lines {
        if let Line::Cells(cells) = line {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(width(cell));
            }
        }
    }

    let join_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = vec![
        format!("== {} ==", location.name),
        join_row(&header),
        join_row(&rule),
    ];
    for line in &lines {
        match line {
            Line::Cells(cells) => out.push(join_row(cells)),
            Line::Note(note) => out.push(format!("{}{}", NOTE_INDENT, note)),
        }
    }

    out.join("\n")
}

/// Render every location as its own table, separated by a blank line.
pub fn render_grid(model: &ForecastModel) -> String {
    model
        .iter()
        .map(render_location)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn test_empty_model_renders_nothing() {
        assert_eq!(render_grid(&ForecastModel::default()), "");
    }

    #[test]
    fn test_grid_layout() {
        let out = render_grid(&fixtures::model());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "== Scheveningen ==");
        assert!(lines[1].starts_with("Dag"));
        assert!(lines[1].contains("Periode"));
        assert!(lines[2].starts_with("---"));

        assert!(lines[3].starts_with("di 19 aug (7.5)"));
        assert!(lines[3].contains("4 bft W"));
        assert!(lines[3].contains("Opkomend Goed"));
        assert_eq!(lines[4], "    Pro: vanaf 7u");

        // second daypart of the same day leaves the day column blank
        assert!(lines[5].starts_with(' '));
        assert!(lines[5].contains("Middag"));
        assert!(lines[5].contains("—"));
        assert_eq!(lines[6], "    Beginner: na 14u");

        assert!(lines[7].starts_with("wo 20 aug"));
        assert!(lines[7].contains("3 bft ZW"));
    }

    #[test]
    fn test_locations_separated_in_order() {
        let out = render_grid(&fixtures::model());
        let blocks: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("== Scheveningen =="));
        assert!(blocks[1].starts_with("== Domburg =="));
        assert!(blocks[1].contains("General"));
    }

    #[test]
    fn test_columns_align() {
        let out = render_grid(&fixtures::model());
        let lines: Vec<&str> = out.lines().collect();
        let header_wind = lines[1].find("Wind").unwrap();
        let row_wind = lines[3].find("4 bft W").unwrap();
        // byte offsets differ only by multi-byte chars before the column
        assert_eq!(
            lines[1][..header_wind].chars().count(),
            lines[3][..row_wind].chars().count()
        );
    }
}
