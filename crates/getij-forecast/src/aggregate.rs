//! Row aggregation: upstream records → location / day / daypart tree.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde_json::Value;

use crate::dates;
use crate::fields::{self, ForecastRecord};
use crate::types::{
    DayEntry, DaypartEntry, ForecastModel, LocationEntry, GENERAL_DAYPART, PLACEHOLDER,
    UNKNOWN_LOCATION,
};

fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}

impl DaypartEntry {
    /// Reshape a resolved record into display fields.
    pub fn from_record(record: ForecastRecord) -> Self {
        Self {
            name: record
                .daypart
                .unwrap_or_else(|| GENERAL_DAYPART.to_string()),
            wind: or_placeholder(fields::join_present(record.wind, record.wind_direction)),
            tide: or_placeholder(fields::join_present(record.tide, record.tide_score)),
            wave_height: or_placeholder(record.wave_height),
            clean: or_placeholder(record.clean),
            swell: or_placeholder(record.swell),
            period: or_placeholder(record.period),
            go_pro: record.go_pro,
            go_beginner: record.go_beginner,
            score: record.score.as_deref().and_then(fields::parse_score),
        }
    }
}

struct LocationGroup {
    name: String,
    days: BTreeMap<NaiveDate, DayEntry>,
}

/// Build the render model from the decoded `body_processed` records.
///
/// Records without a usable `Datum` (and non-object elements) are dropped.
/// Locations keep first-encounter order, days are sorted by date and
/// dayparts keep encounter order within their day.
pub fn build_model(records: &[Value]) -> ForecastModel {
    let mut groups: Vec<LocationGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut dropped = 0usize;

    for (position, raw) in records.iter().enumerate() {
        let Some(object) = raw.as_object() else {
            tracing::debug!(position, "Skipping non-object forecast record");
            dropped += 1;
            continue;
        };

        let record = ForecastRecord::from_raw(object);

        let Some(date) = record.date.as_deref().and_then(dates::parse_iso_date) else {
            tracing::debug!(position, date = ?record.date, "Skipping record without a valid date");
            dropped += 1;
            continue;
        };

        let location = record
            .location
            .clone()
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

        let slot = match index.get(&location) {
            Some(slot) => *slot,
            None => {
                groups.push(LocationGroup {
                    name: location.clone(),
                    days: BTreeMap::new(),
                });
                index.insert(location, groups.len() - 1);
                groups.len() - 1
            }
        };

        let day = groups[slot].days.entry(date).or_insert_with(|| DayEntry {
            weekday: record
                .weekday
                .clone()
                .unwrap_or_else(|| dates::short_weekday(date).to_string()),
            date,
            label: dates::date_label(date),
            score: None,
            parts: Vec::new(),
        });

        if day.score.is_none() {
            day.score = record.day_score.as_deref().and_then(fields::parse_score);
        }

        day.parts.push(DaypartEntry::from_record(record));
    }

    let model = ForecastModel(
        groups
            .into_iter()
            .map(|group| LocationEntry {
                name: group.name,
                days: group.days.into_values().collect(),
            })
            .collect(),
    );

    tracing::debug!(
        records = records.len(),
        dropped,
        locations = model.len(),
        "Built forecast model"
    );

    model
}
