use getij_forecast::LatestRow;

pub const EMPTY_BODY: &str = "(leeg)";

/// Plain view: `body_processed` exactly as stored.
pub fn render_raw(row: Option<&LatestRow>) -> String {
    row.and_then(LatestRow::body_text)
        .unwrap_or_else(|| EMPTY_BODY.to_string())
}
