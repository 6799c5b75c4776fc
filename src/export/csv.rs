use crate::db::models::MoodEntry;

/// Download name and MIME type the UI attaches to the artifact.
pub const CSV_FILE_NAME: &str = "mood_history.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";

const CSV_HEADER: &str = "Date,Mood,Note";

/// Render a filtered view as CSV bytes: a `Date,Mood,Note` header, the
/// timestamp truncated to its UTC calendar date, the effective mood label
/// (empty when the record has none), and the note as a quoted field. An
/// empty view produces no artifact at all, not a header-only file.
pub fn render_csv(view: &[&MoodEntry]) -> Option<Vec<u8>> {
    if view.is_empty() {
        return None;
    }

    let mut out = String::with_capacity((view.len() + 1) * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for entry in view {
        let date = entry.timestamp.format("%Y-%m-%d");
        let mood = entry
            .effective_mood()
            .map(|mood| mood.as_str())
            .unwrap_or("");
        let note = entry.note.as_deref().unwrap_or("");
        out.push_str(&format!("{date},{mood},{}\n", quote_field(note)));
    }

    Some(out.into_bytes())
}

/// Notes are always quoted and embedded quotes double per RFC 4180, so
/// commas, quotes, and line breaks inside a note survive a round trip.
fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
