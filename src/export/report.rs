use serde::Serialize;

use crate::db::models::MoodEntry;

/// Download name the UI attaches to the rendered document.
pub const REPORT_FILE_NAME: &str = "mood_history.pdf";
pub const REPORT_TITLE: &str = "MoodLens Mood History";

// Page geometry, in the millimeter-ish units of the rendering SDK: the
// title sits at y=20, body lines advance by 8, and a cursor past y=280
// wraps to a fresh page whose body starts at y=20. That gives the first
// page room for 32 records (the title takes its first slot) and every
// later page 33.
const FIRST_BODY_Y: i64 = 30;
const CONTINUATION_BODY_Y: i64 = 20;
const LINE_HEIGHT: i64 = 8;
const PAGE_BREAK_Y: i64 = 280;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub lines: Vec<String>,
}

/// Paginated history layout. Turning this into actual PDF bytes is the
/// rendering SDK's job; the layout (and therefore the page count) is
/// decided here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodReport {
    pub title: String,
    pub pages: Vec<ReportPage>,
}

impl MoodReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain-text rendering: the title, then page bodies separated by form
    /// feeds.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push('\u{000C}');
            }
            for line in &page.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Lay out a filtered view as `{date} - {mood} - {note}` lines with the
/// same date/mood/empty-string rules as the CSV export. An empty view
/// produces no document; a full page never leaves a blank trailing page
/// behind, so N records always occupy exactly as many pages as they fill.
pub fn render_report(view: &[&MoodEntry]) -> Option<MoodReport> {
    if view.is_empty() {
        return None;
    }

    let mut pages = Vec::new();
    let mut current = ReportPage { lines: Vec::new() };
    let mut cursor = FIRST_BODY_Y;

    for entry in view {
        let date = entry.timestamp.format("%Y-%m-%d");
        let mood = entry
            .effective_mood()
            .map(|mood| mood.as_str())
            .unwrap_or("");
        let note = entry.note.as_deref().unwrap_or("");
        current.lines.push(format!("{date} - {mood} - {note}"));

        cursor += LINE_HEIGHT;
        if cursor > PAGE_BREAK_Y {
            pages.push(std::mem::replace(&mut current, ReportPage { lines: Vec::new() }));
            cursor = CONTINUATION_BODY_Y;
        }
    }

    if !current.lines.is_empty() {
        pages.push(current);
    }

    Some(MoodReport {
        title: REPORT_TITLE.to_string(),
        pages,
    })
}
