pub mod csv;
pub mod report;

pub use csv::{render_csv, CSV_FILE_NAME, CSV_MIME_TYPE};
pub use report::{render_report, MoodReport, ReportPage, REPORT_FILE_NAME, REPORT_TITLE};
