pub mod json_backup;
pub mod spreadsheet;

use chrono::{DateTime, Utc};

/// `<prefix>_YYYYMMDD_HHMMSS.<ext>`
pub fn timestamped_file_name(prefix: &str, ext: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}_{}.{ext}", at.format("%Y%m%d_%H%M%S"))
}
