use photoadmin::store::PhotoRecord;
use photoadmin::types::Status;

pub fn record(path: &str, status: Option<&str>, nude: Option<bool>, face: Option<bool>) -> PhotoRecord {
    let mut record = PhotoRecord::new(path);
    record.status = status.map(Status::from);
    record.is_nude = nude;
    record.has_face = face;
    record
}

/// `A/b.jpg (review)`, `A/C/d.jpg (approved)`, `E/f.jpg (review)`
pub fn sample_records() -> Vec<PhotoRecord> {
    vec![
        record("A/b.jpg", Some("review"), Some(true), Some(false)),
        record("A/C/d.jpg", Some("approved"), Some(false), Some(true)),
        record("E/f.jpg", Some("review"), None, Some(true)),
    ]
}

pub const SESSION_BASE: &str = "/mnt/smb/OneDrive/Pictures/!Фотосессии";

/// Absolute records under a storage mount
pub fn mounted_records() -> Vec<PhotoRecord> {
    vec![
        record(&format!("{}/2023/Anna/001.jpg", SESSION_BASE), Some("review"), Some(true), Some(true)),
        record(&format!("{}/2023/Anna/002.jpg", SESSION_BASE), Some("rejected"), Some(false), Some(true)),
        record(&format!("{}/2023/Boris/001.jpg", SESSION_BASE), None, None, None),
        record(&format!("{}/2024/cover.jpg", SESSION_BASE), Some("published"), Some(false), Some(false)),
        record(SESSION_BASE, Some("review"), None, None),
    ]
}
