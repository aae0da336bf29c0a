use std::path::Path;

use uuid::Uuid;

/// Generate a collision-resistant stored name that keeps the original extension.
///
/// `report.PDF` becomes something like `3f2b...9c.pdf`. Extensions that are not
/// plain alphanumerics are dropped rather than copied onto disk.
pub fn stored_name_for(original_name: &str) -> String {
    let unique_id = Uuid::new_v4().simple().to_string();
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) => format!("{unique_id}.{ext}"),
        None => unique_id,
    }
}

/// Name of the backup that sits next to `stored_name`.
pub fn backup_name(stored_name: &str) -> String {
    format!("{stored_name}.bak")
}
