/// Lowercase and trim a categorical label (platform, genre, publisher, title).
///
/// Idempotent: normalizing an already-normalized label returns it unchanged.
pub fn normalize_label(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}
