use std::path::Path;

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned = filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>();

    let trimmed = cleaned.trim().trim_matches('.').trim();
    if trimmed.is_empty() {
        crate::api::filename::FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Replaces the stem of `derived` with `custom`, keeping the derived extension.
pub fn apply_custom_stem(derived: &str, custom: &str) -> String {
    let custom = custom.trim();
    if custom.is_empty() {
        return derived.to_string();
    }

    match Path::new(derived).extension().and_then(|e| e.to_str()) {
        Some(ext) if !custom.to_lowercase().ends_with(&format!(".{}", ext.to_lowercase())) => {
            format!("{}.{}", custom, ext)
        }
        _ => custom.to_string(),
    }
}
