/// Accepted MIME types. Word files are matched by extension because browsers
/// report them inconsistently.
pub const SUPPORTED_MIME_TYPES: &[&str] = &["application/pdf"];

pub const SUPPORTED_EXTENSIONS: &[&str] = &["docx"];

pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024; // 10 MB

/// Body limit for one multipart request carrying several files.
pub const MAX_REQUEST_SIZE: usize = 4 * MAX_FILE_SIZE;

/// PDF by MIME type, or DOCX by extension.
pub fn is_supported(content_type: &str, filename: &str) -> bool {
    if SUPPORTED_MIME_TYPES.contains(&content_type) {
        return true;
    }
    extension_from_filename(filename)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Reason a file is refused before it reaches the backend, if any.
pub fn rejection_reason(content_type: &str, filename: &str, size: usize) -> Option<String> {
    if !is_supported(content_type, filename) {
        return Some("Only PDF and DOCX files are allowed".to_string());
    }
    if size > MAX_FILE_SIZE {
        return Some(format!(
            "File too large. Maximum size is {} MB",
            MAX_FILE_SIZE / 1024 / 1024
        ));
    }
    None
}

fn extension_from_filename(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}
