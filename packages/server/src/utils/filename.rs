use std::path::Path;

/// Why a client-supplied filename was refused.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    Empty,
    /// Contains `/` or `\`.
    ContainsPathSeparator,
    NullByte,
    /// Starts with a dot, which also covers `.` and `..`.
    Hidden,
    /// CR, LF or other ASCII control characters.
    ControlCharacter,
}

impl FilenameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
        }
    }
}

/// Validates an upload filename and returns it trimmed. Only the extension of
/// the name is ever used on disk, but a name that could not be a plain file
/// is still rejected.
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }
    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }
    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}

/// Case-insensitive extension check; `expected` has no leading dot.
pub fn has_extension(filename: &str, expected: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}
