use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Strict emoji character class: astral-plane symbols plus the misc-symbols
/// and dingbats blocks. Plain text like "GOAL" does not match.
pub static EMOJI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\x{10000}-\x{10FFFF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]+$")
        .expect("invalid emoji pattern")
});

/// Validator hook for achievement emoji fields.
pub fn validate_emoji(value: &str) -> Result<(), ValidationError> {
    if EMOJI_PATTERN.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("emoji");
        err.message = Some("This field must contain only emojis.".into());
        Err(err)
    }
}

/// Validator hook for video URLs: must parse as an absolute URL.
pub fn validate_absolute_url(value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut err = ValidationError::new("url");
            err.message = Some("Enter a valid URL.".into());
            Err(err)
        }
    }
}
