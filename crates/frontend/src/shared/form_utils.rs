use web_sys::HtmlFormElement;

use super::error::ApiError;

/// Native constraint check of a form before anything is sent.
///
/// An invalid form shows the browser's inline hints.
pub fn validate_form(form: &HtmlFormElement) -> Result<(), ApiError> {
    if form.check_validity() {
        return Ok(());
    }
    form.report_validity();
    Err(ApiError::Validation("Проверьте заполнение формы".to_string()))
}

/// Empty (or blank) input means "not set"
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Text of an input bound to an optional field
pub fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional() {
        assert_eq!(optional(""), None);
        assert_eq!(optional("   "), None);
        assert_eq!(optional(" 250 "), Some("250".to_string()));
    }

    #[test]
    fn test_or_empty() {
        assert_eq!(or_empty(&None), "");
        assert_eq!(or_empty(&Some("12".into())), "12");
    }
}
