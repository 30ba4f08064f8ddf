//! Paginator configuration

use crate::error::PaginatorError;
use crate::units::Length;
use serde::Deserialize;

/// Configuration for a paginator instance.
///
/// Page lengths accept any unit the rendering environment can measure. The
/// host passes overrides as a JSON object with camelCase keys; absent fields
/// keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginatorOptions {
    pub page_width: Length,
    pub page_height: Length,
    pub page_inset: Length,
    pub page_gap: Length,
    /// Selection criterion for elements eligible to be pushed across a break
    pub breakable_selector: String,
    /// Coalescing window for change notifications, in milliseconds
    pub debounce_time: f64,
    /// Window after the last scroll during which drift validation may run
    pub scroll_debounce_time: f64,
    /// Height delta (px) below which a size change is not worth a recompute
    pub height_change_threshold: f32,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            page_width: "8.5in".into(),
            page_height: "11in".into(),
            page_inset: "0.5in".into(),
            page_gap: "30px".into(),
            breakable_selector: ".breakable".to_string(),
            debounce_time: 150.0,
            scroll_debounce_time: 500.0,
            height_change_threshold: 1.0,
        }
    }
}

impl PaginatorOptions {
    /// Parse options from a JSON object, falling back to defaults per field.
    pub fn from_json(json: &str) -> Result<Self, PaginatorError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PaginatorOptions::default();
        assert_eq!(options.page_width, "8.5in".into());
        assert_eq!(options.page_gap, "30px".into());
        assert_eq!(options.breakable_selector, ".breakable");
        assert_eq!(options.debounce_time, 150.0);
        assert_eq!(options.scroll_debounce_time, 500.0);
        assert_eq!(options.height_change_threshold, 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options =
            PaginatorOptions::from_json(r#"{"pageGap": 0, "pageHeight": "1000px"}"#).unwrap();
        assert_eq!(options.page_gap, Length::Px(0.0));
        assert_eq!(options.page_height, "1000px".into());
        assert_eq!(options.page_width, "8.5in".into());
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        assert!(PaginatorOptions::from_json("{pageGap}").is_err());
    }
}
