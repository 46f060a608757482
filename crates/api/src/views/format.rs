//! Cell formatting for tiles and tables.
//!
//! Non-finite numbers are shown as Rust prints them (`inf`, `-inf`, `NaN`).

/// Relative change as a percentage with two decimals.
pub fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value * 100.0)
    } else {
        value.to_string()
    }
}

/// Raw metric value with one decimal.
pub fn number(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// CSS class for a signed cell: red below zero, green above.
pub fn sign_class(value: f64) -> &'static str {
    if !value.is_finite() || value == 0.0 {
        "flat"
    } else if value < 0.0 {
        "neg"
    } else {
        "pos"
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.4), "40.00%");
        assert_eq!(percent(-0.12345), "-12.35%");
        assert_eq!(percent(f64::INFINITY), "inf");
        assert_eq!(percent(f64::NAN), "NaN");
    }

    #[test]
    fn test_sign_class() {
        assert_eq!(sign_class(-0.1), "neg");
        assert_eq!(sign_class(0.1), "pos");
        assert_eq!(sign_class(0.0), "flat");
        assert_eq!(sign_class(f64::NEG_INFINITY), "flat");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>\"R&D\"</b>"), "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;");
    }
}
