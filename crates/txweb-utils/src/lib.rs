//! Display helpers

use chrono::{DateTime, Utc};

/// Shorten an account address for table cells: `0x1234…abcd`
pub fn truncate_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{}...{}", head, tail),
        _ => address.to_string(),
    }
}

/// Format an amount string as `X.XXXX ETH`; unparsable input is shown raw
pub fn format_amount(amount: &str) -> String {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{:.4} ETH", value),
        _ => amount.to_string(),
    }
}

/// Escape text for interpolation into HTML attributes and bodies
pub fn escape_html(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Human-friendly age of a timestamp relative to `now`
pub fn format_relative_time(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *timestamp).num_seconds();
    if seconds < 0 {
        return timestamp.format("%b %-d, %Y").to_string();
    }
    if seconds < 60 {
        return "just now".to_string();
    }
    if seconds < 3600 {
        return format!("{} minutes ago", seconds / 60);
    }
    if seconds < 86400 {
        return format!("{} hours ago", seconds / 3600);
    }
    if seconds < 2_592_000 {
        return format!("{} days ago", seconds / 86400);
    }
    timestamp.format("%b %-d, %Y").to_string()
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("0xABCDEF0123456789ABCDEF0123456789ABCDEF01"),
            "0xABCD...EF01"
        );
        assert_eq!(truncate_address(""), "");
        assert_eq!(truncate_address("0x1234"), "0x1234");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("1.5"), "1.5000 ETH");
        assert_eq!(format_amount("0.123456"), "0.1235 ETH");
        assert_eq!(format_amount("garbage"), "garbage");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'> & more"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt; &amp; more"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let t = Utc.with_ymd_and_hms(2024, 6, 15, 11, 59, 30).unwrap();
        assert_eq!(format_relative_time(&t, &now), "just now");

        let t = Utc.with_ymd_and_hms(2024, 6, 15, 11, 30, 0).unwrap();
        assert_eq!(format_relative_time(&t, &now), "30 minutes ago");

        let t = Utc.with_ymd_and_hms(2024, 6, 15, 6, 0, 0).unwrap();
        assert_eq!(format_relative_time(&t, &now), "6 hours ago");

        let t = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time(&t, &now), "5 days ago");

        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_relative_time(&t, &now), "Jan 1, 2024");
    }
}
