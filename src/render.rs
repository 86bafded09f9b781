//! HTML fragments and display formatters shared by the panels.

use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt::{Display, Formatter};

/// Owned HTML markup that replaces the whole content of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape text for interpolation into element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped text of an optional backend field, empty when absent.
pub fn text(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_default()
}

/// Optional count, empty when absent.
pub fn count(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// Clamped like a substring call, so short tokens yield empty parts.
fn segment(bucket: &str, start: usize, end: usize) -> &str {
    let end = end.min(bucket.len());
    let start = start.min(end);
    bucket.get(start..end).unwrap_or("")
}

/// Render a `YYYYMMDDHH...` time-bucket token as `DD/MM/YYYY HH:00`.
///
/// Missing or empty tokens render as an empty string.
pub fn format_time_bucket(bucket: Option<&str>) -> String {
    let Some(bucket) = bucket.filter(|b| !b.is_empty()) else {
        return String::new();
    };
    let year = segment(bucket, 0, 4);
    let month = segment(bucket, 4, 6);
    let day = segment(bucket, 6, 8);
    let hour = segment(bucket, 8, 10);
    escape_html(&format!("{}/{}/{} {}:00", day, month, year, hour))
}

fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Render an ISO-8601 instant as `DD/MM/YYYY, HH:MM:SS`.
///
/// Instants with an offset are shown in local time, naive ones as given.
/// Anything unparseable is shown verbatim.
pub fn format_instant(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(raw) => match parse_instant(raw) {
            Some(instant) => instant.format("%d/%m/%Y, %H:%M:%S").to_string(),
            None => escape_html(raw),
        },
    }
}

/// Generic danger alert shown when a panel cannot load its data.
pub fn error_fragment() -> Fragment {
    Fragment::new(
        r#"
        <div class="alert alert-danger">
            <i class="bi bi-exclamation-triangle-fill"></i>
            Error al cargar los datos. Por favor, intente nuevamente.
        </div>"#,
    )
}

/// Neutral "no data" block: a large icon above a muted message.
pub fn empty_fragment(icon: &str, message: &str) -> Fragment {
    Fragment::new(format!(
        r#"
        <div class="text-center text-muted">
            <i class="bi {}" style="font-size: 2rem;"></i>
            <p>{}</p>
        </div>"#,
        icon, message
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_bucket_hourly() {
        assert_eq!(format_time_bucket(Some("2024031512")), "15/03/2024 12:00");
    }

    #[test]
    fn test_format_time_bucket_ignores_trailing_digits() {
        assert_eq!(
            format_time_bucket(Some("20240315100000")),
            "15/03/2024 10:00"
        );
    }

    #[test]
    fn test_format_time_bucket_empty_or_missing() {
        assert_eq!(format_time_bucket(None), "");
        assert_eq!(format_time_bucket(Some("")), "");
    }

    #[test]
    fn test_format_time_bucket_daily_token_has_no_hour() {
        assert_eq!(format_time_bucket(Some("20240315")), "15/03/2024 :00");
    }

    #[test]
    fn test_format_instant_naive() {
        assert_eq!(
            format_instant(Some("2024-03-15T12:34:56.123456")),
            "15/03/2024, 12:34:56"
        );
        assert_eq!(
            format_instant(Some("2024-03-15T08:05:00")),
            "15/03/2024, 08:05:00"
        );
    }

    #[test]
    fn test_format_instant_with_offset_is_local_time() {
        for raw in ["2024-03-15T12:34:56Z", "2024-03-15T12:34:56+00:00", "2024-03-15T07:34:56-05:00"] {
            let expected = DateTime::parse_from_rfc3339(raw)
                .unwrap()
                .with_timezone(&Local)
                .format("%d/%m/%Y, %H:%M:%S")
                .to_string();
            assert_eq!(format_instant(Some(raw)), expected, "input {}", raw);
        }

        // All three name the same instant.
        assert_eq!(
            format_instant(Some("2024-03-15T12:34:56Z")),
            format_instant(Some("2024-03-15T07:34:56-05:00"))
        );
    }

    #[test]
    fn test_format_instant_unparseable_is_verbatim() {
        assert_eq!(format_instant(Some("yesterday <3")), "yesterday &lt;3");
        assert_eq!(format_instant(None), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_error_fragment_is_danger_styled() {
        let fragment = error_fragment();
        assert!(fragment.contains("alert-danger"));
        assert!(fragment.contains("Error al cargar los datos"));
    }
}
