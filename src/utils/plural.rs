//! Pluralization and size formatting utilities.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 files)
/// - `plural_s(1)` -> `""` (1 file)
/// - `plural_s(5)` -> `"s"` (5 files)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "page")` -> `"0 pages"`
/// - `plural_count(1, "page")` -> `"1 page"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

/// Human-readable byte size with SI units and three significant digits
///
/// # Examples
///
/// - `pretty_size(0)` -> `"0 B"`
/// - `pretty_size(1337)` -> `"1.34 kB"`
/// - `pretty_size(100_000)` -> `"100 kB"`
#[allow(clippy::cast_precision_loss)]
pub fn pretty_size(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

    if bytes < 1000 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    let formatted = if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    };
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        &formatted
    };

    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "page"), "0 pages");
        assert_eq!(plural_count(1, "page"), "1 page");
        assert_eq!(plural_count(2, "page"), "2 pages");
    }

    #[test]
    fn test_pretty_size_bytes() {
        assert_eq!(pretty_size(0), "0 B");
        assert_eq!(pretty_size(21), "21 B");
        assert_eq!(pretty_size(999), "999 B");
    }

    #[test]
    fn test_pretty_size_units() {
        assert_eq!(pretty_size(1000), "1 kB");
        assert_eq!(pretty_size(1337), "1.34 kB");
        assert_eq!(pretty_size(1500), "1.5 kB");
        assert_eq!(pretty_size(12_345), "12.3 kB");
        assert_eq!(pretty_size(100_000), "100 kB");
        assert_eq!(pretty_size(2_500_000), "2.5 MB");
    }
}
