//! Display helpers shared by the list and detail renderers.
use chrono::NaiveDate;

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/500x750?text=No+Image";
pub const UNKNOWN_DATE: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

pub const POSTER_THUMB: &str = "w200";
pub const POSTER_FULL: &str = "w500";
pub const BACKDROP_FULL: &str = "original";

/// Size tokens are passed through as-is.
pub fn resolve_image_url(path: Option<&str>, size: &str) -> String {
    match path {
        Some(p) => format!("{IMAGE_BASE}/{size}{p}"),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// `2010-07-15` becomes `July 15, 2010`. Anything that does not parse as a
/// calendar date is returned unchanged.
pub fn format_date(date: Option<&str>) -> String {
    let raw = match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => d,
        None => return UNKNOWN_DATE.to_string(),
    };
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// One decimal, with halves rounded away from zero.
pub fn format_rating(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => format!("{:.1}", (v * 10.0).round() / 10.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(0) | None => NOT_AVAILABLE.to_string(),
        Some(m) if m < 60 => format!("{m}m"),
        Some(m) => format!("{}h {}m", m / 60, m % 60),
    }
}

/// Whole dollars with thousands separators. Zero counts as unknown.
pub fn format_money(amount: Option<u64>) -> String {
    let amount = match amount {
        Some(0) | None => return NOT_AVAILABLE.to_string(),
        Some(a) => a.to_string(),
    };
    let mut out = String::with_capacity(amount.len() + amount.len() / 3 + 1);
    for (i, c) in amount.chars().enumerate() {
        if i > 0 && (amount.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${out}")
}

pub fn release_year(date: Option<&str>) -> Option<&str> {
    let year = date?.split('-').next()?;
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Some(year)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_urls_use_size_token_or_placeholder() {
        assert_eq!(
            resolve_image_url(Some("/abc.jpg"), "w500"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(resolve_image_url(None, "w500"), PLACEHOLDER_IMAGE);
        assert_eq!(resolve_image_url(None, "anything"), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn dates_render_long_english_form() {
        assert_eq!(format_date(Some("2010-07-15")), "July 15, 2010");
        assert_eq!(format_date(Some("1994-09-03")), "September 3, 1994");
        assert_eq!(format_date(None), "Unknown");
        assert_eq!(format_date(Some("")), "Unknown");
        assert_eq!(format_date(Some("sometime")), "sometime");
    }

    #[test]
    fn ratings_round_to_one_decimal() {
        assert_eq!(format_rating(Some(0.0)), "N/A");
        assert_eq!(format_rating(Some(8.7)), "8.7");
        assert_eq!(format_rating(None), "N/A");
        assert_eq!(format_rating(Some(7.26)), "7.3");
        assert_eq!(format_rating(Some(8.25)), "8.3");
        assert_eq!(format_rating(Some(6.25)), "6.3");
        assert_eq!(format_rating(Some(7.0)), "7.0");
        assert_eq!(format_rating(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn runtime_splits_hours_and_minutes() {
        assert_eq!(format_runtime(Some(142)), "2h 22m");
        assert_eq!(format_runtime(Some(45)), "45m");
        assert_eq!(format_runtime(Some(0)), "N/A");
        assert_eq!(format_runtime(None), "N/A");
    }

    #[test]
    fn money_groups_thousands_and_hides_zero() {
        assert_eq!(format_money(Some(25_000_000)), "$25,000,000");
        assert_eq!(format_money(Some(999)), "$999");
        assert_eq!(format_money(Some(1_000)), "$1,000");
        assert_eq!(format_money(Some(0)), "N/A");
        assert_eq!(format_money(None), "N/A");
    }

    #[test]
    fn release_year_needs_four_digits() {
        assert_eq!(release_year(Some("2010-07-15")), Some("2010"));
        assert_eq!(release_year(Some("")), None);
        assert_eq!(release_year(None), None);
    }
}
