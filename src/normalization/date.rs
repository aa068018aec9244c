use chrono::NaiveDate;

/// Release dates in the review export look like `Nov 3, 2006`.
pub const RELEASE_DATE_FORMAT: &str = "%b %d, %Y";

/// Storage format for release dates in the `games` table.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a release date in the fixed `Mon D, YYYY` format.
///
/// Placeholders such as `releases on TBD` are absent rather than an error.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), RELEASE_DATE_FORMAT).ok()
}

pub fn format_release_date(date: NaiveDate) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unpadded_day() {
        assert_eq!(
            parse_release_date("Nov 3, 2006"),
            NaiveDate::from_ymd_opt(2006, 11, 3)
        );
    }

    #[test]
    fn parses_padded_day_with_whitespace() {
        assert_eq!(
            parse_release_date(" Feb 25, 2022 "),
            NaiveDate::from_ymd_opt(2022, 2, 25)
        );
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(parse_release_date("releases on TBD"), None);
        assert_eq!(parse_release_date("2006-11-03"), None);
        assert_eq!(parse_release_date("Feb 30, 2022"), None);
    }

    #[test]
    fn formats_as_iso_date() {
        let date = NaiveDate::from_ymd_opt(2006, 11, 3).expect("valid date");
        assert_eq!(format_release_date(date), "2006-11-03");
    }
}
