use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

static MEETING_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^LDM-(?<year>\d{4})-(?<month>\d{2})-(?<day>\d{2})\.md$")
        .expect("meeting file name pattern is valid")
});

/// Date encoded in a `LDM-YYYY-MM-DD.md` file name.
///
/// Names that do not match, or whose digits are not a calendar date
/// (`LDM-2024-02-30.md`), yield `None`.
pub fn parse_meeting_date(file_name: &str) -> Option<NaiveDate> {
    let captures = MEETING_FILE_NAME.captures(file_name)?;
    let year = captures["year"].parse().ok()?;
    let month = captures["month"].parse().ok()?;
    let day = captures["day"].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// "C# Language Design Meeting for November 3rd, 2024"
pub fn meeting_title(date: NaiveDate) -> String {
    format!(
        "C# Language Design Meeting for {} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meeting_date_matches() {
        assert_eq!(
            parse_meeting_date("LDM-2024-11-03.md"),
            NaiveDate::from_ymd_opt(2024, 11, 3)
        );
        assert_eq!(
            parse_meeting_date("LDM-2023-12-20.md"),
            NaiveDate::from_ymd_opt(2023, 12, 20)
        );
    }

    #[test]
    fn test_parse_meeting_date_rejects_other_names() {
        let rejected = [
            "notes-2024-11-03.md",
            "LDM-2024-11-03.txt",
            "LDM-2024-11-3.md",
            "LDM-24-11-03.md",
            "LDM-2024_11_03.md",
            "ldm-2024-11-03.md",
            "LDM-2024-11-03.md.bak",
            "xLDM-2024-11-03.md",
            "meetings/2024/LDM-2024-11-03.md",
            "LDM-2024-11-03-1.md",
            "README.md",
            "",
        ];
        for name in rejected {
            assert_eq!(parse_meeting_date(name), None, "{name}");
        }
    }

    #[test]
    fn test_parse_meeting_date_rejects_impossible_dates() {
        assert_eq!(parse_meeting_date("LDM-2024-02-30.md"), None);
        assert_eq!(parse_meeting_date("LDM-2024-13-01.md"), None);
        assert_eq!(parse_meeting_date("LDM-2024-00-10.md"), None);
        assert!(parse_meeting_date("LDM-2024-02-29.md").is_some());
    }

    #[test]
    fn test_ordinal_suffix() {
        let cases = [
            (1, "st"), (2, "nd"), (3, "rd"), (4, "th"), (10, "th"),
            (11, "th"), (12, "th"), (13, "th"), (14, "th"),
            (21, "st"), (22, "nd"), (23, "rd"), (24, "th"),
            (30, "th"), (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "{day}");
        }
    }

    #[test]
    fn test_meeting_title() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        assert_eq!(meeting_title(date), "C# Language Design Meeting for November 3rd, 2024");

        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(meeting_title(date), "C# Language Design Meeting for January 10th, 2024");

        let date = NaiveDate::from_ymd_opt(2023, 8, 22).unwrap();
        assert_eq!(meeting_title(date), "C# Language Design Meeting for August 22nd, 2023");
    }
}
