mod ord;

pub use ord::compare_versions;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEMVER_PARTITION: Regex = Regex::new(
        r"^((?P<epoch>[0-9]+):)?(?P<major>[0-9]+)\.(?P<minor>[0-9]+)\.(?P<patch>[0-9]+)(-r(?P<revision>[0-9]+))?$"
    )
    .unwrap();
    static ref DATE_PATTERN: Regex =
        Regex::new(r"(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})").unwrap();
}

/// `[epoch:]major.minor.patch[-rN]`. Digit runs are kept as text so arbitrarily long numbers compare correctly.
#[derive(PartialEq, Eq, Clone, Debug)]
struct SemVersion<'a> {
    epoch: Option<&'a str>,
    major: &'a str,
    minor: &'a str,
    patch: &'a str,
    revision: Option<&'a str>,
}

impl<'a> SemVersion<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let segments = SEMVER_PARTITION.captures(s)?;
        // The regex ensures these groups always exist
        let part = |name: &str| segments.name(name).map(|m| m.as_str());
        Some(SemVersion {
            epoch: part("epoch"),
            major: part("major")?,
            minor: part("minor")?,
            patch: part("patch")?,
            revision: part("revision"),
        })
    }
}

/// First `YYYY-MM-DD` in the string, if it is a real calendar date
fn find_date(s: &str) -> Option<NaiveDate> {
    let segments = DATE_PATTERN.captures(s)?;
    let year = segments.name("year")?.as_str().parse().ok()?;
    let month = segments.name("month")?.as_str().parse().ok()?;
    let day = segments.name("day")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
