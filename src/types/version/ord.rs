use super::{find_date, SemVersion};
use std::cmp::Ordering;

/// Compare two OpenWRT version strings.
///
/// This is a heuristic for the version shapes found in OpenWRT feeds, not a
/// full opkg ordering. In order of preference:
/// 1. `[epoch:]major.minor.patch[-rN]` on both sides
/// 2. the first `YYYY-MM-DD` date on both sides
/// 3. plain byte-wise string order
pub fn compare_versions(v1: &str, v2: &str) -> Ordering {
    if v1 == v2 {
        return Ordering::Equal;
    }

    if let (Some(x), Some(y)) = (SemVersion::parse(v1), SemVersion::parse(v2)) {
        return x.cmp_sem(&y);
    }

    if let (Some(x), Some(y)) = (find_date(v1), find_date(v2)) {
        return x.cmp(&y);
    }

    v1.cmp(v2)
}

impl SemVersion<'_> {
    fn cmp_sem(&self, other: &Self) -> Ordering {
        // Epoch only counts when both sides declare one
        if let (Some(x), Some(y)) = (self.epoch, other.epoch) {
            match cmp_digits(x, y) {
                Ordering::Equal => (),
                res => return res,
            }
        }

        for (x, y) in [
            (self.major, other.major),
            (self.minor, other.minor),
            (self.patch, other.patch),
        ] {
            match cmp_digits(x, y) {
                Ordering::Equal => (),
                res => return res,
            }
        }

        // A version carrying a revision is newer than the bare one
        match (self.revision, other.revision) {
            (Some(x), Some(y)) => cmp_digits(x, y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Numeric comparison of two ASCII digit runs of any length
fn cmp_digits(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

#[test]
fn test_cmp_digits() {
    assert_eq!(cmp_digits("10", "9"), Ordering::Greater);
    assert_eq!(cmp_digits("007", "7"), Ordering::Equal);
    assert_eq!(cmp_digits("0", "000"), Ordering::Equal);
    assert_eq!(
        cmp_digits("340282366920938463463374607431768211456", "340282366920938463463374607431768211457"),
        Ordering::Less
    );
}
