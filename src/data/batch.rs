//! Batch Year Extraction
//! Maps enrollment numbers of mixed formats to a "YYYY - YYYY" batch label.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Label for enrollment numbers that match no known format.
pub const UNKNOWN_BATCH: &str = "Unknown";

type Transform = fn(&Captures) -> Option<String>;

/// Ordered (pattern, transform) rules. First match wins.
static RULES: Lazy<Vec<(Regex, Transform)>> = Lazy::new(|| {
    vec![
        // NED-24012/2001-2002, NED-26000/1/2003-2004
        (
            Regex::new(r"([0-9]{4})-([0-9]{4})").unwrap(),
            full_years as Transform,
        ),
        // NED-23019/2000-
        (
            Regex::new(r"/([0-9]{4})-").unwrap(),
            start_year_only as Transform,
        ),
        // NED/0073/08-09, NED-0001/04-05
        (
            Regex::new(r"/([0-9]{2})-([0-9]{2})").unwrap(),
            short_years as Transform,
        ),
    ]
});

fn full_years(caps: &Captures) -> Option<String> {
    Some(format!("{} - {}", &caps[1], &caps[2]))
}

fn start_year_only(caps: &Captures) -> Option<String> {
    let year: u32 = caps[1].parse().ok()?;
    Some(format!("{} - {}", &caps[1], year + 1))
}

/// Two-digit years are always read as 20xx.
fn short_years(caps: &Captures) -> Option<String> {
    Some(format!("20{} - 20{}", &caps[1], &caps[2]))
}

/// Extract the batch label from an enrollment number.
///
/// Never fails: anything unrecognised yields [`UNKNOWN_BATCH`].
pub fn extract_batch_year(enrollment_number: &str) -> String {
    RULES
        .iter()
        .find_map(|(pattern, transform)| {
            pattern
                .captures(enrollment_number)
                .and_then(|caps| transform(&caps))
        })
        .unwrap_or_else(|| UNKNOWN_BATCH.to_string())
}
