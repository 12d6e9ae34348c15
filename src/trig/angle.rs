//! Angle extraction from free text.
//!
//! Only the first number-like token is considered. "add 2 and 30 degrees"
//! parses as 2 radians; compound queries are not disambiguated.

use std::f64::consts::PI;
use std::sync::LazyLock;

use regex::Regex;

/// Number (optionally signed, optionally decimal) with an optional unit token.
static ANGLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([-+]?[0-9]*\.?[0-9]+)\s*(degrees?|deg|°|radians?|rad|π)?")
        .expect("angle pattern is valid")
});

/// An angle found in a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedAngle {
    /// Angle in radians, whatever unit the query used.
    pub radians: f64,
    /// The query spelled the angle in degrees. Display only.
    pub is_degree: bool,
}

impl ParsedAngle {
    /// The angle in the unit the query used.
    pub fn display_value(&self) -> f64 {
        if self.is_degree {
            self.radians.to_degrees()
        } else {
            self.radians
        }
    }

    /// "degrees" or "radians".
    pub fn unit_name(&self) -> &'static str {
        if self.is_degree {
            "degrees"
        } else {
            "radians"
        }
    }
}

/// Parse the first angle in `query`.
///
/// - `<n> π` → `n * π` radians
/// - `<n> degrees|degree|deg|°` → converted to radians, `is_degree = true`
/// - `<n> radians|radian|rad` or a bare number → taken as radians
///
/// Returns `None` when the text holds no number at all.
pub fn parse_angle(query: &str) -> Option<ParsedAngle> {
    let lowered = query.to_lowercase();
    let caps = ANGLE_PATTERN.captures(&lowered)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");

    let parsed = match unit {
        "π" => ParsedAngle {
            radians: value * PI,
            is_degree: false,
        },
        u if u.starts_with("deg") || u == "°" => ParsedAngle {
            radians: value.to_radians(),
            is_degree: true,
        },
        _ => ParsedAngle {
            radians: value,
            is_degree: false,
        },
    };

    tracing::debug!(
        "parsed angle {} {} from '{query}'",
        parsed.radians,
        if parsed.is_degree { "(deg)" } else { "(rad)" }
    );
    Some(parsed)
}
