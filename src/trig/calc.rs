//! Calculation engine — the six trigonometric functions with asymptote guards.

use super::angle::ParsedAngle;

/// Denominators smaller than this are treated as zero, so the function is
/// reported undefined rather than as a huge finite value.
pub const UNDEFINED_EPSILON: f64 = 1e-9;

/// The six trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFunction {
    Sine,
    Cosine,
    Tangent,
    Cosecant,
    Secant,
    Cotangent,
}

/// Spellings recognized in queries, scanned in order; the first one found
/// as a substring wins. Full words precede abbreviations so that
/// "cosecant" is not captured by "cos" nor "cotangent" by "tan".
const FUNCTION_SYNONYMS: &[(&str, TrigFunction)] = &[
    ("cosecant", TrigFunction::Cosecant),
    ("cotangent", TrigFunction::Cotangent),
    ("secant", TrigFunction::Secant),
    ("cosine", TrigFunction::Cosine),
    ("sine", TrigFunction::Sine),
    ("tangent", TrigFunction::Tangent),
    ("csc", TrigFunction::Cosecant),
    ("cot", TrigFunction::Cotangent),
    ("sec", TrigFunction::Secant),
    ("cos", TrigFunction::Cosine),
    ("sin", TrigFunction::Sine),
    ("tan", TrigFunction::Tangent),
];

/// Every spelling in the synonym table.
pub fn function_keywords() -> impl Iterator<Item = &'static str> {
    FUNCTION_SYNONYMS.iter().map(|(k, _)| *k)
}

impl TrigFunction {
    /// Find the function named in `query` (lower-cased).
    pub fn resolve(query: &str) -> Option<Self> {
        FUNCTION_SYNONYMS
            .iter()
            .find(|(key, _)| query.contains(key))
            .map(|(_, f)| *f)
    }

    /// Canonical full name.
    pub fn name(&self) -> &'static str {
        match self {
            TrigFunction::Sine => "sine",
            TrigFunction::Cosine => "cosine",
            TrigFunction::Tangent => "tangent",
            TrigFunction::Cosecant => "cosecant",
            TrigFunction::Secant => "secant",
            TrigFunction::Cotangent => "cotangent",
        }
    }

    /// Evaluate at `radians`. `None` when the function is undefined there.
    pub fn value_at(&self, radians: f64) -> Option<f64> {
        let (sin, cos) = radians.sin_cos();
        match self {
            TrigFunction::Sine => Some(sin),
            TrigFunction::Cosine => Some(cos),
            TrigFunction::Tangent => (cos.abs() >= UNDEFINED_EPSILON).then(|| radians.tan()),
            TrigFunction::Cosecant => (sin.abs() >= UNDEFINED_EPSILON).then(|| 1.0 / sin),
            TrigFunction::Secant => (cos.abs() >= UNDEFINED_EPSILON).then(|| 1.0 / cos),
            TrigFunction::Cotangent => {
                (sin.abs() >= UNDEFINED_EPSILON).then(|| 1.0 / radians.tan())
            }
        }
    }

    /// Why the function has no value, for the "undefined" message.
    fn undefined_reason(&self) -> &'static str {
        match self {
            TrigFunction::Tangent => "angle is near a multiple of π/2 where cosine is zero",
            TrigFunction::Secant => {
                "angle is near an odd multiple of 90 degrees or π/2 radians where cosine is zero"
            }
            _ => "angle is near a multiple of π radians where sine is zero",
        }
    }
}

/// Evaluate `function` at `angle` and phrase the answer.
///
/// The displayed angle is in the unit the query used.
pub fn evaluate(function: TrigFunction, angle: ParsedAngle) -> String {
    let shown = angle.display_value();
    let unit = angle.unit_name();
    let name = function.name();

    match function.value_at(angle.radians) {
        Some(value) => format!("The {name} of {shown:.2} {unit} is {value:.4}"),
        None => format!(
            "The {name} of {shown:.2} {unit} is undefined ({}).",
            function.undefined_reason()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::angle::parse_angle;
    use std::f64::consts::PI;

    fn deg(value: f64) -> ParsedAngle {
        ParsedAngle {
            radians: value.to_radians(),
            is_degree: true,
        }
    }

    fn rad(value: f64) -> ParsedAngle {
        ParsedAngle {
            radians: value,
            is_degree: false,
        }
    }

    #[test]
    fn sine_of_thirty_degrees() {
        let angle = parse_angle("sine of 30 degrees").unwrap();
        assert_eq!(
            evaluate(TrigFunction::Sine, angle),
            "The sine of 30.00 degrees is 0.5000"
        );
    }

    #[test]
    fn cosine_in_radians() {
        assert_eq!(
            evaluate(TrigFunction::Cosine, rad(0.0)),
            "The cosine of 0.00 radians is 1.0000"
        );
    }

    #[test]
    fn tangent_undefined_at_ninety_degrees() {
        let msg = evaluate(TrigFunction::Tangent, deg(90.0));
        assert!(msg.contains("undefined"), "{msg}");
        assert!(msg.starts_with("The tangent of 90.00 degrees"));
    }

    #[test]
    fn tangent_undefined_at_odd_multiples_of_half_pi() {
        for k in [-3.0, -1.0, 1.0, 3.0, 5.0] {
            let msg = evaluate(TrigFunction::Tangent, rad(k * PI / 2.0));
            assert!(msg.contains("undefined"), "k={k}: {msg}");
        }
    }

    #[test]
    fn tangent_threshold_near_half_pi() {
        let msg = evaluate(TrigFunction::Tangent, rad(PI / 2.0 + 5e-10));
        assert!(msg.contains("undefined"), "{msg}");

        let angle = PI / 2.0 + 1e-6;
        let msg = evaluate(TrigFunction::Tangent, rad(angle));
        assert!(!msg.contains("undefined"), "{msg}");
        assert!(msg.starts_with("The tangent of 1.57 radians is -"), "{msg}");
        assert!(TrigFunction::Tangent.value_at(angle).unwrap() < -999_000.0);
    }

    #[test]
    fn tangent_defined_elsewhere() {
        assert_eq!(
            evaluate(TrigFunction::Tangent, deg(45.0)),
            "The tangent of 45.00 degrees is 1.0000"
        );
    }

    #[test]
    fn reciprocal_functions() {
        assert_eq!(
            evaluate(TrigFunction::Cosecant, deg(30.0)),
            "The cosecant of 30.00 degrees is 2.0000"
        );
        assert_eq!(
            evaluate(TrigFunction::Secant, deg(60.0)),
            "The secant of 60.00 degrees is 2.0000"
        );
        assert_eq!(
            evaluate(TrigFunction::Cotangent, deg(45.0)),
            "The cotangent of 45.00 degrees is 1.0000"
        );
    }

    #[test]
    fn reciprocal_functions_undefined() {
        assert!(evaluate(TrigFunction::Cosecant, deg(0.0)).contains("undefined"));
        assert!(evaluate(TrigFunction::Cotangent, deg(180.0)).contains("undefined"));
        assert!(evaluate(TrigFunction::Secant, deg(90.0)).contains("undefined"));
    }

    #[test]
    fn resolve_prefers_full_spellings() {
        assert_eq!(TrigFunction::resolve("cosecant of 30"), Some(TrigFunction::Cosecant));
        assert_eq!(TrigFunction::resolve("cotangent of 30"), Some(TrigFunction::Cotangent));
        assert_eq!(TrigFunction::resolve("cosine of 30"), Some(TrigFunction::Cosine));
        assert_eq!(TrigFunction::resolve("secant of 30"), Some(TrigFunction::Secant));
        assert_eq!(TrigFunction::resolve("sin 30 deg"), Some(TrigFunction::Sine));
        assert_eq!(TrigFunction::resolve("tan(45°)"), Some(TrigFunction::Tangent));
        assert_eq!(TrigFunction::resolve("csc 1"), Some(TrigFunction::Cosecant));
        assert_eq!(TrigFunction::resolve("value of 30"), None);
    }

    #[test]
    fn keywords_cover_all_spellings() {
        let keywords: Vec<_> = function_keywords().collect();
        assert_eq!(keywords.len(), 12);
        assert!(keywords.contains(&"cot"));
        assert!(keywords.contains(&"sine"));
    }
}
