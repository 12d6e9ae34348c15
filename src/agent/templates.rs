//! Built-in Python templates for the coding agent when no LLM is configured.

/// A named code template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeTemplate {
    pub name: &'static str,
    pub code: &'static str,
}

const DOUBLE_ANGLE: CodeTemplate = CodeTemplate {
    name: "double_angle",
    code: r#"import math

def double_angle_sine(theta_degrees):
    """Calculate sin(2θ) using the double angle identity."""
    theta = math.radians(theta_degrees)
    return 2 * math.sin(theta) * math.cos(theta)

def double_angle_cosine(theta_degrees):
    """Calculate cos(2θ) using the double angle identity."""
    theta = math.radians(theta_degrees)
    return math.cos(theta) ** 2 - math.sin(theta) ** 2

def double_angle_tangent(theta_degrees):
    """Calculate tan(2θ) using the double angle identity."""
    tan_theta = math.tan(math.radians(theta_degrees))
    denominator = 1 - tan_theta ** 2
    if abs(denominator) < 1e-9:
        return float("nan")
    return (2 * tan_theta) / denominator

theta = 30
print(f"sin(2 * {theta}) = {double_angle_sine(theta):.4f}")
print(f"cos(2 * {theta}) = {double_angle_cosine(theta):.4f}")
print(f"tan(2 * {theta}) = {double_angle_tangent(theta):.4f}")"#,
};

const ANGLE_SUM: CodeTemplate = CodeTemplate {
    name: "angle_sum",
    code: r#"import math

def angle_sum_sine(a_degrees, b_degrees):
    """Calculate sin(a + b) using the angle sum identity."""
    a, b = math.radians(a_degrees), math.radians(b_degrees)
    return math.sin(a) * math.cos(b) + math.cos(a) * math.sin(b)

def angle_sum_cosine(a_degrees, b_degrees):
    """Calculate cos(a + b) using the angle sum identity."""
    a, b = math.radians(a_degrees), math.radians(b_degrees)
    return math.cos(a) * math.cos(b) - math.sin(a) * math.sin(b)

def angle_sum_tangent(a_degrees, b_degrees):
    """Calculate tan(a + b) using the angle sum identity."""
    tan_a = math.tan(math.radians(a_degrees))
    tan_b = math.tan(math.radians(b_degrees))
    denominator = 1 - tan_a * tan_b
    if abs(denominator) < 1e-9:
        return float("nan")
    return (tan_a + tan_b) / denominator

a, b = 30, 45
print(f"sin({a} + {b}) = {angle_sum_sine(a, b):.4f}")
print(f"cos({a} + {b}) = {angle_sum_cosine(a, b):.4f}")
print(f"tan({a} + {b}) = {angle_sum_tangent(a, b):.4f}")"#,
};

const COSINE: CodeTemplate = CodeTemplate {
    name: "cosine",
    code: r#"import math

def calculate_cosine(angle_degrees):
    """Calculate the cosine of an angle in degrees."""
    return math.cos(math.radians(angle_degrees))

angle = 30
print(f"Cosine of {angle} degrees is {calculate_cosine(angle):.4f}")"#,
};

const SINE: CodeTemplate = CodeTemplate {
    name: "sine",
    code: r#"import math

def calculate_sine(angle_degrees):
    """Calculate the sine of an angle in degrees."""
    return math.sin(math.radians(angle_degrees))

angle = 30
print(f"Sine of {angle} degrees is {calculate_sine(angle):.4f}")"#,
};

const TANGENT: CodeTemplate = CodeTemplate {
    name: "tangent",
    code: r#"import math

def calculate_tangent(angle_degrees):
    """Calculate the tangent of an angle in degrees."""
    angle = math.radians(angle_degrees)
    if abs(math.cos(angle)) < 1e-9:
        return float("nan")
    return math.tan(angle)

angle = 45
print(f"Tangent of {angle} degrees is {calculate_tangent(angle):.4f}")"#,
};

const GENERIC: CodeTemplate = CodeTemplate {
    name: "generic",
    code: r#"import math

def trig_function(angle_degrees, func_type="sin"):
    """Evaluate sin, cos or tan of an angle in degrees."""
    angle = math.radians(angle_degrees)
    if func_type == "sin":
        return math.sin(angle)
    if func_type == "cos":
        return math.cos(angle)
    if func_type == "tan":
        if abs(math.cos(angle)) < 1e-9:
            return float("nan")
        return math.tan(angle)
    raise ValueError(f"unsupported function type: {func_type}")

angle = 30
print(f"Sine of {angle} degrees is {trig_function(angle, 'sin'):.4f}")"#,
};

/// Template selection order; the first whose phrases occur in the query wins.
/// Cosine precedes sine since "cosine" contains "sine".
const SELECTION: &[(&[&str], CodeTemplate)] = &[
    (&["double angle"], DOUBLE_ANGLE),
    (&["angle sum", "angle difference"], ANGLE_SUM),
    (&["cosine", "cos"], COSINE),
    (&["sine", "sin"], SINE),
    (&["tangent", "tan"], TANGENT),
];

/// Pick a template for a lower-cased query.
pub fn select_template(query: &str) -> CodeTemplate {
    SELECTION
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| query.contains(p)))
        .map(|(_, template)| *template)
        .unwrap_or(GENERIC)
}

/// Wrap code in a python fence.
pub fn fenced(code: &str) -> String {
    format!("```python\n{code}\n```")
}
