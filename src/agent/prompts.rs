//! Fixed texts: agent descriptions, help messages, and LLM prompt templates.

/// Default description of the trigonometry agent, shown to the router.
pub const TRIGONOMETRY_DESCRIPTION: &str = "\
Calculates trigonometric functions (sine, cosine, tangent, cosecant, secant, cotangent) \
for specific angles in degrees or radians and provides trigonometric identities (basic, \
angle sum/difference, double angle, half angle, product-to-sum, sum-to-product, \
reciprocal/quotient, cofunction). Not for generating code.";

/// Default description of the coding agent, shown to the router.
pub const CODING_DESCRIPTION: &str = "\
Generates executable Python code for trigonometric functions, equations, or identities. \
Specifically for queries like 'code for sine calculation', 'python function for angle sum \
identity', 'generate code for cos(2θ) formula'.";

/// Trigonometry agent: query matched no skill.
pub const TRIGONOMETRY_HELP: &str = "\
Please ask for a trigonometric calculation (e.g., 'sine of 30 degrees') or an identity \
(e.g., 'list basic identities').";

/// Trigonometry agent: query asked for code.
pub const CODE_REJECTION: &str = "\
This agent does not write code. Ask the coding agent for Python code related to \
trigonometry (e.g., 'code for sine calculation' or 'generate a function for angle sum identity').";

/// Coding agent: query is not a code request.
pub const CODING_HELP: &str = "\
Please ask for Python code related to trigonometry (e.g., 'code for sine calculation' or \
'generate a function for angle sum identity').";

/// Calculation skill: no angle in the query.
pub const ANGLE_GUIDANCE: &str =
    "Could not extract a valid angle. Please specify an angle (e.g., 'sine of 30 degrees').";

/// Calculation skill: the angle overflowed to infinity.
pub const ANGLE_RANGE_ERROR: &str =
    "Error in calculation: the angle is too large to evaluate. Please use a smaller angle.";

/// Calculation skill: no function name in the query.
pub const FUNCTION_GUIDANCE: &str =
    "Please specify a trigonometric function to calculate (e.g., sine, cosine, tangent).";

/// Instructions for generating code through the LLM.
pub const CODE_GENERATION_PROMPT: &str = "\
You are a Python code generator for trigonometry. Write a short, runnable Python script \
that answers the request below. Use only the standard `math` module, convert degrees with \
math.radians, guard divisions whose denominator is within 1e-9 of zero, and end with an \
example usage that prints its results. Respond with a single ```python fenced block and \
nothing else.";

/// Build the code-generation prompt for a query.
pub fn build_code_prompt(query: &str) -> String {
    format!("{CODE_GENERATION_PROMPT}\n\nRequest: {query}")
}

/// Prefix for result summaries.
pub const SUMMARY_PREFIX: &str = "Briefly summarize this trigonometry result: ";

/// Longest slice of a result sent for summarizing.
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Build the summary prompt, truncating the result on a char boundary.
pub fn build_summary_prompt(result_text: &str) -> String {
    let truncated: String = result_text.chars().take(SUMMARY_MAX_CHARS).collect();
    format!("{SUMMARY_PREFIX}{truncated}")
}
