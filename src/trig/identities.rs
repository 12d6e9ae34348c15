//! Identity catalog — eight fixed groups of trigonometric formulas.
//!
//! Built once at startup and shared behind an `Arc`; never mutated.

/// A named bundle of related formulas.
#[derive(Debug, Clone)]
pub struct IdentityGroup {
    /// Snake-case group name, e.g. `double_angle`.
    pub name: &'static str,
    /// Phrases that select this group.
    pub keywords: &'static [&'static str],
    /// Formulas in display order.
    pub formulas: &'static [&'static str],
}

impl IdentityGroup {
    /// Title-cased, space-separated name: `double_angle` → `Double Angle`.
    pub fn title(&self) -> String {
        self.name
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Header line followed by `- ` prefixed formulas.
    fn render_into(&self, lines: &mut Vec<String>) {
        lines.push(format!("{} Identities:", self.title()));
        lines.extend(self.formulas.iter().map(|f| format!("- {f}")));
    }

    fn matches(&self, query: &str) -> bool {
        self.keywords.iter().any(|k| query.contains(k))
    }
}

/// Returned when no group matches.
pub const IDENTITY_GUIDANCE: &str = "Please specify a type of trigonometric identity \
(e.g., 'basic identities', 'angle sum formulas') or ask for 'all' identities.";

/// Extra phrases that signal an identity request regardless of group.
pub const GENERIC_IDENTITY_PHRASES: &[&str] = &[
    "identities",
    "formulas",
    "list",
    "show",
    "tell me about",
    "what are",
    "define",
];

/// The immutable catalog of identity groups, in declared order.
#[derive(Debug, Clone)]
pub struct IdentityCatalog {
    groups: Vec<IdentityGroup>,
}

impl Default for IdentityCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl IdentityCatalog {
    /// The eight standard groups.
    pub fn standard() -> Self {
        Self {
            groups: vec![
                IdentityGroup {
                    name: "basic",
                    keywords: &["basic", "pythagorean", "fundamental"],
                    formulas: &[
                        "sin²(θ) + cos²(θ) = 1",
                        "1 + tan²(θ) = sec²(θ)",
                        "1 + cot²(θ) = csc²(θ)",
                    ],
                },
                IdentityGroup {
                    name: "angle_sum_diff",
                    keywords: &[
                        "angle sum",
                        "angle difference",
                        "sum identities",
                        "difference identities",
                        "sum formula",
                        "difference formula",
                    ],
                    formulas: &[
                        "sin(a ± b) = sin(a)cos(b) ± cos(a)sin(b)",
                        "cos(a ± b) = cos(a)cos(b) ∓ sin(a)sin(b)",
                        "tan(a ± b) = (tan(a) ± tan(b)) / (1 ∓ tan(a)tan(b))",
                    ],
                },
                IdentityGroup {
                    name: "double_angle",
                    keywords: &["double angle", "double"],
                    formulas: &[
                        "sin(2θ) = 2sin(θ)cos(θ)",
                        "cos(2θ) = cos²(θ) - sin²(θ)",
                        "tan(2θ) = (2tan(θ)) / (1 - tan²(θ))",
                    ],
                },
                IdentityGroup {
                    name: "half_angle",
                    keywords: &["half angle", "half"],
                    formulas: &[
                        "sin(θ/2) = ±√((1 - cos(θ))/2)",
                        "cos(θ/2) = ±√((1 + cos(θ))/2)",
                        "tan(θ/2) = (1 - cos(θ))/sin(θ)",
                    ],
                },
                IdentityGroup {
                    name: "product_to_sum",
                    keywords: &["product to sum", "product-to-sum", "product identities"],
                    formulas: &[
                        "sin(a)sin(b) = (1/2)[cos(a-b) - cos(a+b)]",
                        "cos(a)cos(b) = (1/2)[cos(a+b) + cos(a-b)]",
                        "sin(a)cos(b) = (1/2)[sin(a+b) + sin(a-b)]",
                    ],
                },
                IdentityGroup {
                    name: "sum_to_product",
                    keywords: &["sum to product", "sum-to-product"],
                    formulas: &[
                        "sin(a) + sin(b) = 2sin((a+b)/2)cos((a-b)/2)",
                        "sin(a) - sin(b) = 2cos((a+b)/2)sin((a-b)/2)",
                        "cos(a) + cos(b) = 2cos((a+b)/2)cos((a-b)/2)",
                    ],
                },
                IdentityGroup {
                    name: "reciprocal_quotient",
                    keywords: &["reciprocal", "quotient"],
                    formulas: &[
                        "csc(θ) = 1/sin(θ)",
                        "sec(θ) = 1/cos(θ)",
                        "cot(θ) = 1/tan(θ)",
                        "tan(θ) = sin(θ)/cos(θ)",
                        "cot(θ) = cos(θ)/sin(θ)",
                    ],
                },
                IdentityGroup {
                    name: "cofunction",
                    keywords: &["cofunction"],
                    formulas: &[
                        "sin(π/2 - θ) = cos(θ)",
                        "cos(π/2 - θ) = sin(θ)",
                        "tan(π/2 - θ) = cot(θ)",
                    ],
                },
            ],
        }
    }

    /// Groups in declared order.
    pub fn groups(&self) -> &[IdentityGroup] {
        &self.groups
    }

    /// Every group-selecting keyword across the catalog.
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().flat_map(|g| g.keywords.iter().copied())
    }

    /// Look up the formulas a (lower-cased) query asks for.
    ///
    /// "all"/"every" returns every group; otherwise the first group whose
    /// keywords match. With no match, a single guidance line.
    pub fn lookup(&self, query: &str) -> Vec<String> {
        let mut lines = Vec::new();

        if query.contains("all") || query.contains("every") {
            for group in &self.groups {
                group.render_into(&mut lines);
            }
            return lines;
        }

        match self.groups.iter().find(|g| g.matches(query)) {
            Some(group) => group.render_into(&mut lines),
            None => lines.push(IDENTITY_GUIDANCE.to_string()),
        }
        lines
    }
}
