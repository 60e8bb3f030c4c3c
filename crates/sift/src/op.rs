//! Comparison operators for query clauses.
//!
//! The operator set is closed: [`Op::Eq`] is implied by a bare field name,
//! [`Op::Not`] is selected with the `__not` suffix (`age__not`).

/// Separator between a field name and its operator tag.
pub const TAG_SEPARATOR: &str = "__";

/// Comparison operator for a query clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Op {
    /// Field equals the expected value (or, for list fields, contains it).
    #[default]
    Eq,
    /// Negation of [`Op::Eq`].
    Not,
}

impl Op {
    /// Looks up the operator named by a key suffix.
    ///
    /// Only tags that change the operator are recognised; `eq` is the
    /// default and never spelled out.
    pub fn from_tag(tag: &str) -> Option<Op> {
        match tag {
            "not" => Some(Op::Not),
            _ => None,
        }
    }

    /// Splits a filter key into its field name and operator.
    ///
    /// `"age__not"` becomes `("age", Op::Not)`. Keys without a recognised
    /// tag are taken whole as the field name with [`Op::Eq`].
    pub fn parse_key(key: &str) -> (&str, Op) {
        if let Some((field, tag)) = key.rsplit_once(TAG_SEPARATOR) {
            if !field.is_empty() {
                if let Some(op) = Op::from_tag(tag) {
                    return (field, op);
                }
            }
        }
        (key, Op::Eq)
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Not => "not",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
