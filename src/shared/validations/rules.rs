//! Declarative field constraints and their messages

use std::fmt;

use validator::ValidateEmail;

use super::coercion::{FieldKind, FieldValue};

/// Check function for a rule registered under a custom name.
pub type CustomCheck = fn(&FieldValue<'_>) -> bool;

/// A constraint attached to one request field.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Field must not be at its zero value
    Required,
    /// Skip the remaining rules of the field when it is at its zero value
    OmitEmpty,
    /// Lower bound: character count for strings, value for numbers
    Min(f64),
    /// Upper bound: character count for strings, value for numbers
    Max(f64),
    /// String holding a decimal number
    Numeric,
    /// ASCII letters and digits only
    Alphanum,
    Email,
    /// Space separated list of accepted values
    OneOf(&'static str),
    Custom {
        tag: &'static str,
        check: CustomCheck,
    },
}

impl Rule {
    pub fn min(bound: impl Into<f64>) -> Self {
        Self::Min(bound.into())
    }

    pub fn max(bound: impl Into<f64>) -> Self {
        Self::Max(bound.into())
    }

    pub fn one_of(choices: &'static str) -> Self {
        Self::OneOf(choices)
    }

    pub fn custom(tag: &'static str, check: CustomCheck) -> Self {
        Self::Custom { tag, check }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::OmitEmpty => "omitempty",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Numeric => "numeric",
            Self::Alphanum => "alphanum",
            Self::Email => "email",
            Self::OneOf(_) => "oneof",
            Self::Custom { tag, .. } => *tag,
        }
    }

    /// Whether the rule can be evaluated on a field of `kind`.
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Self::Required | Self::OmitEmpty | Self::Custom { .. } => true,
            Self::Alphanum | Self::Email => kind == FieldKind::String,
            Self::Min(_) | Self::Max(_) | Self::Numeric | Self::OneOf(_) => {
                kind == FieldKind::String || kind.is_numeric()
            }
        }
    }

    /// `true` when `value` satisfies the rule.
    pub fn check(&self, value: &FieldValue<'_>) -> bool {
        match self {
            Self::Required => !value.is_zero(),
            Self::OmitEmpty => true,
            Self::Min(bound) => measure(value).is_some_and(|n| n >= *bound),
            Self::Max(bound) => measure(value).is_some_and(|n| n <= *bound),
            Self::Numeric => match value {
                FieldValue::Str(s) => is_numeric(s),
                other => other.as_f64().is_some(),
            },
            Self::Alphanum => match value {
                FieldValue::Str(s) => !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()),
                _ => false,
            },
            Self::Email => match value {
                FieldValue::Str(s) => s.to_string().validate_email(),
                _ => false,
            },
            Self::OneOf(choices) => {
                let mut choices = choices.split_whitespace();
                match value {
                    FieldValue::Str(s) => choices.any(|c| c == *s),
                    FieldValue::Int(v) => choices.any(|c| c.parse::<i64>() == Ok(*v)),
                    FieldValue::Uint(v) => choices.any(|c| c.parse::<u64>() == Ok(*v)),
                    FieldValue::Float(v) => choices.any(|c| c.parse::<f64>() == Ok(*v)),
                    _ => false,
                }
            }
            Self::Custom { check, .. } => check(value),
        }
    }

    /// Human readable message for a violation on a field of `kind`.
    pub fn message(&self, kind: FieldKind) -> String {
        match self {
            Self::Required => "is required".to_string(),
            Self::Min(bound) if kind == FieldKind::String => {
                format!("must be at least {} characters", bound)
            }
            Self::Min(bound) => format!("must be at least {}", bound),
            Self::Max(bound) if kind == FieldKind::String => {
                format!("must be at most {} characters", bound)
            }
            Self::Max(bound) => format!("must be at most {}", bound),
            Self::Email => "must be a valid email".to_string(),
            Self::Numeric => "must be numeric".to_string(),
            Self::Alphanum => "must contain only letters and numbers".to_string(),
            Self::OneOf(choices) => format!(
                "must be one of {}",
                choices.split_whitespace().collect::<Vec<_>>().join(", ")
            ),
            other => format!("failed {} validation", other.tag()),
        }
    }
}

/// Length for strings, value for numbers.
fn measure(value: &FieldValue<'_>) -> Option<f64> {
    match value {
        FieldValue::Str(s) => Some(s.chars().count() as f64),
        other => other.as_f64(),
    }
}

/// `[-+]?digits(.digits)?`
fn is_numeric(s: &str) -> bool {
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    digits(int) && frac.map_or(true, digits)
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: &'static str,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Every violation found on a request, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fails_on_zero_values() {
        assert!(!Rule::Required.check(&FieldValue::Str("")));
        assert!(!Rule::Required.check(&FieldValue::Int(0)));
        assert!(Rule::Required.check(&FieldValue::Uint(3)));
    }

    #[test]
    fn min_max_on_strings_count_characters() {
        let v = FieldValue::Str("米饭");
        assert!(Rule::min(2).check(&v));
        assert!(!Rule::min(3).check(&v));
        assert!(Rule::max(2).check(&v));
        assert_eq!(Rule::min(3).message(FieldKind::String), "must be at least 3 characters");
        assert_eq!(Rule::max(10).message(FieldKind::String), "must be at most 10 characters");
    }

    #[test]
    fn min_max_on_numbers_compare_values() {
        assert!(!Rule::min(1).check(&FieldValue::Int(0)));
        assert!(Rule::max(100).check(&FieldValue::Float(99.5)));
        assert_eq!(Rule::min(1).message(FieldKind::Int), "must be at least 1");
        assert_eq!(Rule::max(100).message(FieldKind::Uint), "must be at most 100");
    }

    #[test]
    fn numeric_and_alphanum() {
        assert!(Rule::Numeric.check(&FieldValue::Str("-12.5")));
        assert!(!Rule::Numeric.check(&FieldValue::Str("12.")));
        assert!(!Rule::Numeric.check(&FieldValue::Str("")));
        assert!(Rule::Alphanum.check(&FieldValue::Str("abc123")));
        assert!(!Rule::Alphanum.check(&FieldValue::Str("abc-123")));
        assert_eq!(Rule::Numeric.message(FieldKind::String), "must be numeric");
        assert_eq!(
            Rule::Alphanum.message(FieldKind::String),
            "must contain only letters and numbers"
        );
    }

    #[test]
    fn email_rule() {
        assert!(Rule::Email.check(&FieldValue::Str("cook@canteen.edu")));
        assert!(!Rule::Email.check(&FieldValue::Str("not-an-email")));
        assert_eq!(Rule::Email.message(FieldKind::String), "must be a valid email");
    }

    #[test]
    fn one_of_lists_choices() {
        let rule = Rule::one_of("a b c");
        assert!(rule.check(&FieldValue::Str("b")));
        assert!(!rule.check(&FieldValue::Str("d")));
        assert_eq!(rule.message(FieldKind::String), "must be one of a, b, c");

        let sizes = Rule::one_of("10 20 50");
        assert!(sizes.check(&FieldValue::Int(20)));
        assert!(!sizes.check(&FieldValue::Int(15)));
    }

    #[test]
    fn custom_rule_uses_generic_message() {
        fn even(v: &FieldValue<'_>) -> bool {
            matches!(v, FieldValue::Int(n) if n % 2 == 0)
        }
        let rule = Rule::custom("even", even);
        assert!(rule.check(&FieldValue::Int(4)));
        assert!(!rule.check(&FieldValue::Int(3)));
        assert_eq!(rule.message(FieldKind::Int), "failed even validation");
    }

    #[test]
    fn rule_kind_compatibility() {
        assert!(!Rule::Email.applies_to(FieldKind::Int));
        assert!(!Rule::min(1).applies_to(FieldKind::Bool));
        assert!(Rule::Required.applies_to(FieldKind::Bool));
    }

    #[test]
    fn errors_join_with_semicolons() {
        let mut errors = ValidationErrors::default();
        errors.push(FieldViolation {
            field: "name",
            rule: "required",
            message: "is required".into(),
        });
        errors.push(FieldViolation {
            field: "tag",
            rule: "oneof",
            message: "must be one of a, b".into(),
        });
        assert_eq!(errors.to_string(), "name is required; tag must be one of a, b");
    }
}
