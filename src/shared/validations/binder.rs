//! Query parameter binding: defaults → query values → validation

use thiserror::Error;

use super::coercion::{CoercionError, FieldKind};
use super::descriptor::{QueryRequest, RequestDescriptor};
use super::rules::{FieldViolation, Rule, ValidationErrors};

/// Errors raised while turning query parameters into a request value.
///
/// `UnsupportedType`, `InvalidDefault` and `RuleMismatch` are programming
/// mistakes in a field table; the remaining variants come from client input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("{field}: unsupported type: {kind}")]
    UnsupportedType {
        field: &'static str,
        kind: &'static str,
    },

    #[error("invalid default value for {field}: {source}")]
    InvalidDefault {
        field: &'static str,
        source: CoercionError,
    },

    #[error("{field}: rule {rule} does not apply to {kind}")]
    RuleMismatch {
        field: &'static str,
        rule: &'static str,
        kind: FieldKind,
    },

    #[error("invalid {param}: {source}")]
    InvalidParam {
        param: &'static str,
        source: CoercionError,
    },

    #[error("{0}")]
    Validation(ValidationErrors),
}

impl BindError {
    /// Whether the error was caused by the caller's input rather than by the
    /// request type's field table.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParam { .. } | Self::Validation(_))
    }
}

/// Decoded query string, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value supplied for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fill every field still at its zero value with its declared default.
pub fn apply_defaults<T>(target: &mut T, descriptor: &RequestDescriptor<T>) -> Result<(), BindError> {
    for field in descriptor.fields() {
        let Some(literal) = field.default_literal() else {
            continue;
        };
        let slot = field.slot_mut(target);
        if !slot.is_zero() {
            continue;
        }
        slot.assign(literal)
            .map_err(|source| BindError::InvalidDefault {
                field: field.name(),
                source,
            })?;
    }
    Ok(())
}

/// Copy non-empty query values into the fields that declare a parameter name.
pub fn bind_query<T>(
    target: &mut T,
    descriptor: &RequestDescriptor<T>,
    params: &QueryParams,
) -> Result<(), BindError> {
    for field in descriptor.fields() {
        let Some(param) = field.param() else {
            continue;
        };
        let Some(raw) = params.get(param).filter(|v| !v.is_empty()) else {
            continue;
        };
        field
            .slot_mut(target)
            .assign(raw)
            .map_err(|source| BindError::InvalidParam { param, source })?;
    }
    Ok(())
}

/// Evaluate every rule on every field and collect all violations.
pub fn validate<T>(target: &T, descriptor: &RequestDescriptor<T>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for field in descriptor.fields() {
        let slot = field.slot(target);
        let value = slot.value();
        let kind = slot.kind();
        for rule in field.rules() {
            if matches!(rule, Rule::OmitEmpty) {
                if value.is_zero() {
                    break;
                }
                continue;
            }
            if !rule.check(&value) {
                errors.push(FieldViolation {
                    field: field.name(),
                    rule: rule.tag(),
                    message: rule.message(kind),
                });
            }
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate an already populated value against its field table.
pub fn validate_request<T: QueryRequest>(target: &T) -> Result<(), BindError> {
    let descriptor = T::descriptor()?;
    validate(target, descriptor).map_err(BindError::Validation)
}

/// Build a `T` from query parameters: defaults, then binding, then validation.
pub fn parse_query<T: QueryRequest>(params: &QueryParams) -> Result<T, BindError> {
    let descriptor = T::descriptor()?;
    let mut target = T::default();
    apply_defaults(&mut target, descriptor)?;
    bind_query(&mut target, descriptor, params)?;
    validate(&target, descriptor).map_err(BindError::Validation)?;
    Ok(target)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{describe_request, field};

    #[derive(Debug, Default)]
    struct Listing {
        page: i64,
        page_size: i64,
        name: String,
        internal: String,
    }

    describe_request!(Listing => [
        field!(Listing, page).query("page"),
        field!(Listing, page_size).query("page_size").default_value("20"),
        field!(Listing, name).query("name"),
        field!(Listing, internal).default_value("computed"),
    ]);

    #[derive(Debug, Default)]
    struct Signup {
        username: String,
        email: String,
        age: u32,
        plan: String,
        nickname: String,
    }

    describe_request!(Signup => [
        field!(Signup, username).query("username").rule(Rule::Required).rule(Rule::min(3)).rule(Rule::Alphanum),
        field!(Signup, email).query("email").rule(Rule::Required).rule(Rule::Email),
        field!(Signup, age).query("age").rule(Rule::min(18)).rule(Rule::max(130)),
        field!(Signup, plan).query("plan").default_value("free").rule(Rule::one_of("free pro team")),
        field!(Signup, nickname).query("nickname").rule(Rule::OmitEmpty).rule(Rule::min(2)),
    ]);

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn defaults_apply_without_parameters() {
        let req: Listing = parse_query(&QueryParams::default()).unwrap();
        assert_eq!(req.page_size, 20);
        assert_eq!(req.internal, "computed");
        assert_eq!(req.page, 0);
    }

    #[test]
    fn explicit_value_overrides_default() {
        let req: Listing = parse_query(&params(&[("page_size", "5")])).unwrap();
        assert_eq!(req.page_size, 5);
    }

    #[test]
    fn empty_value_keeps_default() {
        let req: Listing = parse_query(&params(&[("page_size", ""), ("name", "")])).unwrap();
        assert_eq!(req.page_size, 20);
        assert_eq!(req.name, "");
    }

    #[test]
    fn first_value_wins() {
        let req: Listing = parse_query(&params(&[("name", "rice"), ("name", "noodles")])).unwrap();
        assert_eq!(req.name, "rice");
    }

    #[test]
    fn fields_without_param_are_not_bound() {
        let req: Listing = parse_query(&params(&[("internal", "override")])).unwrap();
        assert_eq!(req.internal, "computed");
    }

    #[test]
    fn defaults_do_not_overwrite_populated_fields() {
        let descriptor = Listing::descriptor().unwrap();
        let mut req = Listing {
            page_size: 3,
            ..Default::default()
        };
        apply_defaults(&mut req, descriptor).unwrap();
        assert_eq!(req.page_size, 3);
    }

    #[test]
    fn malformed_value_names_the_parameter() {
        let err = parse_query::<Listing>(&params(&[("page", "two")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid page: must be integer");
        assert!(err.is_client_error());
    }

    #[test]
    fn all_violations_are_reported_in_order() {
        let err = parse_query::<Signup>(&params(&[
            ("username", "a!"),
            ("email", "nope"),
            ("age", "12"),
            ("plan", "gold"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "username must be at least 3 characters; \
             username must contain only letters and numbers; \
             email must be a valid email; \
             age must be at least 18; \
             plan must be one of free, pro, team"
        );
    }

    #[test]
    fn required_fields_missing() {
        let err = parse_query::<Signup>(&params(&[("age", "30")])).unwrap_err();
        let BindError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let failed: Vec<_> = errors.violations().iter().map(|v| (v.field, v.rule)).collect();
        assert_eq!(
            failed,
            [
                ("username", "required"),
                ("username", "min"),
                ("username", "alphanum"),
                ("email", "required"),
                ("email", "email"),
            ]
        );
    }

    #[test]
    fn omitempty_skips_zero_values_only() {
        let base = [("username", "alice"), ("email", "alice@example.com"), ("age", "30")];
        let req: Signup = parse_query(&params(&base)).unwrap();
        assert_eq!(req.plan, "free");
        assert_eq!(req.nickname, "");

        let mut with_nick = base.to_vec();
        with_nick.push(("nickname", "a"));
        let err = parse_query::<Signup>(&params(&with_nick)).unwrap_err();
        assert_eq!(err.to_string(), "nickname must be at least 2 characters");
    }

    #[test]
    fn validation_does_not_mutate() {
        let descriptor = Signup::descriptor().unwrap();
        let req = Signup {
            username: "bob".into(),
            ..Default::default()
        };
        assert!(validate(&req, descriptor).is_err());
        assert_eq!(req.username, "bob");
        assert_eq!(req.plan, "");
    }

    #[test]
    fn one_of_failure_message() {
        #[derive(Debug, Default)]
        struct Pick {
            letter: String,
        }
        describe_request!(Pick => [
            field!(Pick, letter).query("letter").rule(Rule::one_of("a b c")),
        ]);

        let err = parse_query::<Pick>(&params(&[("letter", "d")])).unwrap_err();
        assert_eq!(err.to_string(), "letter must be one of a, b, c");
    }
}
