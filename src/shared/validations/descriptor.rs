//! Static field tables for request types
//!
//! A request type lists its fields once, in declaration order, through
//! [`FieldDescriptor`]s. The table carries everything the binder and the
//! validator need: the external query name, an optional default literal and
//! the constraints.

use super::binder::BindError;
use super::coercion::{FieldKind, FieldSlot};
use super::rules::Rule;

/// Read accessor for one field of `T`
pub type SlotRef<T> = fn(&T) -> &dyn FieldSlot;
/// Write accessor for one field of `T`
pub type SlotMut<T> = fn(&mut T) -> &mut dyn FieldSlot;

/// Metadata for one bindable field.
pub struct FieldDescriptor<T> {
    name: &'static str,
    param: Option<&'static str>,
    default: Option<&'static str>,
    rules: Vec<Rule>,
    get: SlotRef<T>,
    get_mut: SlotMut<T>,
}

impl<T> FieldDescriptor<T> {
    pub fn new(name: &'static str, get: SlotRef<T>, get_mut: SlotMut<T>) -> Self {
        Self {
            name,
            param: None,
            default: None,
            rules: Vec::new(),
            get,
            get_mut,
        }
    }

    /// Bind the field from the query parameter `param`.
    pub fn query(mut self, param: &'static str) -> Self {
        self.param = Some(param);
        self
    }

    /// Literal applied when the field is still at its zero value.
    pub fn default_value(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn param(&self) -> Option<&'static str> {
        self.param
    }

    pub fn default_literal(&self) -> Option<&'static str> {
        self.default
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn slot<'a>(&self, target: &'a T) -> &'a dyn FieldSlot {
        (self.get)(target)
    }

    pub fn slot_mut<'a>(&self, target: &'a mut T) -> &'a mut dyn FieldSlot {
        (self.get_mut)(target)
    }
}

/// Checked field table of a request type.
pub struct RequestDescriptor<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T: Default> RequestDescriptor<T> {
    /// Build the table, rejecting compound fields, default literals that do
    /// not parse and rules that cannot apply to the field kind.
    pub fn build(fields: Vec<FieldDescriptor<T>>) -> Result<Self, BindError> {
        let mut probe = T::default();
        for field in &fields {
            let kind = field.slot(&probe).kind();
            if let FieldKind::Unsupported(name) = kind {
                return Err(BindError::UnsupportedType {
                    field: field.name,
                    kind: name,
                });
            }
            if let Some(literal) = field.default {
                // Parse at the field's own width so "300" is refused for an i8.
                field
                    .slot_mut(&mut probe)
                    .assign(literal)
                    .map_err(|source| BindError::InvalidDefault {
                        field: field.name,
                        source,
                    })?;
            }
            if let Some(rule) = field.rules.iter().find(|r| !r.applies_to(kind)) {
                return Err(BindError::RuleMismatch {
                    field: field.name,
                    rule: rule.tag(),
                    kind,
                });
            }
        }
        Ok(Self { fields })
    }
}

impl<T> RequestDescriptor<T> {
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }
}

/// A request type that can be bound from query parameters.
///
/// Implement it with [`describe_request!`](crate::describe_request).
pub trait QueryRequest: Default + Sized + 'static {
    fn descriptor() -> Result<&'static RequestDescriptor<Self>, BindError>;
}

/// Build a [`FieldDescriptor`] for `field` of `Type`.
///
/// ```ignore
/// field!(ListDishReq, page).query("page").default_value("1")
/// ```
#[macro_export]
macro_rules! field {
    ($ty:ty, $field:ident) => {{
        fn get(target: &$ty) -> &dyn $crate::shared::validations::FieldSlot {
            &target.$field
        }
        fn get_mut(target: &mut $ty) -> &mut dyn $crate::shared::validations::FieldSlot {
            &mut target.$field
        }
        $crate::shared::validations::FieldDescriptor::<$ty>::new(stringify!($field), get, get_mut)
    }};
}

/// Implement [`QueryRequest`] for a type from its field list. The table is
/// built and checked on first use, then cached for the life of the process.
#[macro_export]
macro_rules! describe_request {
    ($ty:ty => [$($field:expr),* $(,)?]) => {
        impl $crate::shared::validations::QueryRequest for $ty {
            fn descriptor() -> ::std::result::Result<
                &'static $crate::shared::validations::RequestDescriptor<$ty>,
                $crate::shared::validations::BindError,
            > {
                static DESCRIPTOR: ::std::sync::OnceLock<
                    ::std::result::Result<
                        $crate::shared::validations::RequestDescriptor<$ty>,
                        $crate::shared::validations::BindError,
                    >,
                > = ::std::sync::OnceLock::new();
                DESCRIPTOR
                    .get_or_init(|| {
                        $crate::shared::validations::RequestDescriptor::build(vec![$($field),*])
                    })
                    .as_ref()
                    .map_err(Clone::clone)
            }
        }
    };
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Search {
        term: String,
        limit: u32,
    }

    describe_request!(Search => [
        field!(Search, term).query("q").rule(Rule::Required),
        field!(Search, limit).query("limit").default_value("25"),
    ]);

    #[derive(Debug, Default)]
    struct WithList {
        ids: Vec<u32>,
    }

    #[derive(Debug, Default)]
    struct BadDefault {
        size: i32,
    }

    #[derive(Debug, Default)]
    struct Level {
        level: i8,
    }

    #[derive(Debug, Default)]
    struct BadRule {
        active: bool,
    }

    #[test]
    fn descriptor_keeps_declaration_order() {
        let desc = Search::descriptor().unwrap();
        let names: Vec<_> = desc.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["term", "limit"]);
        assert_eq!(desc.fields()[0].param(), Some("q"));
        assert_eq!(desc.fields()[1].default_literal(), Some("25"));
    }

    #[test]
    fn descriptor_is_built_once() {
        let a = Search::descriptor().unwrap() as *const _;
        let b = Search::descriptor().unwrap() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn accessors_reach_the_field() {
        let desc = Search::descriptor().unwrap();
        let mut search = Search::default();
        desc.fields()[1].slot_mut(&mut search).assign("7").unwrap();
        assert_eq!(search.limit, 7);
        assert_eq!(desc.fields()[1].slot(&search).kind(), FieldKind::Uint);
    }

    #[test]
    fn compound_field_fails_fast() {
        let err = RequestDescriptor::<WithList>::build(vec![field!(WithList, ids).query("ids")])
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "ids: unsupported type: slice");
    }

    #[test]
    fn bad_default_literal_fails_fast() {
        let err = RequestDescriptor::<BadDefault>::build(vec![
            field!(BadDefault, size).default_value("ten"),
        ])
        .err()
        .unwrap();
        assert_eq!(err.to_string(), "invalid default value for size: must be integer");
    }

    #[test]
    fn out_of_range_default_fails_fast() {
        let err = RequestDescriptor::<Level>::build(vec![
            field!(Level, level).default_value("300"),
        ])
        .err()
        .unwrap();
        assert_eq!(err.to_string(), "invalid default value for level: must be integer");

        assert!(RequestDescriptor::<Level>::build(vec![
            field!(Level, level).default_value("-12"),
        ])
        .is_ok());
    }

    #[test]
    fn rule_on_wrong_kind_fails_fast() {
        let err = RequestDescriptor::<BadRule>::build(vec![
            field!(BadRule, active).rule(Rule::Email),
        ])
        .err()
        .unwrap();
        assert_eq!(err.to_string(), "active: rule email does not apply to bool");
    }
}
