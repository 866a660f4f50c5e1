//! Query parameter binding and validation
//!
//! - `coercion`: string → primitive conversion per field kind
//! - `descriptor`: static field tables (`field!`, `describe_request!`)
//! - `rules`: declarative constraints and their messages
//! - `binder`: defaults, query binding, validation

pub mod binder;
pub mod coercion;
pub mod descriptor;
pub mod rules;

pub use binder::{
    apply_defaults, bind_query, parse_query, validate, validate_request, BindError, QueryParams,
};
pub use coercion::{coerce, CoercionError, FieldKind, FieldSlot, FieldValue};
pub use descriptor::{FieldDescriptor, QueryRequest, RequestDescriptor, SlotMut, SlotRef};
pub use rules::{CustomCheck, FieldViolation, Rule, ValidationErrors};
