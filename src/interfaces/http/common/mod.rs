//! Shared HTTP building blocks: response envelope and validating extractors

pub mod response;
pub mod validated_json;
pub mod validated_query;

pub use response::ApiResponse;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
