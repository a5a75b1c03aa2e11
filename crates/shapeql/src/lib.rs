//! ## Crate layout
//! - `shape`: the `Shape` trait, type descriptors, and classification.
//! - `query`: query instances, field metadata, and the selection compiler.
//! - `value`: parameter values and the GraphQL literal encoder.
//! - `scalar_registry`: the set of types that never expand.
//! - `error`: `QueryError` and its classification.
//!
//! `#[derive(Shape)]` generates paths under `::shapeql`, so derived types
//! only need this crate in scope.
//!
//! ```ignore
//! use shapeql::prelude::*;
//!
//! #[derive(Shape)]
//! struct Film {
//!     id: i32,
//!     title: String,
//! }
//!
//! let mut query = shapeql::build::<Film>();
//! query.field(|f| f.title).add_parameter("lang", "en")?;
//! assert_eq!(query.get_query()?, r#"{id title(lang:"en")}"#);
//! ```

pub use shapeql_core::{error, key, query, scalar_registry, shape, value};
pub use shapeql_core::{ErrorClass, QueryError};

/// Derive `Shape` for named structs, unit structs, and fieldless enums.
pub use shapeql_derive::Shape;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Entry points
//

/// Start a query over `T` against the process-wide scalar registry.
#[must_use]
pub fn build<T: shape::Shape>() -> query::Query<T> {
    query::Query::new()
}

/// Register `T` as a scalar in the process-wide registry; queries built
/// with `build`, `Query::new`, or a default `QueryBuilder` stop expanding it.
pub fn register_scalar_type<T: shape::Shape>() {
    scalar_registry::ScalarRegistry::global().register::<T>();
}

///
/// Prelude
/// the derive macro and the trait share the `Shape` name
///

pub mod prelude {
    pub use crate::{
        QueryError,
        key::FieldId,
        query::{MetaMember, Query, QueryBuilder, QueryConfig},
        shape::{FieldRef, Shape},
        value::Value,
    };

    pub use shapeql_derive::Shape;
}
