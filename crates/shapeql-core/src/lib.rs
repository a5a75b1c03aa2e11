//! Core runtime for shapeql: shape introspection, the scalar registry,
//! parameter literals, and the selection-set compiler.
#![warn(unreachable_pub)]

extern crate self as shapeql;

#[macro_use]
pub(crate) mod macros;

// public exports are one module level down
pub mod error;
pub mod key;
pub mod query;
pub mod scalar_registry;
pub mod shape;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::{ErrorClass, QueryError};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No encoders, registries, or compiler internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        key::{FieldId, TypeKey},
        query::{MetaMember, Query, QueryBuilder},
        shape::{FieldRef, Shape},
        value::Value,
    };
}
