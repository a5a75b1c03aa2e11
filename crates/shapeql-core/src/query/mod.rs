//! Query instances: bind a root shape, attach per-field metadata, compile.
//!
//! Metadata mutation takes `&mut Query`, compilation takes `&Query`, so the
//! two cannot interleave on one instance. Compiling is pure and may be
//! repeated; it always yields the same text for the same metadata.
mod compile;
mod config;
mod metadata;
mod select;

#[cfg(test)]
mod tests;

use crate::{
    QueryError,
    key::FieldId,
    scalar_registry::ScalarRegistry,
    shape::{FieldRef, Shape},
    value::{GraphqlLiteralEncoder, LiteralEncoder, Value},
};
use compile::Compiler;
use indexmap::IndexMap;
use std::{fmt, marker::PhantomData, sync::Arc};

// re-exports
pub use compile::{SelectionField, SelectionSet};
pub use config::{FieldCase, QueryConfig};
pub use metadata::FieldMetadata;

///
/// QueryBuilder
///
/// Shared settings for building queries: the scalar registry (shared, not
/// copied), the literal encoder, and rendering config.
///

#[derive(Clone)]
pub struct QueryBuilder {
    registry: Arc<ScalarRegistry>,
    encoder: Arc<dyn LiteralEncoder>,
    config: QueryConfig,
}

impl QueryBuilder {
    /// Builder backed by the process-wide registry and the default encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ScalarRegistry::global())
    }

    #[must_use]
    pub fn with_registry(registry: Arc<ScalarRegistry>) -> Self {
        Self {
            registry,
            encoder: Arc::new(GraphqlLiteralEncoder),
            config: QueryConfig::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn encoder(mut self, encoder: impl LiteralEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<ScalarRegistry> {
        &self.registry
    }

    /// Register `S` as a scalar on the shared registry; every query built
    /// against it, past or future, stops expanding `S`.
    pub fn register_scalar_type<S: Shape>(&self) -> &Self {
        self.registry.register::<S>();
        self
    }

    #[must_use]
    pub fn build<T: Shape>(&self) -> Query<T> {
        Query {
            registry: Arc::clone(&self.registry),
            encoder: Arc::clone(&self.encoder),
            config: self.config.clone(),
            metadata: FieldMetadata::default(),
            _shape: PhantomData,
        }
    }

    /// Build from an example value; only its type is used.
    #[must_use]
    pub fn build_for<T: Shape>(&self, _shape: &T) -> Query<T> {
        self.build()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

///
/// Query
///
/// One root shape plus its field metadata.
///

pub struct Query<T: Shape> {
    registry: Arc<ScalarRegistry>,
    encoder: Arc<dyn LiteralEncoder>,
    config: QueryConfig,
    metadata: FieldMetadata,
    _shape: PhantomData<fn() -> T>,
}

impl<T: Shape> Query<T> {
    /// Query over `T` using the process-wide registry and defaults.
    #[must_use]
    pub fn new() -> Self {
        QueryBuilder::new().build()
    }

    /// Query over the type of `shape`; the value itself is never read.
    #[must_use]
    pub fn build(_shape: &T) -> Self {
        Self::new()
    }

    #[must_use]
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: impl LiteralEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<ScalarRegistry> {
        &self.registry
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    #[must_use]
    pub const fn metadata(&self) -> &FieldMetadata {
        &self.metadata
    }

    /// Select a direct member of `T` through its generated field table.
    pub fn field(&mut self, selector: impl FnOnce(T::Fields) -> FieldRef<T>) -> MetaMember<'_, T> {
        let id = selector(T::fields()).id();

        MetaMember { query: self, id }
    }

    /// Select a direct member of `T` by its declared identifier.
    pub fn select(&mut self, selector: &str) -> Result<MetaMember<'_, T>, QueryError> {
        let root = T::descriptor();
        let id = select::resolve_selector(&root, selector)?.id();

        Ok(MetaMember { query: self, id })
    }

    /// Compile into a selection tree.
    pub fn compile(&self) -> Result<SelectionSet, QueryError> {
        // encoders run before the registry is locked, so they may register scalars
        let arguments = self.metadata.encode_parameters(self.encoder.as_ref())?;
        let compiler = Compiler::new(
            self.registry.read(),
            &self.metadata,
            &arguments,
            &self.config,
        );

        compiler.compile_root(T::descriptor())
    }

    /// Compile and render the selection set, e.g. `{id name}`.
    pub fn get_query(&self) -> Result<String, QueryError> {
        let query = self.compile()?.to_string();
        tracing::debug!(
            shape = std::any::type_name::<T>(),
            len = query.len(),
            "compiled query"
        );

        Ok(query)
    }
}

impl<T: Shape> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Shape> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            encoder: Arc::clone(&self.encoder),
            config: self.config.clone(),
            metadata: self.metadata.clone(),
            _shape: PhantomData,
        }
    }
}

impl<T: Shape> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("shape", &std::any::type_name::<T>())
            .field("config", &self.config)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

///
/// MetaMember
///
/// Handle for attaching alias and parameter metadata to one field.
///

pub struct MetaMember<'a, T: Shape> {
    query: &'a mut Query<T>,
    id: FieldId,
}

impl<T: Shape> MetaMember<'_, T> {
    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Add one parameter; a repeated name on this field is an error.
    pub fn add_parameter(
        self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, QueryError> {
        self.query
            .metadata
            .add_parameter(self.id, name.into(), value.into())?;

        Ok(self)
    }

    /// Map this local field onto remote field `remote`; last write wins.
    pub fn set_alias(self, remote: impl Into<String>) -> Self {
        self.query.metadata.set_alias(self.id, remote.into());
        self
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.query.metadata.alias(&self.id)
    }

    #[must_use]
    pub fn parameters(&self) -> Option<&IndexMap<String, Value>> {
        self.query.metadata.parameters(&self.id)
    }
}

impl<T: Shape> fmt::Debug for MetaMember<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaMember").field("id", &self.id).finish()
    }
}
