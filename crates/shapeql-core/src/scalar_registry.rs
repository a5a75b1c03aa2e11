//! Scalar type registry.
//!
//! A registry is an append-only set of terminal types, seeded with the builtin
//! primitives. Registration takes the write lock and compilation takes read
//! locks, so registering while other threads compile is safe; a compile that
//! races a registration sees the set either before or after the insert.
use crate::{
    key::TypeKey,
    shape::{ScalarLookup, Shape},
};
use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard},
};

static GLOBAL: OnceLock<Arc<ScalarRegistry>> = OnceLock::new();

///
/// ScalarKind
///
/// Coarse family of a registered scalar. Builtins carry their primitive
/// family; application registrations are `Custom`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarKind {
    Bool,
    Custom,
    Date,
    DateTime,
    Decimal,
    Float,
    Int,
    Text,
    Time,
    Uint,
}

///
/// ScalarRegistry
///

#[derive(Debug)]
pub struct ScalarRegistry {
    entries: RwLock<HashMap<TypeKey, ScalarKind>>,
}

impl ScalarRegistry {
    /// Fresh registry holding only the builtin primitives.
    #[must_use]
    pub fn new() -> Self {
        let seed = scalar_registry_entries!(seeded_scalar_entries);

        Self {
            entries: RwLock::new(seed.into_iter().collect()),
        }
    }

    /// Process-wide registry used by `Query::new` and the default builder.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Mark `T` as terminal. Idempotent; there is no removal.
    pub fn register<T: Shape>(&self) {
        self.register_type(TypeKey::of::<T>());
    }

    /// Mark a type as terminal by key. Idempotent; an existing entry keeps
    /// its original kind.
    pub fn register_type(&self, key: TypeKey) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if !entries.contains_key(&key) {
            entries.insert(key, ScalarKind::Custom);
            tracing::debug!(scalar = key.name(), "registered scalar type");
        }
    }

    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.read().contains(key)
    }

    #[must_use]
    pub fn kind_of(&self, key: &TypeKey) -> Option<ScalarKind> {
        self.read().kind_of(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hold a read view for the duration of one compilation.
    pub fn read(&self) -> ScalarSet<'_> {
        ScalarSet(self.entries.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for ScalarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarLookup for ScalarRegistry {
    fn is_scalar(&self, key: &TypeKey) -> bool {
        self.contains(key)
    }
}

///
/// ScalarSet
///
/// Read guard over a registry's entries.
///

pub struct ScalarSet<'a>(RwLockReadGuard<'a, HashMap<TypeKey, ScalarKind>>);

impl ScalarSet<'_> {
    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn kind_of(&self, key: &TypeKey) -> Option<ScalarKind> {
        self.0.get(key).copied()
    }
}

impl ScalarLookup for ScalarSet<'_> {
    fn is_scalar(&self, key: &TypeKey) -> bool {
        self.contains(key)
    }
}

///
/// TESTS
///
