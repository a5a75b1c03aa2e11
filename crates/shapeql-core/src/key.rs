use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

///
/// TypeKey
///
/// Identity of one Rust type. Equality and hashing use the `TypeId` only;
/// the name is carried for diagnostics.
///

#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully-qualified type name, as reported by `std::any::type_name`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped from every segment.
    #[must_use]
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

///
/// FieldId
///
/// Stable identity of one declared member of one type.
/// Metadata attaches to the declaration site, so the owner is part of the key:
/// `Foo::id` and `Bar::id` never collide.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FieldId {
    owner: TypeKey,
    name: &'static str,
}

impl FieldId {
    #[must_use]
    pub const fn new(owner: TypeKey, name: &'static str) -> Self {
        Self { owner, name }
    }

    #[must_use]
    pub fn of<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self::new(TypeKey::of::<T>(), name)
    }

    #[must_use]
    pub const fn owner(&self) -> TypeKey {
        self.owner
    }

    /// Member identifier as declared in Rust (raw prefix included).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner, self.name)
    }
}

// short_type_name
// "alloc::vec::Vec<app::Foo>" -> "Vec<Foo>"
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or_default());

    out
}

///
/// TESTS
///
