//! Shape introspection: the reflection surface generated by
//! `#[derive(Shape)]` and the classification rules the compiler applies.
mod impls;


use crate::key::{FieldId, TypeKey};
use std::{fmt, marker::PhantomData};

///
/// Shape
///
/// A type whose declared members describe the fields of a GraphQL selection.
/// Normally derived; builtin impls cover primitives, collections, `Option`
/// and the transparent pointers (`Box`, `Rc`, `Arc`).
///

pub trait Shape: 'static {
    /// Table of typed field selectors, one `FieldRef<Self>` per member.
    type Fields;

    fn descriptor() -> TypeDescriptor;

    fn fields() -> Self::Fields;
}

///
/// TypeDescriptor
///

#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    key: TypeKey,
    kind: TypeKind,
}

impl TypeDescriptor {
    #[must_use]
    pub const fn new(key: TypeKey, kind: TypeKind) -> Self {
        Self { key, kind }
    }

    /// Intrinsic leaf; never expanded regardless of registry contents.
    #[must_use]
    pub fn scalar<T: ?Sized + 'static>() -> Self {
        Self::new(TypeKey::of::<T>(), TypeKind::Scalar)
    }

    /// Sequence of `E`; classification continues with `E`.
    #[must_use]
    pub fn collection<T: ?Sized + 'static, E: Shape>() -> Self {
        Self::new(TypeKey::of::<T>(), TypeKind::Collection(E::descriptor))
    }

    /// Nullable wrapper over `E`; classification continues with `E`.
    #[must_use]
    pub fn optional<T: ?Sized + 'static, E: Shape>() -> Self {
        Self::new(TypeKey::of::<T>(), TypeKind::Optional(E::descriptor))
    }

    #[must_use]
    pub fn composite<T: ?Sized + 'static>(members: Vec<Member>) -> Self {
        Self::new(TypeKey::of::<T>(), TypeKind::Composite(members))
    }

    #[must_use]
    pub const fn key(&self) -> TypeKey {
        self.key
    }

    #[must_use]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Declared members in declaration order; empty for non-composites.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        match &self.kind {
            TypeKind::Composite(members) => members.as_slice(),
            _ => &[],
        }
    }

    /// Look up a member by its declared (unraw) identifier.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members().iter().find(|m| m.name() == name)
    }
}

///
/// TypeKind
///
/// Nested types are held as function pointers so describing a
/// self-referential type never recurses eagerly.
///

#[derive(Clone)]
pub enum TypeKind {
    Scalar,
    Collection(fn() -> TypeDescriptor),
    Optional(fn() -> TypeDescriptor),
    Composite(Vec<Member>),
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("Scalar"),
            Self::Collection(elem) => f.debug_tuple("Collection").field(&elem().key).finish(),
            Self::Optional(inner) => f.debug_tuple("Optional").field(&inner().key).finish(),
            Self::Composite(members) => f.debug_tuple("Composite").field(members).finish(),
        }
    }
}

///
/// Member
///
/// One declared member: its identity, optional query-name override, and
/// its declared type.
///

#[derive(Clone)]
pub struct Member {
    id: FieldId,
    rename: Option<&'static str>,
    ty: fn() -> TypeDescriptor,
}

impl Member {
    #[must_use]
    pub fn new<O: ?Sized + 'static, T: Shape>(name: &'static str) -> Self {
        Self {
            id: FieldId::of::<O>(name),
            rename: None,
            ty: T::descriptor,
        }
    }

    /// Override the rendered field name; no case conversion is applied.
    #[must_use]
    pub const fn with_rename(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.name()
    }

    #[must_use]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.ty)()
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("id", &self.id)
            .field("rename", &self.rename)
            .field("ty", &(self.ty)().key)
            .finish()
    }
}

///
/// FieldRef
///
/// Typed selector for one direct member of `T`. Only generated field tables
/// construct these, so holding a `FieldRef<T>` proves the member exists on `T`.
///

pub struct FieldRef<T: ?Sized> {
    id: FieldId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> FieldRef<T> {
    #[doc(hidden)]
    #[must_use]
    pub const fn new(id: FieldId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }
}

impl<T: ?Sized> Clone for FieldRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for FieldRef<T> {}

impl<T: ?Sized> fmt::Debug for FieldRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldRef").field(&self.id).finish()
    }
}

///
/// ScalarLookup
///
/// Membership test against a scalar set; implemented by the registry and
/// its read guard.
///

pub trait ScalarLookup {
    fn is_scalar(&self, key: &TypeKey) -> bool;
}

///
/// Classification
///

#[derive(Clone, Debug)]
pub enum Classification {
    /// Terminal leaf; carries the key that stopped the unwrap.
    Scalar(TypeKey),

    /// Expandable type, already unwrapped from any collection/optional.
    Composite(TypeDescriptor),
}

impl Classification {
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

/// Classify a type: registered scalars first, then collection and optional
/// unwrapping (re-classifying the inner type each time), then composites.
pub fn classify(descriptor: TypeDescriptor, scalars: &impl ScalarLookup) -> Classification {
    let mut current = descriptor;

    loop {
        if scalars.is_scalar(&current.key) {
            return Classification::Scalar(current.key);
        }

        match current.kind {
            TypeKind::Scalar => return Classification::Scalar(current.key),
            TypeKind::Collection(next) | TypeKind::Optional(next) => current = next(),
            TypeKind::Composite(_) => return Classification::Composite(current),
        }
    }
}

/// Ordered members of `T`, as the compiler sees them.
#[must_use]
pub fn introspect<T: Shape>() -> Vec<Member> {
    T::descriptor().members().to_vec()
}
