use crate::shape::{Shape, TypeDescriptor};
use std::{
    collections::{BTreeSet, HashSet, LinkedList, VecDeque},
    rc::Rc,
    sync::Arc,
};

// scalars
scalar_registry_entries!(impl_scalar_shapes);

///
/// Collections
///

macro_rules! impl_collection_shapes {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Shape> Shape for $ty<T> {
                type Fields = ();

                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::collection::<Self, T>()
                }

                fn fields() -> Self::Fields {}
            }
        )*
    };
}

impl_collection_shapes!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Shape, S: 'static> Shape for HashSet<T, S> {
    type Fields = ();

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection::<Self, T>()
    }

    fn fields() -> Self::Fields {}
}

// unsized slices, reached through `Box<[T]>`, `Rc<[T]>` and `Arc<[T]>`
impl<T: Shape> Shape for [T] {
    type Fields = ();

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection::<Self, T>()
    }

    fn fields() -> Self::Fields {}
}

impl<T: Shape, const N: usize> Shape for [T; N] {
    type Fields = ();

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection::<Self, T>()
    }

    fn fields() -> Self::Fields {}
}

///
/// Optional
///

impl<T: Shape> Shape for Option<T> {
    type Fields = ();

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional::<Self, T>()
    }

    fn fields() -> Self::Fields {}
}

///
/// Pointers
/// describe exactly as the pointee, so `Box<Node>` and `Node` share a key
///

macro_rules! impl_transparent_shapes {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Shape + ?Sized> Shape for $ty<T> {
                type Fields = T::Fields;

                fn descriptor() -> TypeDescriptor {
                    T::descriptor()
                }

                fn fields() -> Self::Fields {
                    T::fields()
                }
            }
        )*
    };
}

impl_transparent_shapes!(Box, Rc, Arc);
