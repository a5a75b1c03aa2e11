///
/// Scalar Registry Entries
///
/// Single source of truth for the builtin scalar types.
/// Each entry is `(type, ScalarKind variant)`; the list drives both the
/// intrinsic `Shape` impls and the seed of every `ScalarRegistry`.
///

// NOTE: serde_json::Number stands in for arbitrary-precision decimals.
macro_rules! scalar_registry_entries {
    ($macro:ident) => {
        $macro! {
            @entries
            (i8, Int),
            (i16, Int),
            (i32, Int),
            (i64, Int),
            (i128, Int),
            (isize, Int),
            (u8, Uint),
            (u16, Uint),
            (u32, Uint),
            (u64, Uint),
            (u128, Uint),
            (usize, Uint),
            (f32, Float),
            (f64, Float),
            (::serde_json::Number, Decimal),
            (String, Text),
            (&'static str, Text),
            (char, Text),
            (bool, Bool),
            (::time::Date, Date),
            (::time::Time, Time),
            (::time::PrimitiveDateTime, DateTime),
            (::time::OffsetDateTime, DateTime),
        }
    };
}

// impl_scalar_shapes
macro_rules! impl_scalar_shapes {
    (@entries $( ($ty:ty, $kind:ident) ),* $(,)?) => {
        $(
            impl $crate::shape::Shape for $ty {
                type Fields = ();

                fn descriptor() -> $crate::shape::TypeDescriptor {
                    $crate::shape::TypeDescriptor::scalar::<Self>()
                }

                fn fields() -> Self::Fields {}
            }
        )*
    };
}

// seeded_scalar_entries
macro_rules! seeded_scalar_entries {
    (@entries $( ($ty:ty, $kind:ident) ),* $(,)?) => {
        [
            $(
                (
                    $crate::key::TypeKey::of::<$ty>(),
                    $crate::scalar_registry::ScalarKind::$kind,
                ),
            )*
        ]
    };
}
