mod encode;


use indexmap::IndexMap;
use std::borrow::Cow;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

// re-exports
pub use encode::{EncodeError, GraphqlLiteralEncoder, LiteralEncoder, is_graphql_name};

///
/// Value
/// a parameter value attached to one field, rendered by a `LiteralEncoder`
///
/// Enum   → bare symbolic name, never quoted.
/// Object → input-object literal, keys in insertion order.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Int128(i128),
    Uint128(u128),
    Float(f64),
    Number(serde_json::Number),
    Text(String),
    Enum(String),
    Date(Date),
    Time(Time),
    LocalDateTime(PrimitiveDateTime),
    DateTime(OffsetDateTime),
    List(Vec<Self>),
    Object(IndexMap<String, Self>),
}

impl Value {
    /// Enum literal; rendered as the bare identifier `name`.
    pub fn enum_literal(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

///
/// Conversions
///

macro_rules! impl_from_lossless {
    ($variant:ident, $target:ty => $($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from_lossless!(Int, i64 => i8, i16, i32, i64);
impl_from_lossless!(Uint, u64 => u8, u16, u32, u64);
impl_from_lossless!(Float, f64 => f64);
impl_from_lossless!(Int128, i128 => i128);
impl_from_lossless!(Uint128, u128 => u128);
impl_from_lossless!(Bool, bool => bool);
impl_from_lossless!(Text, String => String, &str, char, Cow<'_, str>);
impl_from_lossless!(Number, serde_json::Number => serde_json::Number);
impl_from_lossless!(Date, Date => Date);
impl_from_lossless!(Time, Time => Time);
impl_from_lossless!(LocalDateTime, PrimitiveDateTime => PrimitiveDateTime);
impl_from_lossless!(DateTime, OffsetDateTime => OffsetDateTime);

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

// widen through the shortest decimal form, so `0.1_f32` stays `0.1`
impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v.to_string().parse().unwrap_or_else(|_| f64::from(v)))
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Uint(v as u64)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => Self::list(items),
            serde_json::Value::Object(map) => Self::object(map),
        }
    }
}
