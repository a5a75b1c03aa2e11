//! Shapes shared by the unit test suites.
#![allow(dead_code)]
use crate::{
    key::TypeKey,
    scalar_registry::ScalarRegistry,
    shape::{Member, Shape, TypeDescriptor},
};
use shapeql_derive::Shape;
use std::{collections::BTreeSet, sync::Arc};
use time::Date;

///
/// Scalar-only shapes
///

#[derive(Shape)]
pub(crate) struct Film {
    pub(crate) id: i32,
    pub(crate) name: String,
}

#[derive(Shape)]
pub(crate) struct Single {
    pub(crate) foo: i32,
}

#[derive(Shape)]
pub(crate) struct Empty {}

#[derive(Shape)]
pub(crate) struct Marker;

///
/// Nested shapes
///

#[derive(Shape)]
pub(crate) struct Bar {
    pub(crate) bar: i32,
    pub(crate) baz: String,
}

#[derive(Shape)]
pub(crate) struct Foo {
    pub(crate) id: i32,
    pub(crate) foo: Bar,
}

#[derive(Shape)]
pub(crate) struct FooList {
    pub(crate) id: i32,
    pub(crate) foo: Vec<Bar>,
}

#[derive(Shape)]
pub(crate) struct FooNested {
    pub(crate) id: i32,
    pub(crate) foo: Option<Vec<Option<Bar>>>,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) released: Option<Date>,
}

#[derive(Shape)]
pub(crate) struct Item {
    pub(crate) id: i32,
}

#[derive(Shape)]
pub(crate) struct Pair {
    pub(crate) foo: Item,
    pub(crate) bar: Item,
}

///
/// Attribute handling
///

#[derive(Shape)]
pub(crate) struct Account {
    pub(crate) account_id: u64,
    #[shape(rename = "DisplayName")]
    pub(crate) display_name: String,
    #[shape(skip)]
    pub(crate) session: Vec<u8>,
    pub(crate) r#type: String,
}

///
/// Enums and custom scalars
///

#[derive(Clone, Copy, Debug, Shape)]
pub(crate) enum Kind {
    SomeValue,
    #[shape(rename = "OTHER_VALUE")]
    OtherValue,
}

#[derive(Shape)]
pub(crate) struct Typed {
    pub(crate) kind: Kind,
    pub(crate) id: i32,
}

#[derive(Shape)]
#[shape(scalar)]
pub(crate) struct Money(pub(crate) i64);

/// Composite that applications treat as an opaque leaf once registered.
#[derive(Shape)]
pub(crate) struct Geo {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

#[derive(Shape)]
pub(crate) struct Venue {
    pub(crate) id: i32,
    pub(crate) location: Geo,
    pub(crate) price: Money,
}

///
/// Cycles
///

#[derive(Shape)]
pub(crate) struct Node {
    pub(crate) id: i32,
    pub(crate) children: Vec<Node>,
}

#[derive(Shape)]
pub(crate) struct Author {
    pub(crate) name: String,
    pub(crate) books: Vec<Book>,
}

#[derive(Shape)]
pub(crate) struct Book {
    pub(crate) title: String,
    pub(crate) author: Box<Author>,
}

///
/// Generics
///

#[derive(Shape)]
pub(crate) struct Page<T> {
    pub(crate) total: u32,
    pub(crate) items: Vec<T>,
}

/// Hand-written composite, for tests that bypass the derive.
pub(crate) struct Manual;

impl Shape for Manual {
    type Fields = ();

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::composite::<Self>(vec![
            Member::new::<Self, u8>("level"),
            Member::new::<Self, Bar>("detail").with_rename("details"),
        ])
    }

    fn fields() -> Self::Fields {}
}

/// Fresh registry, so tests never observe registrations made elsewhere.
pub(crate) fn registry() -> Arc<ScalarRegistry> {
    Arc::new(ScalarRegistry::new())
}

pub(crate) fn key<T: ?Sized + 'static>() -> TypeKey {
    TypeKey::of::<T>()
}
