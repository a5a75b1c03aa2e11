use proc_macro::TokenStream;

mod shape;
mod util;

/// Derive `shapeql::shape::Shape`.
///
/// - named structs expand into their members, in declaration order;
/// - fieldless enums are scalars and convert into enum literals;
/// - `#[shape(scalar)]` makes any struct a scalar leaf;
/// - `#[shape(rename = "...")]` on a field or variant overrides its name;
/// - `#[shape(skip)]` leaves a field out of the selection;
/// - `#[shape(crate = "path")]` overrides the `::shapeql` path.
#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(input: TokenStream) -> TokenStream {
    shape::derive_shape(input.into()).into()
}
