use crate::util::bounded_where_clause;
use darling::{
    FromDeriveInput, FromField, FromVariant,
    ast::{Data, Style},
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Error, Generics, Ident, Path, Type, Visibility, ext::IdentExt};

///
/// ShapeInput
///

#[derive(FromDeriveInput)]
#[darling(
    attributes(shape),
    supports(struct_named, struct_unit, struct_newtype, struct_tuple, enum_unit)
)]
struct ShapeInput {
    ident: Ident,
    vis: Visibility,
    generics: Generics,
    data: Data<ShapeVariant, ShapeField>,

    #[darling(default)]
    scalar: bool,

    #[darling(default, rename = "crate")]
    krate: Option<Path>,
}

///
/// ShapeField
///

#[derive(FromField)]
#[darling(attributes(shape))]
struct ShapeField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    skip: bool,
}

///
/// ShapeVariant
///

#[derive(FromVariant)]
#[darling(attributes(shape))]
struct ShapeVariant {
    ident: Ident,

    #[darling(default)]
    rename: Option<String>,
}

// derive_shape
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let shape = match ShapeInput::from_derive_input(&input) {
        Ok(shape) => shape,
        Err(err) => return err.write_errors(),
    };

    if let Some(lifetime) = shape.generics.lifetimes().next() {
        return Error::new_spanned(
            lifetime,
            "Shape cannot be derived for types with lifetime parameters",
        )
        .to_compile_error();
    }

    let krate = shape
        .krate
        .as_ref()
        .map_or_else(|| quote!(::shapeql), |path| quote!(#path));

    match &shape.data {
        Data::Enum(variants) => derive_enum(&shape, variants, &krate),
        Data::Struct(_) if shape.scalar => derive_scalar_struct(&shape, &krate),
        Data::Struct(fields) => match fields.style {
            Style::Tuple => Error::new_spanned(
                &shape.ident,
                "Shape can only be derived for tuple structs marked #[shape(scalar)]",
            )
            .to_compile_error(),
            Style::Struct | Style::Unit => derive_composite(&shape, &fields.fields, &krate),
        },
    }
}

// derive_composite
// named or unit struct: members in declaration order plus a field table
fn derive_composite(shape: &ShapeInput, fields: &[ShapeField], krate: &TokenStream) -> TokenStream {
    let ident = &shape.ident;
    let vis = &shape.vis;
    let fields_ident = format_ident!("{ident}Fields");
    let (impl_generics, ty_generics, _) = shape.generics.split_for_impl();
    let where_clause = bounded_where_clause(&shape.generics, &quote!(#krate::shape::Shape));

    let selected: Vec<(&Ident, &ShapeField)> = fields
        .iter()
        .filter(|field| !field.skip)
        .filter_map(|field| field.ident.as_ref().map(|ident| (ident, field)))
        .collect();

    let members = selected.iter().map(|(field_ident, field)| {
        let name = field_ident.unraw().to_string();
        let ty = &field.ty;
        let rename = field
            .rename
            .as_ref()
            .map(|rename| quote!(.with_rename(#rename)));

        quote! {
            #krate::shape::Member::new::<Self, #ty>(#name) #rename
        }
    });

    let table_fields = selected.iter().map(|(field_ident, _)| {
        quote! {
            #vis #field_ident: #krate::shape::FieldRef<#ident #ty_generics>
        }
    });

    let table_inits = selected.iter().map(|(field_ident, _)| {
        let name = field_ident.unraw().to_string();

        quote! {
            #field_ident: #krate::shape::FieldRef::new(#krate::key::FieldId::of::<Self>(#name))
        }
    });

    // generic tables carry a marker so unused parameters stay legal
    let (marker_field, marker_init) = if shape.generics.params.is_empty() {
        (quote!(), quote!())
    } else {
        (
            quote! {
                #[doc(hidden)]
                #vis __shape: ::core::marker::PhantomData<fn() -> #ident #ty_generics>,
            },
            quote!(__shape: ::core::marker::PhantomData,),
        )
    };

    let generics = &shape.generics;
    let decl_where = &shape.generics.where_clause;
    let doc = format!("Field selectors for [`{ident}`].");

    quote! {
        #[doc = #doc]
        #[allow(dead_code)]
        #[derive(Clone, Copy, Debug)]
        #vis struct #fields_ident #generics #decl_where {
            #(#table_fields,)*
            #marker_field
        }

        impl #impl_generics #krate::shape::Shape for #ident #ty_generics #where_clause {
            type Fields = #fields_ident #ty_generics;

            fn descriptor() -> #krate::shape::TypeDescriptor {
                #krate::shape::TypeDescriptor::composite::<Self>(::std::vec![
                    #(#members),*
                ])
            }

            fn fields() -> Self::Fields {
                #fields_ident {
                    #(#table_inits,)*
                    #marker_init
                }
            }
        }
    }
}

// derive_scalar_struct
fn derive_scalar_struct(shape: &ShapeInput, krate: &TokenStream) -> TokenStream {
    let ident = &shape.ident;
    let (impl_generics, ty_generics, _) = shape.generics.split_for_impl();
    let where_clause = bounded_where_clause(&shape.generics, &quote!('static));

    quote! {
        impl #impl_generics #krate::shape::Shape for #ident #ty_generics #where_clause {
            type Fields = ();

            fn descriptor() -> #krate::shape::TypeDescriptor {
                #krate::shape::TypeDescriptor::scalar::<Self>()
            }

            fn fields() -> Self::Fields {}
        }
    }
}

// derive_enum
// unit-only enums are scalars and convert into bare enum literals
fn derive_enum(shape: &ShapeInput, variants: &[ShapeVariant], krate: &TokenStream) -> TokenStream {
    let ident = &shape.ident;
    let (impl_generics, ty_generics, _) = shape.generics.split_for_impl();
    let where_clause = bounded_where_clause(&shape.generics, &quote!('static));

    let arms: Vec<TokenStream> = variants
        .iter()
        .map(|variant| {
            let variant_ident = &variant.ident;
            let literal = variant
                .rename
                .clone()
                .unwrap_or_else(|| variant_ident.unraw().to_string());

            quote!(#ident::#variant_ident => #literal)
        })
        .collect();

    // an empty enum has no values to convert
    let conversions = if arms.is_empty() {
        quote!()
    } else {
        quote! {
            impl #impl_generics ::core::convert::From<#ident #ty_generics> for #krate::value::Value #where_clause {
                fn from(value: #ident #ty_generics) -> Self {
                    Self::enum_literal(match value {
                        #(#arms,)*
                    })
                }
            }

            impl #impl_generics ::core::convert::From<&#ident #ty_generics> for #krate::value::Value #where_clause {
                fn from(value: &#ident #ty_generics) -> Self {
                    Self::enum_literal(match value {
                        #(#arms,)*
                    })
                }
            }
        }
    };

    quote! {
        impl #impl_generics #krate::shape::Shape for #ident #ty_generics #where_clause {
            type Fields = ();

            fn descriptor() -> #krate::shape::TypeDescriptor {
                #krate::shape::TypeDescriptor::scalar::<Self>()
            }

            fn fields() -> Self::Fields {}
        }

        #conversions
    }
}

///
/// TESTS
///
