use proc_macro2::TokenStream;
use quote::quote;
use syn::Generics;

///
/// bounded_where_clause
///
/// The declared where clause with `T: <bound>` appended for every type
/// parameter. Empty when there is nothing to emit.
///

pub fn bounded_where_clause(generics: &Generics, bound: &TokenStream) -> TokenStream {
    let declared = generics
        .where_clause
        .iter()
        .flat_map(|wc| wc.predicates.iter())
        .map(|pred| quote!(#pred));

    let added = generics.type_params().map(|param| {
        let ident = &param.ident;
        quote!(#ident: #bound)
    });

    let predicates: Vec<TokenStream> = declared.chain(added).collect();
    if predicates.is_empty() {
        return quote!();
    }

    quote!(where #(#predicates),*)
}

///
/// TESTS
///
