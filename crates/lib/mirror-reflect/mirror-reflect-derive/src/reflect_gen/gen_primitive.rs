use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{parse_quote, Generics, Type};

use crate::{reflect_meta::ReflectMeta, trait_attributes::ReflectTraits};

use super::{gen_reflect_impl, gen_typed};

/// Generates `Typed` and `Reflect` for a value without reflected members.
pub(crate) fn gen_primitive(
    meta: &ReflectMeta,
    type_name: &Ident,
    generics: &Generics,
    traits: &ReflectTraits,
) -> TokenStream {
    let reflect_crate_path = meta.reflect_crate_path();

    let (_, type_generics, _) = generics.split_for_impl();
    let self_ty: Type = parse_quote!(#type_name #type_generics);

    let typed_impl = gen_typed(
        &self_ty,
        generics,
        quote! {
            #reflect_crate_path::TypeDescriptor::value::<Self>()
        },
        reflect_crate_path,
    );

    let reflect_impl = gen_reflect_impl(
        reflect_crate_path,
        &self_ty,
        generics,
        Ident::new("Value", Span::call_site()),
        traits,
    );

    quote! {
        // implement Typed
        #typed_impl

        // implement Reflect
        #reflect_impl
    }
}
