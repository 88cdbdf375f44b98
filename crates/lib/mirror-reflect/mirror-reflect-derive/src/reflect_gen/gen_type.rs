use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{parse_quote, Generics, Path, Type};

use crate::{
    quoted::QuotedBox,
    reflect_meta::{ReflectMeta, TypeModel},
    trait_attributes::ReflectTraits,
};

use super::{gen_attributes, gen_members, gen_typed, UsageSite};

/// Generates the `Reflect` implementation shared by structured types and primitives.
///
/// `variant` names the `ReflectRef` variant the value is classified as.
pub(crate) fn gen_reflect_impl(
    reflect_crate_path: &Path,
    self_ty: &Type,
    generics: &Generics,
    variant: Ident,
    traits: &ReflectTraits,
) -> TokenStream {
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let clone_impl = traits.gen_clone_impl(reflect_crate_path);
    let display_impl = traits.gen_display_impl();

    quote! {
        impl #impl_generics #reflect_crate_path::Reflect for #self_ty #where_clause {
            #[inline]
            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            #[inline]
            fn get_type_descriptor(&self) -> &'static #reflect_crate_path::TypeDescriptor {
                <Self as #reflect_crate_path::Typed>::type_descriptor()
            }

            #[inline]
            fn into_reflect(self: #QuotedBox<Self>) -> #QuotedBox<dyn #reflect_crate_path::Reflect> {
                self
            }

            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_crate_path::Reflect {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_crate_path::Reflect {
                self
            }

            fn reflect_ref(&self) -> #reflect_crate_path::ReflectRef<'_> {
                #reflect_crate_path::ReflectRef::#variant(self)
            }

            // forwarded std traits (Clone, Display)
            #clone_impl
            #display_impl
        }
    }
}

/// Generates `Typed` and `Reflect` for a type with declared members.
pub(crate) fn gen_type(meta: &ReflectMeta, model: &TypeModel) -> TokenStream {
    let reflect_crate_path = meta.reflect_crate_path();

    let mut generics = model.generics.clone();
    if model.bound_type_params {
        let params = generics.type_params()
            .map(|param| param.ident.clone())
            .collect::<Vec<_>>();
        let where_clause = generics.make_where_clause();
        for param in params {
            where_clause.predicates.push(parse_quote!(#param: #reflect_crate_path::Reflect));
        }
    }

    let members = gen_members(reflect_crate_path, &model.members);
    let attributes = gen_attributes(reflect_crate_path, &model.attrs.attributes, UsageSite::Type, &quote!(Self));

    let typed_impl = gen_typed(
        &model.self_ty,
        &generics,
        // this generator function only called once per type
        quote! {
            #reflect_crate_path::TypeDescriptor::new::<Self>(
                #reflect_crate_path::get_type_collapsed_name(::core::any::type_name::<Self>()),
                #attributes,
                ::std::vec![#(#members),*],
            )
        },
        reflect_crate_path,
    );

    let reflect_impl = gen_reflect_impl(
        reflect_crate_path,
        &model.self_ty,
        &generics,
        Ident::new("Struct", model.span),
        &model.attrs.traits,
    );

    quote! {
        // implement Typed
        #typed_impl

        // implement Reflect
        #reflect_impl
    }
}
