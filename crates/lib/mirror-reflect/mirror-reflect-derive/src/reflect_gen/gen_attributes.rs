use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::Path;

use crate::field_attributes::AttrMeta;

/// Declaration sites, named as the `attr::usage` tags.
#[derive(Debug, Copy, Clone)]
pub(crate) enum UsageSite {
    Type,
    Field,
    Function,
}

impl UsageSite {
    fn ident(self) -> Ident {
        let name = match self {
            UsageSite::Type => "Type",
            UsageSite::Field => "Field",
            UsageSite::Function => "Function",
        };
        Ident::new(name, Span::call_site())
    }
}

fn gen_attribute_value(reflect_crate_path: &Path, attribute: &AttrMeta, value_ty: &TokenStream) -> TokenStream {
    match attribute {
        AttrMeta::Bases { types, .. } => quote! {
            #reflect_crate_path::attr::Bases::of::<Self, #reflect_crate_path::type_list![#(#types),*]>()
        },
        AttrMeta::Property { friendly_name: Some(name), .. } => quote! {
            #reflect_crate_path::attr::Property::named(#name)
        },
        AttrMeta::Property { friendly_name: None, .. } => quote! {
            #reflect_crate_path::attr::Property::new()
        },
        AttrMeta::Debug { printer, .. } => quote! {
            #reflect_crate_path::attr::Debug::new::<#value_ty, _>(#printer)
        },
        AttrMeta::Custom(expr) => quote!(#expr),
    }
}

/// Generates the `Attributes` of one declaration.
///
/// `value_ty` is the type of the values a `debug` printer receives, `_` to infer it from the printer.
pub(crate) fn gen_attributes(
    reflect_crate_path: &Path,
    attributes: &[AttrMeta],
    site: UsageSite,
    value_ty: &TokenStream,
) -> TokenStream {
    let usage = site.ident();
    let values = attributes.iter()
        .map(|attribute| gen_attribute_value(reflect_crate_path, attribute, value_ty));

    quote! {
        #reflect_crate_path::attr::make_attributes::<#reflect_crate_path::attr::usage::#usage, _>(
            #reflect_crate_path::value_list![#(#values),*]
        )
    }
}
