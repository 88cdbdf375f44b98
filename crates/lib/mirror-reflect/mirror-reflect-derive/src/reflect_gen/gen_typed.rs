use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Path, Type};

pub(crate) fn gen_typed(
    self_ty: &Type,
    generics: &Generics,
    generator: TokenStream,
    reflect_crate_path: &Path,
) -> TokenStream {
    let is_generics = !generics.params.is_empty();

    let static_cell = if is_generics {
        quote! {
            static DESCRIPTOR_CELL: #reflect_crate_path::GenericDescriptorCell = #reflect_crate_path::GenericDescriptorCell::new();
            DESCRIPTOR_CELL.get_or_insert::<Self, _>(|| { #generator })
        }
    } else {
        quote! {
            static DESCRIPTOR_CELL: #reflect_crate_path::NonGenericDescriptorCell = #reflect_crate_path::NonGenericDescriptorCell::new();
            DESCRIPTOR_CELL.get_or_set(|| { #generator })
        }
    };

    let (impl_generics, _, where_clause) = generics.split_for_impl();

    // generate a static cell to store the TypeDescriptor for `'static` lifetime.
    quote! {
        impl #impl_generics #reflect_crate_path::Typed for #self_ty #where_clause {
            fn type_descriptor() -> &'static #reflect_crate_path::TypeDescriptor {
                #static_cell
            }
        }
    }
}
