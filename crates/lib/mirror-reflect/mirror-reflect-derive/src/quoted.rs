//! Unit structs standing for fully qualified std paths inside `quote!()`.
//!
//! Generated code must not depend on the names in scope at the expansion site,
//! so every std item it uses is spelled out in its fully qualified form.

use quote::{ToTokens, quote};

pub(crate) struct QuotedOption;

pub(crate) struct QuotedBox;

pub(crate) struct QuotedResult;

pub(crate) struct QuotedClone;

impl ToTokens for QuotedOption {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        quote!(::core::option::Option).to_tokens(tokens)
    }
}

impl ToTokens for QuotedBox {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        quote!(::std::boxed::Box).to_tokens(tokens)
    }
}

impl ToTokens for QuotedResult {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        quote!(::core::result::Result).to_tokens(tokens)
    }
}

impl ToTokens for QuotedClone {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        quote!(::core::clone::Clone).to_tokens(tokens)
    }
}
