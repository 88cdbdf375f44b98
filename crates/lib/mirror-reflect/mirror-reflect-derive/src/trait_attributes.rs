use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Path, punctuated::Punctuated, NestedMeta, token::Comma, Meta, parse::Parse, Ident};

use crate::quoted::{QuotedBox, QuotedClone, QuotedOption};

const DISPLAY_TRAIT: &str = "Display";
const CLONE_TRAIT: &str = "Clone";

/// Whether `ident` names a std trait forwarded to reflection.
pub(crate) fn is_reflected_trait(ident: &Ident) -> bool {
    ident == DISPLAY_TRAIT || ident == CLONE_TRAIT
}

#[derive(Clone, Default)]
pub(crate) enum TraitImplStatus {
    /// The trait is `NOT` registered as implemented.
    #[default]
    NotImplemented,
    /// The trait is registered as implemented.
    Implemented(Span),
    /// The trait is registered with custom function to replace the derive behavior.
    CustomImpl(Path, Span),
}

impl TraitImplStatus {
    /// Merges this [`TraitImplStatus`] with another.
    ///
    /// Returns whichever value is not [`TraitImplStatus::NotImplemented`].
    /// If both values are [`TraitImplStatus::NotImplemented`], then that is returned.
    /// Otherwise, an error is returned if neither value is [`TraitImplStatus::NotImplemented`].
    pub fn merge(self, other: TraitImplStatus) -> anyhow::Result<TraitImplStatus, syn::Error> {
        match (self, other) {
            (TraitImplStatus::NotImplemented, value) | (value, TraitImplStatus::NotImplemented) => Ok(value),
            (_, TraitImplStatus::Implemented(span) | TraitImplStatus::CustomImpl(_, span)) => {
                Err(syn::Error::new(span, "Conflicting trait registration"))
            }
        }
    }
}

/// Std traits a reflected type forwards to reflection.
///
/// `Display` makes the value natively printable for the debug printer, `Clone`
/// makes it readable by copy (e.g. when a field is read through `invoke`).
#[derive(Default, Clone)]
pub(crate) struct ReflectTraits {
    display_impl: TraitImplStatus,
    clone_impl: TraitImplStatus,
}

impl ReflectTraits {
    /// Registers the trait named `ident`, implemented by `status`.
    pub(crate) fn register(&mut self, ident: &Ident, status: TraitImplStatus) -> anyhow::Result<(), syn::Error> {
        match ident.to_string().as_str() {
            DISPLAY_TRAIT => {
                self.display_impl = std::mem::take(&mut self.display_impl).merge(status)?;
            }
            CLONE_TRAIT => {
                self.clone_impl = std::mem::take(&mut self.clone_impl).merge(status)?;
            }
            other => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("Unsupported reflected trait `{other}`, expected one of [`{DISPLAY_TRAIT}`, `{CLONE_TRAIT}`]"),
                ));
            }
        }
        Ok(())
    }

    /// Accept a comma punctuated traits sequence.
    /// (e.g. Display, Clone(custom_clone_func), )
    pub(crate) fn from_nested_meta(
        nested_metas: &Punctuated<NestedMeta, Comma>,
    ) -> anyhow::Result<Self, syn::Error> {
        let mut traits = ReflectTraits::default();

        for nested_meta in nested_metas.iter() {
            match nested_meta {
                // handle `Display`
                NestedMeta::Meta(Meta::Path(path)) => {
                    // get the first ident in the path (hopefully the path only contains one and not `std::fmt::Display`)
                    let Some(segment) = path.segments.iter().next() else {
                        continue;
                    };

                    // track the span where the trait is implemented for future errors
                    let span = segment.ident.span();
                    traits.register(&segment.ident, TraitImplStatus::Implemented(span))?;
                }
                // handle `Clone(custom_clone_func)`
                NestedMeta::Meta(Meta::List(list)) => {
                    let Some(segment) = list.path.segments.iter().next() else {
                        continue;
                    };

                    let span = segment.ident.span();

                    // first literal of the list, this should be the path of the custom function
                    if let Some(NestedMeta::Meta(Meta::Path(path))) = list.nested.iter().next() {
                        traits.register(&segment.ident, TraitImplStatus::CustomImpl(path.clone(), span))?;
                    }
                }
                other => {
                    return Err(syn::Error::new_spanned(other, "Expected a trait name"));
                }
            }
        }

        Ok(traits)
    }

    /// Generates `Reflect::clone_value`, or nothing to keep the default.
    pub fn gen_clone_impl(&self, reflect_crate_path: &Path) -> Option<TokenStream> {
        let clone = match &self.clone_impl {
            TraitImplStatus::NotImplemented => return None,
            TraitImplStatus::Implemented(_) => quote!(#QuotedClone::clone(self)),
            TraitImplStatus::CustomImpl(path, _) => quote!(#path(self)),
        };

        Some(quote! {
            #[inline]
            fn clone_value(&self) -> #QuotedOption<#QuotedBox<dyn #reflect_crate_path::Reflect>> {
                #QuotedOption::Some(#QuotedBox::new(#clone))
            }
        })
    }

    /// Generates `Reflect::display`, or nothing to keep the default.
    pub fn gen_display_impl(&self) -> Option<TokenStream> {
        let display = match &self.display_impl {
            TraitImplStatus::NotImplemented => return None,
            TraitImplStatus::Implemented(_) => quote!(::core::write!(out, "{}", self)),
            TraitImplStatus::CustomImpl(path, _) => quote!(#path(self, out)),
        };

        Some(quote! {
            #[inline]
            fn display(&self, out: &mut dyn ::core::fmt::Write) -> #QuotedOption<::core::fmt::Result> {
                #QuotedOption::Some(#display)
            }
        })
    }
}

impl Parse for ReflectTraits {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let punctuated = Punctuated::<NestedMeta, Comma>::parse_terminated(input)?;
        ReflectTraits::from_nested_meta(&punctuated)
    }
}
