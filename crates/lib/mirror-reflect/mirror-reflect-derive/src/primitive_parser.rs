use proc_macro2::Ident;
use syn::{Generics, parse::Parse, token, parenthesized, WhereClause};

use crate::trait_attributes::ReflectTraits;

/// Parse input as:
///
/// ```ignore
/// // Without traits, the value is opaque
/// 1. Handle
/// // With traits
/// 2. u32(Display, Clone)
/// // With type generics and a where clause after the traits
/// 3. Id<T>(Clone(clone_id)) where T: Send + Sync + 'static
/// ```
pub(crate) struct PrimitiveParser {
    pub type_name: Ident,
    pub generics: Generics,
    pub traits: Option<ReflectTraits>,
}

impl Parse for PrimitiveParser {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let type_name = input.parse::<Ident>()?;
        let mut generics = input.parse::<Generics>()?;

        let traits = if input.peek(token::Paren) {
            let content;
            parenthesized!(content in input);
            Some(content.parse::<ReflectTraits>()?)
        } else {
            None
        };

        if input.peek(token::Where) {
            generics.where_clause = Some(input.parse::<WhereClause>()?);
        }

        // allow `impl_reflect_primitive!(u32(Display);)`
        if input.peek(token::Semi) {
            input.parse::<token::Semi>()?;
        }

        Ok(Self {
            type_name,
            generics,
            traits,
        })
    }
}
