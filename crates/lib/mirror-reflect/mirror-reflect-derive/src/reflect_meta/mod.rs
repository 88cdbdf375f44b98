pub(crate) mod batch;
mod member_meta;
mod validate;

use mirror_core::result::{ResultFlattener, CombinableError};

pub(crate) use member_meta::*;

use proc_macro2::Span;
use syn::{Data, DeriveInput, Fields, Generics, Index, Member, Path, Type, parse_quote, spanned::Spanned};

use crate::{
    crate_manifest::CrateManifest,
    field_attributes::{self, DeclAttrs, Site},
};

const MIRROR_REFLECT_CRATE_NAME: &str = "mirror-reflect";

pub struct SynError {
    inner: syn::Error,
}

impl SynError {
    pub fn into_inner(self) -> syn::Error {
        self.inner
    }
}

impl CombinableError for SynError {
    fn combine(&mut self, other: Self) {
        self.inner.combine(other.inner)
    }
}

impl From<syn::Error> for SynError {
    fn from(value: syn::Error) -> Self {
        Self {
            inner: value
        }
    }
}

/// Settings shared by everything one macro invocation generates.
pub(crate) struct ReflectMeta {
    /// Cached crate path to `mirror-reflect` crate.
    reflect_crate_path: Path,
}

impl Default for ReflectMeta {
    fn default() -> Self {
        Self {
            reflect_crate_path: CrateManifest::get_path_default(MIRROR_REFLECT_CRATE_NAME),
        }
    }
}

impl ReflectMeta {
    pub fn reflect_crate_path(&self) -> &Path {
        &self.reflect_crate_path
    }
}

/// Everything declared about one reflected type.
pub(crate) struct TypeModel {
    /// The reflected type, with its generic arguments.
    pub self_ty: Type,
    pub generics: Generics,
    /// Type attributes and forwarded traits.
    pub attrs: DeclAttrs,
    /// Members in declaration order.
    pub members: Vec<MemberMeta>,
    /// Every type parameter is bound by `Reflect` (derived types).
    pub bound_type_params: bool,
    pub span: Span,
}

impl TypeModel {
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    pub fn from_derive_input(input: &DeriveInput) -> anyhow::Result<Self, syn::Error> {
        let attrs = field_attributes::parse_reflect_attributes(&input.attrs, Site::Type)?;

        let fields = match &input.data {
            Data::Struct(data) => &data.fields,
            Data::Enum(data) => return Err(syn::Error::new(
                data.enum_token.span(),
                "Reflection is only supported for structs, use `reflect!` to declare the members of other types",
            )),
            Data::Union(data) => return Err(syn::Error::new(
                data.union_token.span(),
                "Reflection not supported for unions",
            )),
        };

        let type_name = &input.ident;
        let (_, type_generics, _) = input.generics.split_for_impl();

        let model = TypeModel {
            self_ty: parse_quote!(#type_name #type_generics),
            generics: input.generics.clone(),
            attrs,
            members: Self::collect_struct_fields(fields)?,
            bound_type_params: true,
            span: type_name.span(),
        };

        validate::validate_model(&model)?;
        Ok(model)
    }

    fn collect_struct_fields(fields: &Fields) -> anyhow::Result<Vec<MemberMeta>, syn::Error> {
        let struct_fields: ResultFlattener<Option<MemberMeta>, SynError> = fields.iter().enumerate()
            .map(|(index, field)| -> anyhow::Result<Option<MemberMeta>, SynError> {
                let attrs = field_attributes::parse_reflect_attributes(&field.attrs, Site::DeriveField)?;
                if attrs.skip {
                    return Ok(None);
                }

                let (name, member) = match &field.ident {
                    Some(ident) => (ident.to_string(), Member::Named(ident.clone())),
                    None => (index.to_string(), Member::Unnamed(Index::from(index))),
                };

                Ok(Some(MemberMeta::Field(FieldMeta {
                    name,
                    access: FieldAccess::Instance(member),
                    ty: Some(field.ty.clone()),
                    attrs,
                    span: field.span(),
                })))
            })
            .collect();

        match struct_fields.finish() {
            Ok(fields) => Ok(fields.into_iter().flatten().collect()),
            Err(inner) => Err(inner.into_inner())
        }
    }
}
