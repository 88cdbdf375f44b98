use proc_macro2::Span;
use syn::{Expr, Ident, Member, Type};

use crate::field_attributes::DeclAttrs;

pub(crate) enum MemberMeta {
    Field(FieldMeta),
    Function(FuncMeta),
}

impl MemberMeta {
    pub fn name(&self) -> String {
        match self {
            MemberMeta::Field(field) => field.name.clone(),
            MemberMeta::Function(func) => func.name.to_string(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            MemberMeta::Field(field) => field.span,
            MemberMeta::Function(func) => func.name.span(),
        }
    }
}

/// How the value of a field is reached.
pub(crate) enum FieldAccess {
    /// `target.name` or `target.0`
    Instance(Member),
    /// `Self::NAME`, an associated constant.
    Static(Ident),
}

pub(crate) struct FieldMeta {
    pub name: String,
    pub access: FieldAccess,
    /// Value type, inferred from the accessor when absent.
    pub ty: Option<Type>,
    pub attrs: DeclAttrs,
    pub span: Span,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ReceiverMeta {
    Ref,
    Mut,
    Static,
}

/// How an argument is handed to the callee.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PassBy {
    Value,
    Ref,
    Mut,
}

pub(crate) struct ParamMeta {
    pub name: String,
    /// Type of the owned argument value.
    pub ty: Type,
    pub pass_by: PassBy,
}

pub(crate) struct FuncMeta {
    pub name: Ident,
    pub receiver: ReceiverMeta,
    pub params: Vec<ParamMeta>,
    /// `None` for `()`.
    pub ret: Option<Type>,
    /// Replaces `Self::name` as the called function.
    pub callee: Option<Expr>,
    pub attrs: DeclAttrs,
}

impl FuncMeta {
    /// Receiver and parameter types, comparable between overloads.
    pub fn signature_key(&self) -> String {
        let params = self.params.iter()
            .map(|param| {
                let ty = &param.ty;
                format!("{:?}{}", param.pass_by, quote::quote!(#ty))
            })
            .collect::<Vec<_>>();
        format!("{:?}({})", self.receiver, params.join(","))
    }
}
