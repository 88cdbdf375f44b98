use proc_macro2::Span;
use syn::{
    parenthesized, parse::{Parse, ParseStream}, punctuated::Punctuated, spanned::Spanned,
    Expr, FnArg, Generics, Ident, Pat, ReturnType, Token, Type, TypeReference,
};

use crate::field_attributes::{parse_attr_items, AttrItem, DeclAttrs, Site};

use super::{validate, FieldAccess, FieldMeta, FuncMeta, MemberMeta, ParamMeta, PassBy, ReceiverMeta, TypeModel};

const TEMPLATE_ENTRY: &str = "template";
const FIELD_ENTRY: &str = "field";
const FUNC_ENTRY: &str = "func";

/// One entry of a `reflect!` block.
enum Entry {
    /// `type(Point, attrs..)` or `template(<T: Bound>, Wrapper<T>, attrs..)`
    Type {
        ty: Type,
        generics: Generics,
        items: Vec<AttrItem>,
        span: Span,
    },
    /// `field(name, attrs..)`, `field(name: Type, attrs..)` or `field(static NAME, attrs..)`
    Field {
        name: Ident,
        is_static: bool,
        ty: Option<Type>,
        items: Vec<AttrItem>,
    },
    /// `func(fn name(&self, a: A) -> R = callee, attrs..)`
    Func {
        signature: FuncSignature,
        items: Vec<AttrItem>,
    },
}

struct FuncSignature {
    name: Ident,
    receiver: ReceiverMeta,
    params: Vec<ParamMeta>,
    ret: Option<Type>,
    callee: Option<Expr>,
}

/// Parses the attribute items following the leading part of an entry.
fn parse_trailing_items(content: ParseStream) -> syn::Result<Vec<AttrItem>> {
    if content.is_empty() {
        return Ok(Vec::new());
    }
    content.parse::<Token![,]>()?;
    parse_attr_items(content)
}

/// Splits `&T` and `&mut T` into the owned type and the way to pass it.
fn param_type(ty: &Type) -> (Type, PassBy) {
    match ty {
        Type::Reference(TypeReference { mutability, elem, .. }) => {
            let pass_by = if mutability.is_some() { PassBy::Mut } else { PassBy::Ref };
            ((**elem).clone(), pass_by)
        }
        _ => (ty.clone(), PassBy::Value),
    }
}

impl Parse for FuncSignature {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        input.parse::<Token![fn]>()?;
        let name = input.parse::<Ident>()?;

        let content;
        parenthesized!(content in input);
        let inputs = Punctuated::<FnArg, Token![,]>::parse_terminated(&content)?;

        let mut receiver = ReceiverMeta::Static;
        let mut params = Vec::with_capacity(inputs.len());

        for (index, arg) in inputs.iter().enumerate() {
            match arg {
                FnArg::Receiver(recv) if index == 0 => {
                    if recv.reference.is_none() {
                        return Err(syn::Error::new(
                            recv.span(),
                            "Reflected functions take their receiver as `&self` or `&mut self`, not by value",
                        ));
                    }
                    receiver = if recv.mutability.is_some() { ReceiverMeta::Mut } else { ReceiverMeta::Ref };
                }
                FnArg::Receiver(recv) => {
                    return Err(syn::Error::new(recv.span(), "The receiver must be the first parameter"));
                }
                FnArg::Typed(pat_type) => {
                    let param_name = match &*pat_type.pat {
                        Pat::Ident(pat) if pat.ident == "self" => {
                            return Err(syn::Error::new(
                                pat.span(),
                                "Typed receivers are not supported, use `&self` or `&mut self`",
                            ));
                        }
                        Pat::Ident(pat) => pat.ident.to_string(),
                        _ => format!("arg{index}"),
                    };

                    let (ty, pass_by) = param_type(&pat_type.ty);
                    params.push(ParamMeta { name: param_name, ty, pass_by });
                }
            }
        }

        let ret = match input.parse::<ReturnType>()? {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) => Some(*ty),
        };

        let callee = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse::<Expr>()?)
        } else {
            None
        };

        Ok(Self { name, receiver, params, ret, callee })
    }
}

impl Parse for Entry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lookahead = input.lookahead1();

        if lookahead.peek(Token![type]) {
            let span = input.parse::<Token![type]>()?.span;
            let content;
            parenthesized!(content in input);

            let ty = content.parse::<Type>()?;
            let items = parse_trailing_items(&content)?;
            return Ok(Entry::Type { ty, generics: Generics::default(), items, span });
        }

        if !lookahead.peek(Ident) {
            return Err(lookahead.error());
        }

        let keyword = input.parse::<Ident>()?;
        let content;
        parenthesized!(content in input);

        match keyword.to_string().as_str() {
            TEMPLATE_ENTRY => {
                let generics = content.parse::<Generics>()?;
                content.parse::<Token![,]>()?;
                let ty = content.parse::<Type>()?;
                let items = parse_trailing_items(&content)?;
                Ok(Entry::Type { ty, generics, items, span: keyword.span() })
            }
            FIELD_ENTRY => {
                let is_static = if content.peek(Token![static]) {
                    content.parse::<Token![static]>()?;
                    true
                } else {
                    false
                };

                let name = content.parse::<Ident>()?;
                let ty = if content.peek(Token![:]) {
                    content.parse::<Token![:]>()?;
                    Some(content.parse::<Type>()?)
                } else {
                    None
                };

                let items = parse_trailing_items(&content)?;
                Ok(Entry::Field { name, is_static, ty, items })
            }
            FUNC_ENTRY => {
                let signature = content.parse::<FuncSignature>()?;
                let items = parse_trailing_items(&content)?;
                Ok(Entry::Func { signature, items })
            }
            other => Err(syn::Error::new(
                keyword.span(),
                format!("Unknown reflect entry `{other}`, expected one of [`type`, `{TEMPLATE_ENTRY}`, `{FIELD_ENTRY}`, `{FUNC_ENTRY}`]"),
            )),
        }
    }
}

/// The whole input of `reflect!`.
pub(crate) struct BatchInput {
    entries: Vec<Entry>,
}

impl Parse for BatchInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let entries = Punctuated::<Entry, Token![,]>::parse_terminated(input)?;
        Ok(Self {
            entries: entries.into_iter().collect(),
        })
    }
}

impl BatchInput {
    /// Groups the entries by type, every member belongs to the type entry before it.
    pub fn into_models(self) -> anyhow::Result<Vec<TypeModel>, syn::Error> {
        let mut models: Vec<TypeModel> = Vec::new();

        for entry in self.entries {
            let member = match entry {
                Entry::Type { ty, generics, items, span } => {
                    models.push(TypeModel {
                        self_ty: ty,
                        generics,
                        attrs: DeclAttrs::from_items(items, Site::Type)?,
                        members: Vec::new(),
                        bound_type_params: false,
                        span,
                    });
                    continue;
                }
                Entry::Field { name, is_static, ty, items } => {
                    let span = name.span();
                    MemberMeta::Field(FieldMeta {
                        name: name.to_string(),
                        access: if is_static { FieldAccess::Static(name) } else { FieldAccess::Instance(syn::Member::Named(name)) },
                        ty,
                        attrs: DeclAttrs::from_items(items, Site::Field)?,
                        span,
                    })
                }
                Entry::Func { signature, items } => {
                    let FuncSignature { name, receiver, params, ret, callee } = signature;
                    MemberMeta::Function(FuncMeta {
                        name,
                        receiver,
                        params,
                        ret,
                        callee,
                        attrs: DeclAttrs::from_items(items, Site::Function)?,
                    })
                }
            };

            match models.last_mut() {
                Some(model) => model.members.push(member),
                None => return Err(syn::Error::new(
                    member.span(),
                    "Members must follow the `type(..)` or `template(..)` entry of their type",
                )),
            }
        }

        for model in &models {
            validate::validate_model(model)?;
        }

        Ok(models)
    }
}
