use proc_macro2::Span;
use quote::ToTokens;
use syn::{
    parenthesized, parse::{Parse, ParseStream}, punctuated::Punctuated, spanned::Spanned,
    token, Attribute, Expr, Ident, LitStr, Token, Type,
};

use crate::{trait_attributes::{is_reflected_trait, ReflectTraits, TraitImplStatus}, REFLECT_ATTR};

pub(crate) static SKIP_ATTR: &str = "skip";
pub(crate) static READONLY_ATTR: &str = "readonly";
pub(crate) static BASES_ATTR: &str = "bases";
pub(crate) static PROPERTY_ATTR: &str = "property";
pub(crate) static DEBUG_ATTR: &str = "debug";

/// The declaration an attribute list decorates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Site {
    Type,
    /// A field declared in `reflect!`.
    Field,
    /// A field of a struct deriving `Reflect`.
    DeriveField,
    Function,
}

impl Site {
    fn describe(self) -> &'static str {
        match self {
            Site::Type => "types",
            Site::Field | Site::DeriveField => "fields",
            Site::Function => "functions",
        }
    }
}

/// An attribute value attached to a reflected declaration.
#[derive(Clone)]
pub(crate) enum AttrMeta {
    /// `bases<A, B>`
    Bases { types: Vec<Type>, span: Span },
    /// `property`, `property("Name")` or `property = "Name"`
    Property { friendly_name: Option<LitStr>, span: Span },
    /// `debug(printer)` or `debug = printer`
    Debug { printer: Expr, span: Span },
    /// Any expression evaluating to an attribute value.
    Custom(Expr),
}

impl AttrMeta {
    /// Name of the built-in family, `None` for user attributes.
    pub fn family(&self) -> Option<&'static str> {
        match self {
            AttrMeta::Bases { .. } => Some(BASES_ATTR),
            AttrMeta::Property { .. } => Some(PROPERTY_ATTR),
            AttrMeta::Debug { .. } => Some(DEBUG_ATTR),
            AttrMeta::Custom(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            AttrMeta::Bases { span, .. }
            | AttrMeta::Property { span, .. }
            | AttrMeta::Debug { span, .. } => *span,
            AttrMeta::Custom(expr) => expr.span(),
        }
    }
}

/// One comma separated item of a reflect attribute list.
pub(crate) enum AttrItem {
    Skip(Span),
    Readonly(Span),
    /// `impl Display` or `impl Clone(custom_clone)`
    Trait { ident: Ident, status: TraitImplStatus },
    Meta(AttrMeta),
}

fn ends_item(input: ParseStream) -> bool {
    input.is_empty() || input.peek(Token![,])
}

fn parse_bases(input: ParseStream) -> syn::Result<Vec<Type>> {
    input.parse::<Token![<]>()?;

    let mut types = Vec::new();
    while !input.peek(Token![>]) {
        types.push(input.parse::<Type>()?);
        if !input.peek(Token![,]) {
            break;
        }
        input.parse::<Token![,]>()?;
    }

    input.parse::<Token![>]>()?;
    Ok(types)
}

impl Parse for AttrItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![impl]) {
            input.parse::<Token![impl]>()?;
            let ident = input.parse::<Ident>()?;
            let span = ident.span();

            let status = if input.peek(token::Paren) {
                let content;
                parenthesized!(content in input);
                TraitImplStatus::CustomImpl(content.parse()?, span)
            } else {
                TraitImplStatus::Implemented(span)
            };
            return Ok(AttrItem::Trait { ident, status });
        }

        // look at the keyword without consuming it, anything else is parsed as an expression
        let keyword = if input.peek(Ident) && !input.peek2(Token![::]) {
            let fork = input.fork();
            let ident = fork.parse::<Ident>()?;
            Some((ident.to_string(), ends_item(&fork), fork.peek(token::Paren), fork.peek(Token![=]), fork.peek(Token![<])))
        } else {
            None
        };

        match keyword {
            Some((name, true, ..)) if name == SKIP_ATTR => {
                Ok(AttrItem::Skip(input.parse::<Ident>()?.span()))
            }
            Some((name, true, ..)) if name == READONLY_ATTR => {
                Ok(AttrItem::Readonly(input.parse::<Ident>()?.span()))
            }
            Some((name, _, _, _, true)) if name == BASES_ATTR => {
                let span = input.parse::<Ident>()?.span();
                let types = parse_bases(input)?;
                Ok(AttrItem::Meta(AttrMeta::Bases { types, span }))
            }
            Some((name, ends, paren, eq, _)) if name == PROPERTY_ATTR && (ends || paren || eq) => {
                let span = input.parse::<Ident>()?.span();
                let friendly_name = if paren {
                    let content;
                    parenthesized!(content in input);
                    if content.is_empty() { None } else { Some(content.parse::<LitStr>()?) }
                } else if eq {
                    input.parse::<Token![=]>()?;
                    Some(input.parse::<LitStr>()?)
                } else {
                    None
                };
                Ok(AttrItem::Meta(AttrMeta::Property { friendly_name, span }))
            }
            Some((name, _, paren, eq, _)) if name == DEBUG_ATTR && (paren || eq) => {
                let span = input.parse::<Ident>()?.span();
                let printer = if paren {
                    let content;
                    parenthesized!(content in input);
                    content.parse::<Expr>()?
                } else {
                    input.parse::<Token![=]>()?;
                    input.parse::<Expr>()?
                };
                Ok(AttrItem::Meta(AttrMeta::Debug { printer, span }))
            }
            _ => Ok(AttrItem::Meta(AttrMeta::Custom(input.parse::<Expr>()?))),
        }
    }
}

/// Everything declared about one reflected declaration.
#[derive(Default, Clone)]
pub(crate) struct DeclAttrs {
    pub skip: bool,
    pub readonly: bool,
    pub traits: ReflectTraits,
    pub attributes: Vec<AttrMeta>,
}

/// `Display`, `Clone` or `Clone(path)` written without `impl`, as in `#[reflect(Display, Clone)]`.
fn as_trait_registration(expr: &Expr) -> Option<(Ident, TraitImplStatus)> {
    match expr {
        Expr::Path(path) => {
            let ident = path.path.get_ident()?;
            is_reflected_trait(ident).then(|| (ident.clone(), TraitImplStatus::Implemented(ident.span())))
        }
        Expr::Call(call) if call.args.len() == 1 => {
            let Expr::Path(func) = &*call.func else {
                return None;
            };
            let ident = func.path.get_ident()?;
            let Some(Expr::Path(custom)) = call.args.first() else {
                return None;
            };
            is_reflected_trait(ident).then(|| (ident.clone(), TraitImplStatus::CustomImpl(custom.path.clone(), ident.span())))
        }
        _ => None,
    }
}

fn combine_error(errors: &mut Option<syn::Error>, error: syn::Error) {
    match errors {
        Some(errors) => errors.combine(error),
        None => *errors = Some(error),
    }
}

impl DeclAttrs {
    /// Sorts the items of an attribute list, rejecting the ones `site` cannot carry.
    pub fn from_items<I: IntoIterator<Item = AttrItem>>(items: I, site: Site) -> anyhow::Result<Self, syn::Error> {
        let mut res = DeclAttrs::default();
        let mut errors: Option<syn::Error> = None;

        for item in items {
            let parse_res = res.push(item, site);
            if let Err(error) = parse_res {
                // combine all errors of one declaration
                combine_error(&mut errors, error);
            }
        }

        match errors {
            Some(errors) => Err(errors),
            None => Ok(res),
        }
    }

    fn push(&mut self, item: AttrItem, site: Site) -> anyhow::Result<(), syn::Error> {
        let item = match item {
            AttrItem::Meta(AttrMeta::Custom(expr)) if site == Site::Type => match as_trait_registration(&expr) {
                Some((ident, status)) => AttrItem::Trait { ident, status },
                None => AttrItem::Meta(AttrMeta::Custom(expr)),
            },
            item => item,
        };

        let not_allowed = |span: Span, name: &str| {
            syn::Error::new(span, format!("`{name}` cannot decorate {}", site.describe()))
        };

        match item {
            AttrItem::Skip(span) if site != Site::DeriveField => Err(not_allowed(span, SKIP_ATTR)),
            AttrItem::Skip(span) if self.skip => Err(syn::Error::new(span, format!("Duplicated `{SKIP_ATTR}`"))),
            AttrItem::Skip(_) => {
                self.skip = true;
                Ok(())
            }
            AttrItem::Readonly(span) if !matches!(site, Site::Field | Site::DeriveField) => {
                Err(not_allowed(span, READONLY_ATTR))
            }
            AttrItem::Readonly(span) if self.readonly => {
                Err(syn::Error::new(span, format!("Duplicated `{READONLY_ATTR}`")))
            }
            AttrItem::Readonly(_) => {
                self.readonly = true;
                Ok(())
            }
            AttrItem::Trait { ident, .. } if site != Site::Type => Err(not_allowed(ident.span(), "impl")),
            AttrItem::Trait { ident, status } => self.traits.register(&ident, status),
            AttrItem::Meta(meta) => {
                match (&meta, site) {
                    (AttrMeta::Bases { span, .. }, Site::Field | Site::DeriveField | Site::Function) => {
                        return Err(not_allowed(*span, BASES_ATTR));
                    }
                    (AttrMeta::Property { span, .. }, Site::Type) => {
                        return Err(not_allowed(*span, PROPERTY_ATTR));
                    }
                    _ => {}
                }

                if let Some(family) = meta.family() {
                    if self.attributes.iter().any(|attr| attr.family() == Some(family)) {
                        return Err(syn::Error::new(meta.span(), format!("Duplicated `{family}` attribute")));
                    }
                }

                if let AttrMeta::Custom(expr) = &meta {
                    let tokens = expr.to_token_stream().to_string();
                    let repeated = self.attributes.iter().any(|attr| match attr {
                        AttrMeta::Custom(other) => other.to_token_stream().to_string() == tokens,
                        _ => false,
                    });
                    if repeated {
                        return Err(syn::Error::new(meta.span(), format!("Duplicated attribute `{tokens}`")));
                    }
                }

                self.attributes.push(meta);
                Ok(())
            }
        }
    }
}

/// Parses a comma separated list of attribute items.
pub(crate) fn parse_attr_items(input: ParseStream) -> syn::Result<Vec<AttrItem>> {
    let items = Punctuated::<AttrItem, Token![,]>::parse_terminated(input)?;
    Ok(items.into_iter().collect())
}

/// Collects the `#[reflect(..)]` attributes of a derive input or one of its fields.
pub(crate) fn parse_reflect_attributes(attrs: &[Attribute], site: Site) -> anyhow::Result<DeclAttrs, syn::Error> {
    let mut items = Vec::new();
    let mut errors: Option<syn::Error> = None;

    // we only care about the `reflect` attributes.
    let attr_iter = attrs.iter()
        .filter(|attr| attr.path.is_ident(REFLECT_ATTR));

    for attr in attr_iter {
        match attr.parse_args_with(parse_attr_items) {
            Ok(parsed) => items.extend(parsed),
            Err(error) => combine_error(&mut errors, error),
        }
    }

    if let Some(errors) = errors {
        return Err(errors);
    }

    DeclAttrs::from_items(items, site)
}
