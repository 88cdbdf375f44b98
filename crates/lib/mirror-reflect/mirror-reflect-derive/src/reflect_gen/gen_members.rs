use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Path, Type, TypeReference};

use crate::{
    quoted::{QuotedBox, QuotedClone, QuotedResult},
    reflect_meta::{FieldAccess, FieldMeta, FuncMeta, MemberMeta, PassBy, ReceiverMeta},
};

use super::{gen_attributes, UsageSite};

fn is_static_reference(reference: &TypeReference) -> bool {
    reference.lifetime.as_ref().map_or(false, |lifetime| lifetime.ident == "static")
}

/// Type of the reflected return value, and how the returned value becomes it.
///
/// Borrowed returns are cloned, they cannot outlive the call.
fn return_value(ret: Option<&Type>) -> (TokenStream, ReturnBy) {
    match ret {
        None => (quote!(()), ReturnBy::Unit),
        Some(Type::Reference(reference)) if !is_static_reference(reference) => {
            let elem = &reference.elem;
            (quote!(#elem), ReturnBy::Clone)
        }
        Some(ty) => (quote!(#ty), ReturnBy::Value),
    }
}

enum ReturnBy {
    Unit,
    Value,
    Clone,
}

fn gen_field(reflect_crate_path: &Path, field: &FieldMeta) -> TokenStream {
    let name = &field.name;
    let value_ty = field.ty.as_ref()
        .map(|ty| quote!(#ty))
        .unwrap_or_else(|| quote!(_));
    let attributes = gen_attributes(reflect_crate_path, &field.attrs.attributes, UsageSite::Field, &value_ty);

    let descriptor = match &field.access {
        FieldAccess::Instance(member) if field.attrs.readonly => quote! {
            #reflect_crate_path::FieldDescriptor::new_readonly::<Self, #value_ty>(
                #name,
                |target| &target.#member,
                #attributes,
            )
        },
        FieldAccess::Instance(member) => quote! {
            #reflect_crate_path::FieldDescriptor::new::<Self, #value_ty>(
                #name,
                |target| &target.#member,
                |target| &mut target.#member,
                #attributes,
            )
        },
        FieldAccess::Static(ident) => quote! {
            #reflect_crate_path::FieldDescriptor::new_static::<Self, #value_ty>(
                #name,
                || &Self::#ident,
                #attributes,
            )
        },
    };

    quote!(#reflect_crate_path::MemberDescriptor::Field(#descriptor))
}

fn gen_candidate(reflect_crate_path: &Path, func: &FuncMeta) -> TokenStream {
    let (receiver_kind, receiver_pat, this) = match func.receiver {
        ReceiverMeta::Ref => (
            quote!(Ref),
            quote!(receiver),
            Some(quote!(let this = receiver.downcast_ref::<Self>()?;)),
        ),
        ReceiverMeta::Mut => (
            quote!(Mut),
            quote!(receiver),
            Some(quote!(let this = receiver.downcast_mut::<Self>()?;)),
        ),
        ReceiverMeta::Static => (quote!(Static), quote!(_receiver), None),
    };

    let args_pat = if func.params.is_empty() {
        quote!(_args)
    } else {
        quote!(mut args)
    };

    let arg_idents = (0..func.params.len())
        .map(|index| format_ident!("arg{}", index))
        .collect::<Vec<_>>();

    let param_infos = func.params.iter()
        .map(|param| {
            let (ty, name) = (&param.ty, &param.name);
            quote!(#reflect_crate_path::ParamInfo::of::<#ty>(#name))
        });

    let takes = func.params.iter().zip(&arg_idents)
        .map(|(param, arg)| {
            let ty = &param.ty;
            let mutability = (param.pass_by == PassBy::Mut).then(|| quote!(mut));
            quote!(let #mutability #arg = args.take::<#ty>()?;)
        });

    let passed = func.params.iter().zip(&arg_idents)
        .map(|(param, arg)| match param.pass_by {
            PassBy::Value => quote!(#arg),
            PassBy::Ref => quote!(&#arg),
            PassBy::Mut => quote!(&mut #arg),
        });
    let call_args = this.as_ref()
        .map(|_| quote!(this))
        .into_iter()
        .chain(passed);

    let callee = match &func.callee {
        Some(callee) => quote!((#callee)),
        None => {
            let name = &func.name;
            quote!(Self::#name)
        }
    };
    let call = quote!(#callee(#(#call_args),*));

    let (ret_ty, return_by) = return_value(func.ret.as_ref());
    let value = match return_by {
        ReturnBy::Unit => quote!({
            #call;
            #QuotedBox::new(())
        }),
        ReturnBy::Value => quote!(#QuotedBox::new(#call)),
        ReturnBy::Clone => quote!(#QuotedBox::new(#QuotedClone::clone(#call))),
    };

    quote! {
        #reflect_crate_path::FunctionCandidate::new(
            #reflect_crate_path::ReceiverKind::#receiver_kind,
            ::std::vec![#(#param_infos),*],
            #reflect_crate_path::ReturnInfo::of::<#ret_ty>(),
            |#receiver_pat, #args_pat| {
                #this
                #(#takes)*
                let value: #QuotedBox<dyn #reflect_crate_path::Reflect> = #value;
                #QuotedResult::Ok(value)
            },
        )
    }
}

/// One reflected function made of all the overloads sharing its name.
fn gen_function(reflect_crate_path: &Path, overloads: &[&FuncMeta]) -> TokenStream {
    let Some(first) = overloads.first() else {
        return TokenStream::new();
    };
    let name = first.name.to_string();

    // at most one overload carries the attributes of the function
    let decorated = overloads.iter()
        .find(|func| !func.attrs.attributes.is_empty())
        .unwrap_or(first);
    let (value_ty, _) = return_value(decorated.ret.as_ref());
    let attributes = gen_attributes(reflect_crate_path, &decorated.attrs.attributes, UsageSite::Function, &value_ty);

    let candidates = overloads.iter().map(|func| gen_candidate(reflect_crate_path, func));

    quote! {
        #reflect_crate_path::MemberDescriptor::Function(
            #reflect_crate_path::FunctionDescriptor::new::<Self>(
                #name,
                ::std::vec![#(#candidates),*],
                #attributes,
            )
        )
    }
}

/// Generates the member descriptors, in declaration order.
///
/// Overloads are gathered at the position of the first one.
pub(crate) fn gen_members(reflect_crate_path: &Path, members: &[MemberMeta]) -> Vec<TokenStream> {
    let mut emitted: Vec<String> = Vec::new();

    members.iter()
        .filter_map(|member| match member {
            MemberMeta::Field(field) => Some(gen_field(reflect_crate_path, field)),
            MemberMeta::Function(func) => {
                let name = func.name.to_string();
                if emitted.contains(&name) {
                    return None;
                }

                let overloads = members.iter()
                    .filter_map(|other| match other {
                        MemberMeta::Function(other) if other.name == func.name => Some(other),
                        _ => None,
                    })
                    .collect::<Vec<_>>();

                emitted.push(name);
                Some(gen_function(reflect_crate_path, &overloads))
            }
        })
        .collect()
}
