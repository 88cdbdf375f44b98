use std::collections::HashMap;

use mirror_core::result::ResultFlattener;

use super::{FieldAccess, MemberMeta, SynError, TypeModel};

/// Member names are unique, except between the overloads of a function.
fn check_member<'a>(
    member: &'a MemberMeta,
    seen: &mut HashMap<String, &'a MemberMeta>,
    signatures: &mut Vec<String>,
) -> anyhow::Result<(), SynError> {
    let name = member.name();

    match (seen.get(&name), member) {
        (None, _) => {}
        (Some(MemberMeta::Function(_)), MemberMeta::Function(func)) => {
            let key = format!("{name}::{}", func.signature_key());
            if signatures.contains(&key) {
                return Err(syn::Error::new(member.span(), format!("Duplicated overload of `{name}`")).into());
            }
        }
        (Some(_), _) => {
            return Err(syn::Error::new(member.span(), format!("Duplicated member `{name}`")).into());
        }
    }

    if let MemberMeta::Function(func) = member {
        signatures.push(format!("{name}::{}", func.signature_key()));
    }
    seen.entry(name).or_insert(member);
    Ok(())
}

/// The attributes of an overloaded function are declared on one of its overloads only.
fn check_overload_attributes(member: &MemberMeta, decorated: &mut Vec<String>) -> anyhow::Result<(), SynError> {
    let MemberMeta::Function(func) = member else {
        return Ok(());
    };
    if func.attrs.attributes.is_empty() {
        return Ok(());
    }

    let name = func.name.to_string();
    if decorated.contains(&name) {
        return Err(syn::Error::new(
            func.name.span(),
            format!("Attributes of `{name}` are already declared on another overload"),
        ).into());
    }
    decorated.push(name);
    Ok(())
}

pub(crate) fn validate_model(model: &TypeModel) -> anyhow::Result<(), syn::Error> {
    let mut seen = HashMap::new();
    let mut signatures = Vec::new();
    let mut decorated = Vec::new();

    let checked: ResultFlattener<(), SynError> = model.members.iter()
        .map(|member| -> anyhow::Result<(), SynError> {
            check_member(member, &mut seen, &mut signatures)?;
            check_overload_attributes(member, &mut decorated)?;

            match member {
                MemberMeta::Field(field) if model.is_generic() && matches!(field.access, FieldAccess::Static(_)) => {
                    Err(syn::Error::new(field.span, "Static fields of generic types cannot be reflected").into())
                }
                _ => Ok(()),
            }
        })
        .collect();

    checked.finish()
        .map(|_| ())
        .map_err(SynError::into_inner)
}
