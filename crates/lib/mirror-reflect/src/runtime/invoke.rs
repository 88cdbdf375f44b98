use std::any::TypeId;

use crate::{args::IntoArgs, Receiver, Reflect, ReflectError};

/// Invokes the member called `name` on `target`, which may be mutated.
///
/// Only the members which accept the provided arguments and yield a `U` are
/// candidates, the first of them named `name` is invoked: functions are called,
/// fields are read (no argument) or assigned (one argument).
///
/// # Errors
/// [`ReflectError::NoMatchingMember`] when no candidate is named `name`.
pub fn invoke<U: Reflect>(target: &mut dyn Reflect, name: &str, args: impl IntoArgs) -> Result<U, ReflectError> {
    invoke_with(Receiver::Mut(target), name, args)
}

/// [`invoke`] through a shared reference, so setters and assignments are not candidates.
pub fn invoke_ref<U: Reflect>(target: &dyn Reflect, name: &str, args: impl IntoArgs) -> Result<U, ReflectError> {
    invoke_with(Receiver::Ref(target), name, args)
}

fn invoke_with<U: Reflect>(receiver: Receiver<'_>, name: &str, args: impl IntoArgs) -> Result<U, ReflectError> {
    let Some(target) = receiver.as_reflect() else {
        return Err(ReflectError::MissingReceiver(name.to_string()));
    };
    let descriptor = target.get_type_descriptor();

    let args = args.into_args();
    let arg_types = args.type_ids();
    let receiver_kind = receiver.kind();

    let member = descriptor
        .member_types()
        .find_first(|member| {
            member.is_invocable_r(receiver_kind, &arg_types, TypeId::of::<U>()) && member.name() == name
        });

    match member {
        Some(member) => member.invoke(receiver, args)?.take_as::<U>(),
        None => {
            glog::debug!(
                "no member `{}` of `{}` accepts ({}) and returns `{}`",
                name,
                descriptor.name(),
                args.type_names().join(", "),
                std::any::type_name::<U>()
            );
            Err(ReflectError::NoMatchingMember {
                type_name: descriptor.name().to_string(),
                member: name.to_string(),
            })
        }
    }
}
