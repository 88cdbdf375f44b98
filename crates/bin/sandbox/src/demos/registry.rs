use mirror_reflect::{property, TypeRegistry};

use super::Player;

pub fn run() {
    let mut registry = TypeRegistry::new();
    registry.register::<Player>();

    let Some(descriptor) = registry.get_with_short_name("Player") else {
        warn!("`Player` is not registered");
        return;
    };

    info!("{} types registered", registry.len());
    for base in descriptor.base_types() {
        info!("`{}` derives from `{}`", descriptor.name(), base.name());
    }

    for member in descriptor.member_types() {
        info!(
            "{:<10} readable: {:<5} writable: {:<5} declared by `{}`",
            property::get_display_name(member),
            property::is_readable(member),
            property::is_writable(member),
            member.declaring_type().name(),
        );
    }
}
