use mirror_reflect::{runtime, Reflect};

use super::player;

pub fn run() {
    let player = player();

    info!("compact: {}", runtime::debug_str(&player, true));
    info!("detailed:\n{:#?}", &player as &dyn Reflect);

    let transform = player.entity.transform.clone();
    match transform.clone_value() {
        Some(copy) => info!("cloned through reflection: {:?}", copy),
        None => warn!("`{}` cannot be cloned", transform.type_name()),
    }

    info!("several values: {}", runtime::debug_all_str(&[&player.health, &player.entity.name, &transform.scale]));
}
