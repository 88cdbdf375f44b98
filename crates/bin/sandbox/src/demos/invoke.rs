use mirror_reflect::{runtime, type_list, MemberDescriptor, ReceiverKind, Typed};

use super::{player, Player};

pub fn run() -> anyhow::Result<()> {
    let mut player = player();

    let health: u32 = runtime::invoke(&mut player, "damage", (30u32,))?;
    info!("damaged, {} health left", health);

    let health: u32 = runtime::invoke(&mut player, "heal", (50u32, 100u32))?;
    info!("healed up to {}", health);

    // inherited from `Entity`
    let () = runtime::invoke(&mut player, "set_name", (String::from("champion"),))?;
    let name: String = runtime::invoke_ref(&player, "get_name", ())?;
    info!("renamed to {}", name);

    if let Err(err) = runtime::invoke::<u32>(&mut player, "damage", (1i64,)) {
        warn!("{}", err);
    }

    let heal = Player::type_descriptor()
        .member("heal")
        .and_then(MemberDescriptor::as_function)
        .ok_or_else(|| anyhow::anyhow!("`heal` is not reflected"))?;
    if let Some(capped) = heal.resolve::<type_list![u32, u32], u32>(ReceiverKind::Mut) {
        info!("`heal` overload picked: {}", capped);
    }

    Ok(())
}
