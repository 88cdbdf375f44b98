use mirror_reflect::{
    runtime::{Proxy, ProxyHandler},
    ArgList, MemberDescriptor, Receiver, Reflect, ReflectError,
};

use super::{player, Player};

/// Logs every access before forwarding it to the wrapped player.
struct Tracer {
    player: Player,
    accesses: usize,
}

impl ProxyHandler for Tracer {
    type Target = Player;
    type Output = Result<Box<dyn Reflect>, ReflectError>;

    fn invoke_impl(&mut self, member: &'static MemberDescriptor, args: ArgList) -> Self::Output {
        self.accesses += 1;
        debug!("access #{} to `{}` with {:?}", self.accesses, member.name(), args);
        member.invoke(Receiver::Mut(&mut self.player), args)
    }
}

pub fn run() -> anyhow::Result<()> {
    let names = Proxy::<Tracer>::members().map(MemberDescriptor::name);
    info!("proxy members: {:?}", names);

    let mut proxy = Proxy::new(Tracer {
        player: player(),
        accesses: 0,
    });

    let health = proxy.call("damage", (10u32,))??;
    info!("through the proxy: {:?}", health);

    let alive = proxy.call("is_alive", ())??;
    info!("alive: {:?}", alive);

    if let Some(token) = Proxy::<Tracer>::token("health") {
        for _ in 0..2 {
            let health = proxy.call_token(token, ())?;
            info!("health read through token #{}: {:?}", token.index(), health);
        }
    }

    info!("{} accesses traced", proxy.handler().accesses);
    Ok(())
}
