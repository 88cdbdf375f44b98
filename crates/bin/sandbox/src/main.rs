// use log macros.
#[macro_use]
extern crate log as _log;

mod demos;

fn main() -> anyhow::Result<()> {
    let vars = mirror_core::console::from_args()?;
    mirror_core::log::init_log(vars.log_config())?;

    demos::debug::run();
    demos::invoke::run()?;
    demos::proxy::run()?;
    demos::registry::run();

    info!("all demos done");
    Ok(())
}
