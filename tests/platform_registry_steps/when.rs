//! When steps for platform registry BDD scenarios.

use super::world::{RegistryWorld, run_async};
use opentask::platform::domain::{PlatformConfig, RequestContext};
use rstest_bdd_macros::when;

#[when("the client is created from the entry")]
fn create_from_entry(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    let entry = world
        .entry
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no platform entry in scenario world"))?;
    let outcome = world.registry.create_from_entry(entry);
    world.record_creation(outcome);
    Ok(())
}

#[when(r#"a client is requested for platform type "{platform}""#)]
fn request_client(world: &mut RegistryWorld, platform: String) {
    let outcome = world.registry.create(&platform, &PlatformConfig::new());
    world.record_creation(outcome);
}

#[when(r#"task "{id}" is fetched"#)]
fn fetch_task(world: &mut RegistryWorld, id: String) -> Result<(), eyre::Report> {
    let client = world
        .client
        .clone()
        .ok_or_else(|| eyre::eyre!("no client in scenario world"))?;
    let ctx = RequestContext::new();
    world.fetched = Some(run_async(client.get_task(&ctx, &id)));
    Ok(())
}
