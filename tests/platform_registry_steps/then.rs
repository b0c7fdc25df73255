//! Then steps for platform registry BDD scenarios.

use super::world::RegistryWorld;
use rstest_bdd_macros::then;

#[then(r#"the client reports platform type "{platform}""#)]
fn client_platform_type(world: &RegistryWorld, platform: String) -> Result<(), eyre::Report> {
    let client = world
        .client
        .as_ref()
        .ok_or_else(|| eyre::eyre!("client was not created: {:?}", world.creation_error))?;
    let info = client.platform_info();
    if info.platform_type != platform {
        return Err(eyre::eyre!(
            "expected platform type {platform}, got {}",
            info.platform_type
        ));
    }
    Ok(())
}

#[then(r#"the client reports base URL "{url}""#)]
fn client_base_url(world: &RegistryWorld, url: String) -> Result<(), eyre::Report> {
    let client = world
        .client
        .as_ref()
        .ok_or_else(|| eyre::eyre!("client was not created"))?;
    let info = client.platform_info();
    if info.base_url != url {
        return Err(eyre::eyre!("expected base URL {url}, got {}", info.base_url));
    }
    Ok(())
}

#[then(r#"creation fails with code "{code}""#)]
fn creation_fails(world: &RegistryWorld, code: String) -> Result<(), eyre::Report> {
    let err = world
        .creation_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected creation to fail"))?;
    if err.code().as_str() != code {
        return Err(eyre::eyre!("expected code {code}, got {err}"));
    }
    Ok(())
}

#[then(r#"the fetched task has status "{status}""#)]
fn fetched_status(world: &RegistryWorld, status: String) -> Result<(), eyre::Report> {
    let task = match world.fetched.as_ref() {
        Some(Ok(task)) => task,
        Some(Err(err)) => return Err(eyre::eyre!("fetch failed: {err}")),
        None => return Err(eyre::eyre!("no task was fetched")),
    };
    if task.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected status {status}, got {}",
            task.status()
        ));
    }
    Ok(())
}

#[then(r#"the fetch fails with code "{code}""#)]
fn fetch_fails(world: &RegistryWorld, code: String) -> Result<(), eyre::Report> {
    let outcome = world
        .fetched
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no fetch was attempted"))?;
    match outcome {
        Err(err) if err.code().as_str() == code => Ok(()),
        Err(err) => Err(eyre::eyre!("expected code {code}, got {err}")),
        Ok(task) => Err(eyre::eyre!("expected failure, fetched {}", task.id())),
    }
}

#[then("{count:usize} requests were sent")]
fn requests_sent(world: &RegistryWorld, count: usize) -> Result<(), eyre::Report> {
    let sent = world.transport.request_count();
    if sent != count {
        return Err(eyre::eyre!("expected {count} requests, found {sent}"));
    }
    Ok(())
}
