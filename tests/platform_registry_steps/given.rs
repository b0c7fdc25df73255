//! Given steps for platform registry BDD scenarios.

use super::world::RegistryWorld;
use opentask::platform::domain::PlatformEntry;
use opentask::platform::services::PlatformRegistry;
use rstest_bdd_macros::given;
use serde_json::json;
use std::sync::Arc;

#[given("a registry with the built-in platforms")]
fn registry_with_builtins(world: &mut RegistryWorld) {
    world.registry = PlatformRegistry::with_builtin_factories(Arc::new(world.transport.clone()));
}

#[given(r#"a "{platform}" entry with base URL "{url}", email "{email}" and token "{token}""#)]
fn entry_with_site(
    world: &mut RegistryWorld,
    platform: String,
    url: String,
    email: String,
    token: String,
) {
    world.entry = Some(
        PlatformEntry::new(platform)
            .with_credential("email", email)
            .with_credential("token", token)
            .with_setting("base_url", url),
    );
}

#[given(r#"a "{platform}" entry with token "{token}""#)]
fn entry_with_token(world: &mut RegistryWorld, platform: String, token: String) {
    world.entry = Some(PlatformEntry::new(platform).with_credential("token", token));
}

#[given(r#"a "{platform}" entry without credentials"#)]
fn entry_without_credentials(world: &mut RegistryWorld, platform: String) {
    world.entry = Some(PlatformEntry::new(platform));
}

#[given(r#"Linear answers with issue "{identifier}" in state "{state}""#)]
fn linear_answers_with_issue(world: &mut RegistryWorld, identifier: String, state: String) {
    world.transport.push_json(
        200,
        &json!({ "data": { "issue": {
            "id": "issue-uuid",
            "identifier": identifier,
            "title": "Scripted issue",
            "priority": 3,
            "state": { "id": "state-1", "name": state, "type": state },
            "team": { "id": "team-1", "key": "ENG" },
            "labels": { "nodes": [] }
        } } }),
    );
}

#[given("Linear answers that the issue does not exist")]
fn linear_answers_missing(world: &mut RegistryWorld) {
    world
        .transport
        .push_json(200, &json!({ "data": { "issue": null } }));
}
