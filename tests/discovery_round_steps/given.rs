//! Given steps for discovery round BDD scenarios.

use super::world::{DiscoveryWorld, probe_prefix};
use eyre::WrapErr;
use portolan::{
    discovery::domain::{ContainerSummary, ExposedPort},
    service::domain::ContainerId,
    sniffing::{domain::HandshakeInfo, ports::JsonResponse},
};
use rstest_bdd_macros::given;
use serde_json::json;

fn add_container(
    world: &mut DiscoveryWorld,
    container: ContainerSummary,
) -> Result<(), eyre::Report> {
    world.containers.push(container);
    world
        .inventory
        .set_containers(world.containers.clone())
        .wrap_err("update inventory")
}

#[given(r#"a container "{id}" named "{name}" publishing port {port:u16}"#)]
fn a_published_container(
    world: &mut DiscoveryWorld,
    id: String,
    name: String,
    port: u16,
) -> Result<(), eyre::Report> {
    let container_id = ContainerId::new(id).wrap_err("container id")?;
    let container = ContainerSummary::new(container_id, "agents/scenario:latest")
        .with_names([name])
        .with_ports([ExposedPort::tcp(port).published_on(port)]);
    add_container(world, container)
}

#[given(r#"a container "{id}" without exposed ports"#)]
fn a_portless_container(world: &mut DiscoveryWorld, id: String) -> Result<(), eyre::Report> {
    let container_id = ContainerId::new(id).wrap_err("container id")?;
    let container = ContainerSummary::new(container_id, "agents/worker:latest");
    add_container(world, container)
}

#[given("port {port:u16} serves a complete ACP OpenAPI document")]
fn port_serves_acp(world: &mut DiscoveryWorld, port: u16) -> Result<(), eyre::Report> {
    let document = json!({
        "openapi": "3.1.0",
        "info": { "title": "Scenario Agent", "version": "0.1.0" },
        "paths": {
            "/agents/search": {},
            "/agents/{agent_id}/descriptor": {},
            "/agents/{agent_id}/openapi": {},
            "/runs/wait": {},
        },
    });
    world
        .transport
        .serve_json(
            format!("{}openapi.json", probe_prefix(port)),
            JsonResponse::new(200, document),
        )
        .wrap_err("script OpenAPI document")
}

#[given(r#"port {port:u16} completes an MCP handshake as "{server}""#)]
fn port_completes_handshake(
    world: &mut DiscoveryWorld,
    port: u16,
    server: String,
) -> Result<(), eyre::Report> {
    let info = HandshakeInfo {
        server_name: server,
        server_version: "1.2.3".to_owned(),
        protocol_version: "2024-11-05".to_owned(),
    };
    world
        .transport
        .serve_handshake(format!("{}sse", probe_prefix(port)), info)
        .wrap_err("script handshake")
}

#[given(r#"the registry rejects container "{id}""#)]
fn registry_rejects(world: &mut DiscoveryWorld, id: String) -> Result<(), eyre::Report> {
    let container_id = ContainerId::new(id).wrap_err("container id")?;
    world
        .registry
        .reject(container_id)
        .wrap_err("inject registry failure")
}

#[given("the container inventory is unavailable")]
fn inventory_unavailable(world: &mut DiscoveryWorld) -> Result<(), eyre::Report> {
    world
        .inventory
        .set_unavailable(Some("docker daemon unreachable"))
        .wrap_err("inject inventory failure")
}
