//! # lightgroupd — light group command runner
//!
//! Usage:
//! - `lightgroupd` prints every group's state and every light's state;
//! - `lightgroupd <group> <turn_on|turn_off> [json-attributes]` runs one
//!   command and prints what it did.

use lightgroup_adapter_virtual::VirtualLights;
use lightgroup_domain::attributes::Attributes;
use lightgroup_domain::context::Context;
use lightgroup_domain::service::Service;
use lightgroupd::config::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const USAGE: &str = "usage: lightgroupd [<group> <turn_on|turn_off> [json-attributes]]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (lights, registry) = lightgroupd::build(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            for (name, state) in registry.states().await {
                println!("{name}: {state}");
            }
        }
        [group, service] => {
            let service: Service = service.parse()?;
            let outcome = registry
                .call(group, service, &Attributes::new(), &Context::new())
                .await?;
            println!("{outcome}");
        }
        [group, service, raw] => {
            let service: Service = service.parse()?;
            let attributes: Attributes = serde_json::from_str(raw)?;
            let outcome = registry
                .call(group, service, &attributes, &Context::new())
                .await?;
            println!("{outcome}");
        }
        _ => return Err(USAGE.into()),
    }

    print_lights(&lights);
    Ok(())
}

fn print_lights(lights: &VirtualLights) {
    for light in lights.iter() {
        let attributes = light.attributes();
        if attributes.is_empty() {
            println!("  {}: {}", light.entity_id(), light.state());
        } else {
            println!("  {}: {} {attributes}", light.entity_id(), light.state());
        }
    }
}
