//! Resource lifecycle commands: create, read, update, delete, plan

use anyhow::{Context as _, Result, bail};
use serde_json::{Value, json};

use super::{connect, print_json, read_state};
use crate::Context;
use crate::cli::{StateArgs, UpdateArgs};
use crate::registry::Registry;
use crate::resource::Resource;
use crate::state::ResourceState;
use crate::ui;

fn lookup<'a>(registry: &'a Registry, name: &str) -> Result<&'a dyn Resource> {
    registry
        .resource(name)
        .with_context(|| format!("Unknown resource type: {name}"))
}

fn read_pair(args: &UpdateArgs) -> Result<(ResourceState, ResourceState)> {
    if args.prior == args.desired {
        bail!("--prior and --desired must be different documents");
    }
    Ok((read_state(&args.prior)?, read_state(&args.desired)?))
}

pub fn create(ctx: &Context, args: &StateArgs) -> Result<()> {
    let registry = Registry::builtin();
    let resource = lookup(&registry, &args.resource)?;
    let desired = read_state(&args.state)?;

    let client = connect(ctx)?;
    let created = resource.create(&client, &desired)?;

    if !ctx.quiet {
        let id = created.id.as_deref().unwrap_or_default();
        ui::success(&format!("Created {} {id}", resource.name()));
    }
    print_json(&created.to_value())
}

pub fn read(ctx: &Context, args: &StateArgs) -> Result<()> {
    let registry = Registry::builtin();
    let resource = lookup(&registry, &args.resource)?;
    let prior = read_state(&args.state)?;

    let client = connect(ctx)?;
    match resource.read(&client, &prior)? {
        Some(state) => print_json(&state.to_value()),
        None => {
            if !ctx.quiet {
                ui::warn(&format!(
                    "{} {} no longer exists; drop it from state",
                    resource.name(),
                    prior.id.as_deref().unwrap_or_default()
                ));
            }
            print_json(&Value::Null)
        }
    }
}

pub fn update(ctx: &Context, args: &UpdateArgs) -> Result<()> {
    let registry = Registry::builtin();
    let resource = lookup(&registry, &args.resource)?;
    let (prior, desired) = read_pair(args)?;

    let client = connect(ctx)?;
    let updated = resource.update(&client, &prior, &desired)?;

    if !ctx.quiet {
        ui::success(&format!(
            "Updated {} {}",
            resource.name(),
            updated.id.as_deref().unwrap_or_default()
        ));
    }
    print_json(&updated.to_value())
}

pub fn delete(ctx: &Context, args: &StateArgs) -> Result<()> {
    let registry = Registry::builtin();
    let resource = lookup(&registry, &args.resource)?;
    let state = read_state(&args.state)?;

    let client = connect(ctx)?;
    resource.delete(&client, &state)?;

    if !ctx.quiet {
        ui::success(&format!(
            "Deleted {} {}",
            resource.name(),
            state.id.as_deref().unwrap_or_default()
        ));
    }
    Ok(())
}

/// Print the changes and calls an update would make; needs no server
pub fn plan(ctx: &Context, args: &UpdateArgs) -> Result<()> {
    let registry = Registry::builtin();
    let resource = lookup(&registry, &args.resource)?;
    let (prior, desired) = read_pair(args)?;

    let (changes, plan) = resource.plan_update(&prior, &desired)?;

    if !ctx.quiet {
        ui::header(&format!("{} {}", resource.name(), prior.record_id()?));
        eprint!("{changes}");
        if !plan.is_empty() {
            ui::section("Calls");
            for call in &plan.calls {
                ui::kv(call.method().as_str(), &call.path);
            }
        }
    }

    let calls: Vec<Value> = plan
        .calls
        .iter()
        .map(|call| json!({ "method": call.method().as_str(), "path": call.path, "body": call.body }))
        .collect();
    print_json(&Value::Array(calls))
}
