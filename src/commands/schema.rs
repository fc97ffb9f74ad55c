use anyhow::{Context as _, Result};
use serde_json::{Map, Value, json};

use crate::registry::Registry;

/// Print one schema, or every schema when no name is given
pub fn run(name: Option<&str>, data_source: bool) -> Result<()> {
    let registry = Registry::builtin();
    super::print_json(&describe(&registry, name, data_source)?)
}

fn describe(registry: &Registry, name: Option<&str>, data_source: bool) -> Result<Value> {
    let Some(name) = name else {
        let mut resources = Map::new();
        for resource in registry.resources() {
            resources.insert(resource.name(), serde_json::to_value(resource.schema())?);
        }
        let mut data_sources = Map::new();
        for source in registry.data_sources() {
            data_sources.insert(source.name(), serde_json::to_value(source.schema())?);
        }
        return Ok(json!({ "resources": resources, "data_sources": data_sources }));
    };

    let (name, schema) = if data_source {
        let source = registry
            .data_source(name)
            .with_context(|| format!("Unknown data source: {name}"))?;
        (source.name(), source.schema())
    } else {
        let resource = registry
            .resource(name)
            .with_context(|| format!("Unknown resource type: {name}"))?;
        (resource.name(), resource.schema())
    };

    Ok(json!({ "name": name, "schema": schema }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_everything() {
        let value = describe(&Registry::builtin(), None, false).unwrap();
        assert_eq!(value["resources"].as_object().unwrap().len(), 14);
        assert_eq!(value["data_sources"].as_object().unwrap().len(), 12);
        assert!(value["resources"]["cloudtamerio_ou"]["attributes"].is_array());
    }

    #[test]
    fn test_describe_one() {
        let registry = Registry::builtin();

        let value = describe(&registry, Some("ou"), false).unwrap();
        assert_eq!(value["name"], json!("cloudtamerio_ou"));

        let value = describe(&registry, Some("ou"), true).unwrap();
        assert_eq!(value["schema"]["attributes"][1]["name"], json!("filter"));

        assert!(describe(&registry, Some("project_cloud_access_role"), true).is_err());
        assert!(describe(&registry, Some("nope"), false).is_err());
    }
}
