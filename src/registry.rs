//! Registration table of resource and data source types
//!
//! Built once at start-up from the static kind descriptors. Lookups take
//! the full type name (`cloudtamerio_ou`) or the bare kind name (`ou`).

use crate::data_source::{DataSource, ListDataSource};
use crate::resource::kind::TYPE_PREFIX;
use crate::resource::{KINDS, ManagedResource, Resource};

pub struct Registry {
    resources: Vec<Box<dyn Resource>>,
    data_sources: Vec<Box<dyn DataSource>>,
}

fn full_name(name: &str) -> String {
    if name.starts_with(TYPE_PREFIX) {
        name.to_string()
    } else {
        format!("{TYPE_PREFIX}{name}")
    }
}

impl Registry {
    /// Every type this provider ships
    pub fn builtin() -> Self {
        let resources = KINDS
            .iter()
            .copied()
            .map(|kind| Box::new(ManagedResource::new(kind)) as Box<dyn Resource>)
            .collect();
        let data_sources = KINDS
            .iter()
            .copied()
            .filter(|kind| kind.data_source)
            .map(|kind| Box::new(ListDataSource::new(kind)) as Box<dyn DataSource>)
            .collect();

        Self {
            resources,
            data_sources,
        }
    }

    pub fn resource(&self, name: &str) -> Option<&dyn Resource> {
        let name = full_name(name);
        self.resources
            .iter()
            .find(|r| r.name() == name)
            .map(AsRef::as_ref)
    }

    pub fn data_source(&self, name: &str) -> Option<&dyn DataSource> {
        let name = full_name(name);
        self.data_sources
            .iter()
            .find(|d| d.name() == name)
            .map(AsRef::as_ref)
    }

    pub fn resources(&self) -> impl Iterator<Item = &dyn Resource> {
        self.resources.iter().map(AsRef::as_ref)
    }

    pub fn data_sources(&self) -> impl Iterator<Item = &dyn DataSource> {
        self.data_sources.iter().map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_counts() {
        let registry = Registry::builtin();
        assert_eq!(registry.resources().count(), 14);
        assert_eq!(registry.data_sources().count(), 12);
    }

    #[test]
    fn test_lookup_with_or_without_prefix() {
        let registry = Registry::builtin();
        assert_eq!(registry.resource("ou").unwrap().name(), "cloudtamerio_ou");
        assert!(registry.resource("cloudtamerio_cloud_rule").is_some());
        assert!(registry.data_source("aws_iam_policy").is_some());
        assert!(registry.data_source("saml_group_association").is_some());
    }

    #[test]
    fn test_unknown_names() {
        let registry = Registry::builtin();
        assert!(registry.resource("cloudtamerio_nope").is_none());
        assert!(registry.data_source("project_cloud_access_role").is_none());
        assert!(registry.resource("project_cloud_access_role").is_some());
        assert!(registry.data_source("project").is_none());
        assert!(registry.resource("project").is_some());
    }
}
