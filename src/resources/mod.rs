//! Cloud-agnostic resource definitions and the shared resolution context
//!
//! Resources are constructed once at config-parse time and never mutated by
//! validation or translation. Cross-resource references (subnets, sibling
//! node pools, resource groups, locations) are resolved through a
//! [`ResourceContext`] that the caller builds and injects explicitly - the
//! compiler never reaches into a global resource registry.

mod cluster;
mod node_pool;
mod types;

pub use cluster::{KubernetesCluster, ValidationError};
pub use node_pool::KubernetesNodePool;
pub use types::CloudProvider;

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Deterministic target-format identifier for a resource in a cloud
///
/// This is the naming collaborator: every generated block identifier,
/// intra-output reference, and output-value template derives from it.
pub fn tf_resource_id(resource_id: &str, cloud: CloudProvider) -> String {
    format!("{resource_id}_{cloud}")
}

/// Common parameters shared by all cloud-agnostic resources
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct CommonParams {
    /// Stable resource identifier, unique within a configuration
    pub resource_id: String,
    /// Reference to the owning resource group
    pub resource_group_id: String,
    /// Target cloud this resource is declared for
    pub cloud: CloudProvider,
}

impl CommonParams {
    /// Create common parameters for a resource
    pub fn new(
        resource_id: impl Into<String>,
        resource_group_id: impl Into<String>,
        cloud: CloudProvider,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            resource_group_id: resource_group_id.into(),
            cloud,
        }
    }

    /// Target-format identifier for this resource in the given cloud
    pub fn tf_resource_id(&self, cloud: CloudProvider) -> String {
        tf_resource_id(&self.resource_id, cloud)
    }
}

/// Read-only resolution context over the current configuration
///
/// Exposes the sibling resources a cluster translation needs: the node-pool
/// population (stable registration order, so default-pool selection is
/// deterministic) and the resolved output identifiers of already-translated
/// collaborators (subnets, resource groups, locations). Built once by the
/// caller; validation and translation only read from it.
#[derive(Clone, Debug, Default)]
pub struct ResourceContext {
    node_pools: Vec<KubernetesNodePool>,
    subnet_outputs: BTreeMap<(String, CloudProvider), String>,
    resource_group_names: BTreeMap<(String, CloudProvider), String>,
    locations: BTreeMap<CloudProvider, String>,
}

impl ResourceContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node pool
    pub fn with_node_pool(mut self, pool: KubernetesNodePool) -> Self {
        self.node_pools.push(pool);
        self
    }

    /// Register the resolved output identifier of a translated subnet
    pub fn with_subnet_output(
        mut self,
        subnet_id: impl Into<String>,
        cloud: CloudProvider,
        output_id: impl Into<String>,
    ) -> Self {
        self.subnet_outputs
            .insert((subnet_id.into(), cloud), output_id.into());
        self
    }

    /// Register the resolved name of a resource group
    pub fn with_resource_group_name(
        mut self,
        resource_group_id: impl Into<String>,
        cloud: CloudProvider,
        name: impl Into<String>,
    ) -> Self {
        self.resource_group_names
            .insert((resource_group_id.into(), cloud), name.into());
        self
    }

    /// Register the deployment location for a cloud
    pub fn with_location(mut self, cloud: CloudProvider, location: impl Into<String>) -> Self {
        self.locations.insert(cloud, location.into());
        self
    }

    /// All node pools declared for the given cloud, in registration order
    pub fn node_pools_in_cloud(
        &self,
        cloud: CloudProvider,
    ) -> impl Iterator<Item = &KubernetesNodePool> {
        self.node_pools
            .iter()
            .filter(move |pool| pool.common.cloud == cloud)
    }

    /// Resolve a subnet reference to its provider-specific output identifier
    ///
    /// Fails if the subnet was never translated for the given cloud.
    pub fn resolve_subnet(&self, subnet_id: &str, cloud: CloudProvider) -> crate::Result<String> {
        self.subnet_outputs
            .get(&(subnet_id.to_string(), cloud))
            .cloned()
            .ok_or_else(|| crate::Error::resolution("subnet", subnet_id, cloud))
    }

    /// Resolve a resource-group reference to its cloud-visible name
    pub fn resource_group_name(
        &self,
        resource_group_id: &str,
        cloud: CloudProvider,
    ) -> crate::Result<String> {
        self.resource_group_names
            .get(&(resource_group_id.to_string(), cloud))
            .cloned()
            .ok_or_else(|| crate::Error::resolution("resource group", resource_group_id, cloud))
    }

    /// Resolve the deployment location for a resource in the given cloud
    pub fn location(&self, params: &CommonParams, cloud: CloudProvider) -> crate::Result<String> {
        self.locations
            .get(&cloud)
            .cloned()
            .ok_or_else(|| crate::Error::resolution("location", params.resource_id.clone(), cloud))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(id: &str, cluster: &str, cloud: CloudProvider, default: bool) -> KubernetesNodePool {
        KubernetesNodePool {
            common: CommonParams::new(id, "rg1", cloud),
            name: id.to_string(),
            cluster_id: cluster.to_string(),
            is_default_pool: default,
            vm_size: "small".to_string(),
            node_count: 1,
        }
    }

    #[test]
    fn test_tf_resource_id_is_deterministic() {
        assert_eq!(tf_resource_id("cluster1", CloudProvider::Aws), "cluster1_aws");
        assert_eq!(
            CommonParams::new("cluster1", "rg1", CloudProvider::Azure)
                .tf_resource_id(CloudProvider::Azure),
            "cluster1_azure"
        );
    }

    #[test]
    fn test_node_pools_filtered_by_cloud_in_registration_order() {
        let ctx = ResourceContext::new()
            .with_node_pool(pool("p1", "c1", CloudProvider::Aws, true))
            .with_node_pool(pool("p2", "c1", CloudProvider::Azure, true))
            .with_node_pool(pool("p3", "c1", CloudProvider::Azure, false));

        let azure: Vec<_> = ctx
            .node_pools_in_cloud(CloudProvider::Azure)
            .map(|p| p.common.resource_id.as_str())
            .collect();
        assert_eq!(azure, vec!["p2", "p3"]);
    }

    #[test]
    fn test_resolve_subnet_returns_registered_output() {
        let ctx = ResourceContext::new().with_subnet_output("s1", CloudProvider::Aws, "${aws_subnet.s1_aws.id}");
        assert_eq!(
            ctx.resolve_subnet("s1", CloudProvider::Aws).unwrap(),
            "${aws_subnet.s1_aws.id}"
        );
    }

    #[test]
    fn test_resolve_subnet_fails_for_untranslated_cloud() {
        let ctx = ResourceContext::new().with_subnet_output("s1", CloudProvider::Aws, "out");
        let err = ctx.resolve_subnet("s1", CloudProvider::Azure).unwrap_err();
        match err {
            crate::Error::Resolution { kind, id, cloud } => {
                assert_eq!(kind, "subnet");
                assert_eq!(id, "s1");
                assert_eq!(cloud, CloudProvider::Azure);
            }
            _ => panic!("Expected Resolution error"),
        }
    }

    #[test]
    fn test_resource_group_and_location_lookups() {
        let params = CommonParams::new("c1", "rg1", CloudProvider::Azure);
        let ctx = ResourceContext::new()
            .with_resource_group_name("rg1", CloudProvider::Azure, "rg1-azure")
            .with_location(CloudProvider::Azure, "westeurope");

        assert_eq!(
            ctx.resource_group_name("rg1", CloudProvider::Azure).unwrap(),
            "rg1-azure"
        );
        assert_eq!(ctx.location(&params, CloudProvider::Azure).unwrap(), "westeurope");
        assert!(ctx.location(&params, CloudProvider::Aws).is_err());
    }
}
