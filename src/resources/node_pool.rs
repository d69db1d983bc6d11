//! Cloud-agnostic node pool resource

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{tf_resource_id, CloudProvider, CommonParams};
use crate::blocks::{reference, AzureNodePool, AZURE_KUBERNETES_CLUSTER};

/// A node pool belonging to a managed Kubernetes cluster
///
/// The `cluster_id` back-reference is a relation, not ownership - the pool
/// does not own its cluster. Exactly one pool per (cluster, cloud) pair must
/// have `is_default_pool` set; that invariant is checked by
/// `KubernetesCluster::validate`, not enforced at construction time, so a
/// configuration with zero or multiple default pools is representable but
/// invalid.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct KubernetesNodePool {
    /// Common resource parameters
    pub common: CommonParams,
    /// Cloud-visible pool name
    pub name: String,
    /// Resource identifier of the owning cluster
    pub cluster_id: String,
    /// Marks this pool as the cluster's default pool
    #[serde(default)]
    pub is_default_pool: bool,
    /// Virtual machine size for the pool's nodes
    pub vm_size: String,
    /// Number of nodes in the pool
    pub node_count: u32,
}

impl KubernetesNodePool {
    /// Returns true if this pool is the default pool of the given cluster
    pub fn is_default_pool_of(&self, cluster_resource_id: &str) -> bool {
        self.is_default_pool && self.cluster_id == cluster_resource_id
    }

    /// Standalone Azure provider representation of this pool
    ///
    /// Carries its own block identity and a reference to the owning cluster
    /// block. Call [`AzureNodePool::flatten`] to obtain the embedded
    /// default-pool representation.
    pub fn azure_pool(&self) -> AzureNodePool {
        AzureNodePool {
            block_id: Some(self.common.tf_resource_id(CloudProvider::Azure)),
            cluster_id: Some(reference(
                AZURE_KUBERNETES_CLUSTER,
                &tf_resource_id(&self.cluster_id, CloudProvider::Azure),
                "id",
            )),
            name: self.name.clone(),
            vm_size: self.vm_size.clone(),
            node_count: self.node_count,
        }
    }
}
