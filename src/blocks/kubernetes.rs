//! Managed Kubernetes cluster blocks
//!
//! The same capability - a managed control plane - is expressed with
//! structurally different primitives per cloud: EKS takes a role reference
//! and a VPC config, AKS embeds its default node pool and an identity block
//! directly in the cluster resource.

use serde::{Deserialize, Serialize};

/// Terraform resource type for EKS clusters
pub const AWS_EKS_CLUSTER: &str = "aws_eks_cluster";
/// Terraform resource type for AKS clusters
pub const AZURE_KUBERNETES_CLUSTER: &str = "azurerm_kubernetes_cluster";

/// VPC configuration sub-block of an EKS cluster
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VpcConfig {
    /// Resolved subnet output identifiers, in declaration order
    pub subnet_ids: Vec<String>,
}

/// AWS EKS cluster block
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AwsEksCluster {
    /// Block identifier (not an HCL attribute)
    #[serde(skip)]
    pub block_id: String,
    /// Cloud-visible cluster name
    pub name: String,
    /// Reference to the ARN of the cluster's IAM role block
    pub role_arn: String,
    /// VPC configuration
    pub vpc_config: VpcConfig,
}

impl AwsEksCluster {
    /// Create an EKS cluster block
    pub fn new(
        block_id: impl Into<String>,
        name: impl Into<String>,
        role_arn: impl Into<String>,
        subnet_ids: Vec<String>,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            name: name.into(),
            role_arn: role_arn.into(),
            vpc_config: VpcConfig { subnet_ids },
        }
    }
}

/// Identity sub-block of an AKS cluster
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AzureIdentity {
    /// Identity type (always "SystemAssigned" for generated clusters)
    #[serde(rename = "type")]
    pub type_: String,
}

impl AzureIdentity {
    /// System-assigned managed identity
    pub fn system_assigned() -> Self {
        Self {
            type_: "SystemAssigned".to_string(),
        }
    }
}

/// Azure node pool, standalone or embedded as an AKS default pool
///
/// A standalone pool carries its own block identity and a back-reference to
/// its cluster. The embedded default-pool representation has neither: the
/// sub-block has no independent identity, so flattening produces a copy with
/// both ownership markers absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AzureNodePool {
    /// Block identifier; absent for the embedded representation
    #[serde(skip)]
    pub block_id: Option<String>,
    /// Reference to the owning cluster block; absent for the embedded
    /// representation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    /// Cloud-visible pool name
    pub name: String,
    /// Virtual machine size for the pool's nodes
    pub vm_size: String,
    /// Number of nodes in the pool
    pub node_count: u32,
}

impl AzureNodePool {
    /// Embedded default-pool representation of this pool
    ///
    /// Constructs a new value with the block identity and cluster
    /// back-reference cleared; the canonical pool is left untouched.
    pub fn flatten(self) -> Self {
        Self {
            block_id: None,
            cluster_id: None,
            ..self
        }
    }
}

/// Azure AKS cluster block with embedded default node pool
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AzureKubernetesCluster {
    /// Block identifier (not an HCL attribute)
    #[serde(skip)]
    pub block_id: String,
    /// Cloud-visible cluster name
    pub name: String,
    /// Resolved resource-group name
    pub resource_group_name: String,
    /// Deployment location
    pub location: String,
    /// DNS prefix (equal to the cluster name)
    pub dns_prefix: String,
    /// Embedded, flattened default node pool
    pub default_node_pool: AzureNodePool,
    /// Managed identity
    pub identity: AzureIdentity,
}

impl AzureKubernetesCluster {
    /// Create an AKS cluster block with a system-assigned identity
    ///
    /// The DNS prefix is set to the cluster name; `default_node_pool` must be
    /// a flattened pool representation.
    pub fn new(
        block_id: impl Into<String>,
        name: impl Into<String>,
        resource_group_name: impl Into<String>,
        location: impl Into<String>,
        default_node_pool: AzureNodePool,
    ) -> Self {
        let name = name.into();
        Self {
            block_id: block_id.into(),
            name: name.clone(),
            resource_group_name: resource_group_name.into(),
            location: location.into(),
            dns_prefix: name,
            default_node_pool,
            identity: AzureIdentity::system_assigned(),
        }
    }
}
