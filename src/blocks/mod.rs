//! Typed Terraform output blocks
//!
//! This module defines the declarative block values emitted by the
//! [`compiler`](crate::compiler). Each block is a typed struct holding its
//! Terraform resource type and block identifier plus the HCL attributes of
//! the body; a downstream serializer turns them into actual configuration
//! text. This crate only constructs the values, never serializes them for
//! real - [`TfBlock::to_yaml`] exists for debugging and tests.
//!
//! The target format resolves dependencies by declaration/reference pairing,
//! so the order of blocks in a translation result is a correctness
//! requirement, not cosmetic.

mod iam;
mod kubernetes;

pub use iam::{
    assume_role_policy, AwsIamRole, AwsIamRolePolicyAttachment, AWS_IAM_ROLE,
    AWS_IAM_ROLE_POLICY_ATTACHMENT, EKS_CLUSTER_POLICY_ARN, EKS_VPC_CONTROLLER_POLICY_ARN,
};
pub use kubernetes::{
    AwsEksCluster, AzureIdentity, AzureKubernetesCluster, AzureNodePool, VpcConfig,
    AWS_EKS_CLUSTER, AZURE_KUBERNETES_CLUSTER,
};

use serde::Serialize;

/// Bare reference to an attribute of a generated block (no interpolation)
///
/// Used for intra-output wiring, e.g. `aws_iam_role.cluster1_aws.name`.
pub fn reference(resource_type: &str, block_id: &str, attribute: &str) -> String {
    format!("{resource_type}.{block_id}.{attribute}")
}

/// Deferred `${...}` template expression over an attribute of a generated block
///
/// Used for externally consumable output values; expansion is left to the
/// serialization layer.
pub fn interpolate(resource_type: &str, block_id: &str, attribute: &str) -> String {
    format!("${{{}}}", reference(resource_type, block_id, attribute))
}

/// One declarative infrastructure statement
///
/// A translation result is an ordered `Vec<TfBlock>`; blocks referencing a
/// sibling (policy attachments, the EKS cluster referencing its role) must
/// appear after the block they reference.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TfBlock {
    /// AWS IAM role with an assume-role trust policy
    IamRole(AwsIamRole),
    /// AWS IAM role policy attachment
    IamRolePolicyAttachment(AwsIamRolePolicyAttachment),
    /// AWS EKS cluster
    EksCluster(AwsEksCluster),
    /// Azure managed Kubernetes cluster with embedded default pool
    AksCluster(AzureKubernetesCluster),
}

impl TfBlock {
    /// Terraform resource type of this block
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::IamRole(_) => AWS_IAM_ROLE,
            Self::IamRolePolicyAttachment(_) => AWS_IAM_ROLE_POLICY_ATTACHMENT,
            Self::EksCluster(_) => AWS_EKS_CLUSTER,
            Self::AksCluster(_) => AZURE_KUBERNETES_CLUSTER,
        }
    }

    /// Identifier of this block within its resource type
    pub fn block_id(&self) -> &str {
        match self {
            Self::IamRole(b) => &b.block_id,
            Self::IamRolePolicyAttachment(b) => &b.block_id,
            Self::EksCluster(b) => &b.block_id,
            Self::AksCluster(b) => &b.block_id,
        }
    }

    /// Full `type.id` address of this block
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type(), self.block_id())
    }

    /// Body of this block as a JSON value (block identity excluded)
    pub fn to_value(&self) -> crate::Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| crate::Error::serialization(e.to_string()))
    }

    /// Serialize the addressed block to YAML, for debugging and tests
    pub fn to_yaml(&self) -> crate::Result<String> {
        let body = self.to_value()?;
        let addressed = serde_json::json!({
            (self.resource_type()): { (self.block_id()): body }
        });
        serde_yaml::to_string(&addressed).map_err(|e| crate::Error::serialization(e.to_string()))
    }
}

impl From<AwsIamRole> for TfBlock {
    fn from(b: AwsIamRole) -> Self {
        Self::IamRole(b)
    }
}

impl From<AwsIamRolePolicyAttachment> for TfBlock {
    fn from(b: AwsIamRolePolicyAttachment) -> Self {
        Self::IamRolePolicyAttachment(b)
    }
}

impl From<AwsEksCluster> for TfBlock {
    fn from(b: AwsEksCluster) -> Self {
        Self::EksCluster(b)
    }
}

impl From<AzureKubernetesCluster> for TfBlock {
    fn from(b: AzureKubernetesCluster) -> Self {
        Self::AksCluster(b)
    }
}
