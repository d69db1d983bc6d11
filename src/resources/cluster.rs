//! Cloud-agnostic managed Kubernetes cluster resource
//!
//! The cluster resource carries everything validation and translation read:
//! its display name (used both as the cloud-visible name and as a DNS
//! prefix), its ordered subnet references, and its common parameters.
//! Validation and output-value resolution live here because they are pure
//! views over the resource; translation lives in
//! [`crate::compiler`] because it needs per-cloud block construction.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CloudProvider, CommonParams, ResourceContext};
use crate::blocks::{interpolate, AWS_EKS_CLUSTER, AZURE_KUBERNETES_CLUSTER};

/// A structured validation violation
///
/// `field` names the offending field path, or is empty for resource-level
/// violations.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    /// Offending field path, empty for resource-level errors
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// A cloud-agnostic managed Kubernetes cluster
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct KubernetesCluster {
    /// Common resource parameters
    pub common: CommonParams,
    /// Cloud-visible cluster name, also used as the DNS prefix
    pub name: String,
    /// Referenced subnet identifiers; order is preserved into the output
    pub subnet_ids: Vec<String>,
}

impl KubernetesCluster {
    /// Create a cluster resource
    pub fn new(
        common: CommonParams,
        name: impl Into<String>,
        subnet_ids: Vec<String>,
    ) -> Self {
        Self {
            common,
            name: name.into(),
            subnet_ids,
        }
    }

    fn field_error(&self, field: &str, message: impl Into<String>) -> ValidationError {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Validate cross-resource invariants for the given cloud
    ///
    /// Pure and non-short-circuiting: every violation is accumulated and
    /// returned for the caller to surface. Whether translation proceeds
    /// despite violations is caller policy (though the Azure translator
    /// re-checks the default-pool invariant itself and fails fast).
    ///
    /// Checks:
    /// - at least 2 subnet references;
    /// - exactly one default node pool among the context's pools whose
    ///   back-reference matches this cluster and whose cloud matches.
    pub fn validate(&self, ctx: &ResourceContext, cloud: CloudProvider) -> Vec<ValidationError> {
        let mut errs = Vec::new();

        if self.subnet_ids.len() < 2 {
            errs.push(self.field_error("subnet_ids", "at least 2 subnet ids must be provided"));
        }

        let default_pools = ctx
            .node_pools_in_cloud(cloud)
            .filter(|pool| pool.is_default_pool_of(&self.common.resource_id))
            .count();
        if default_pools != 1 {
            errs.push(self.field_error(
                "",
                format!(
                    "cluster must have exactly 1 default node pool for cloud {cloud}, found {default_pools}"
                ),
            ));
        }

        errs
    }

    /// Terraform resource type of this cluster's main block in the given cloud
    pub fn main_resource_name(&self, cloud: CloudProvider) -> crate::Result<&'static str> {
        match cloud {
            CloudProvider::Aws => Ok(AWS_EKS_CLUSTER),
            CloudProvider::Azure => Ok(AZURE_KUBERNETES_CLUSTER),
            _ => Err(crate::Error::unsupported_cloud(cloud)),
        }
    }

    /// Named output-value templates for the given cloud
    ///
    /// Returns deferred `${...}` expressions over the identifiers translation
    /// generates; nothing is resolved here. For an unsupported cloud this
    /// returns an empty map rather than an error - output values are
    /// best-effort metadata, unlike translation, which hard-errors.
    pub fn output_values(&self, cloud: CloudProvider) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();
        let tf_id = self.common.tf_resource_id(cloud);
        match cloud {
            CloudProvider::Aws => {
                values.insert(
                    "endpoint".to_string(),
                    interpolate(AWS_EKS_CLUSTER, &tf_id, "endpoint"),
                );
                values.insert(
                    "ca_certificate".to_string(),
                    interpolate(AWS_EKS_CLUSTER, &tf_id, "certificate_authority[0].data"),
                );
            }
            CloudProvider::Azure => {
                values.insert(
                    "endpoint".to_string(),
                    interpolate(AZURE_KUBERNETES_CLUSTER, &tf_id, "kube_config.0.host"),
                );
                values.insert(
                    "ca_certificate".to_string(),
                    interpolate(
                        AZURE_KUBERNETES_CLUSTER,
                        &tf_id,
                        "kube_config.0.cluster_ca_certificate",
                    ),
                );
            }
            _ => {}
        }
        values
    }
}
