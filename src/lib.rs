//! Stratus - cross-cloud infrastructure compiler for managed Kubernetes clusters
//!
//! Stratus takes a cloud-agnostic description of a managed Kubernetes cluster
//! and its node pools, validates cross-resource invariants, and emits the
//! equivalent declarative Terraform blocks for a specific target cloud.
//!
//! # Architecture
//!
//! Three collaborating pieces, evaluated leaves-first:
//!
//! - Validation (`KubernetesCluster::validate`) accumulates structured
//!   violations over the cluster and its sibling node pools - it never fails
//!   fatally and never blocks.
//! - Translation ([`compiler::translate`]) branches per target cloud and
//!   produces an ordered list of output blocks, or a terminal error for an
//!   unsupported cloud.
//! - Output values (`KubernetesCluster::output_values`) compute deferred
//!   `${...}` template expressions over the identifiers translation generates.
//!
//! Sibling resources (subnets, the default node pool) are resolved through an
//! explicitly injected, read-only [`resources::ResourceContext`] - there is no
//! global resource registry. Nothing here contacts a cloud API; the output is
//! data describing infrastructure, not infrastructure itself.
//!
//! # Modules
//!
//! - [`resources`] - Cloud-agnostic resource definitions (cluster, node pool)
//!   and the shared resolution context
//! - [`blocks`] - Typed Terraform output blocks consumed by a downstream
//!   serializer
//! - [`compiler`] - Per-cloud translation of validated resources into blocks
//! - [`error`] - Error types for the compiler

#![deny(missing_docs)]

pub mod blocks;
pub mod compiler;
pub mod error;
pub mod resources;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
