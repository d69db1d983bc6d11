//! Per-cloud translation of validated resources into output blocks
//!
//! This module turns a [`KubernetesCluster`] into an ordered list of
//! [`TfBlock`] values for one target cloud. Each cloud has its own
//! [`CloudTranslator`] implementation behind a factory, the way providers are
//! selected elsewhere in the codebase: asking for a cloud without a backend
//! is a terminal [`Error::UnsupportedCloud`], never a silent no-op.
//!
//! # Translation flow
//!
//! 1. [`translator_for`] selects the backend, or fails for an unsupported
//!    cloud.
//! 2. Every subnet reference is resolved to its provider output identifier,
//!    in declaration order; any failure aborts with no partial output.
//! 3. The backend builds its blocks. AWS emits four blocks in a fixed
//!    reference-before-use order (role, two policy attachments, cluster);
//!    Azure emits a single cluster block embedding the flattened default
//!    node pool.
//!
//! Translation is pure and synchronous: no I/O, no locks, no caching -
//! repeated invocations recompute from scratch.

use tracing::debug;

use crate::blocks::{
    assume_role_policy, reference, AwsEksCluster, AwsIamRole, AwsIamRolePolicyAttachment,
    AzureKubernetesCluster, TfBlock, AWS_IAM_ROLE, EKS_CLUSTER_POLICY_ARN,
    EKS_VPC_CONTROLLER_POLICY_ARN,
};
use crate::resources::{CloudProvider, KubernetesCluster, ResourceContext};
use crate::{Error, Result};

/// AWS service principal trusted to assume the cluster role
const EKS_SERVICE_PRINCIPAL: &str = "eks.amazonaws.com";

/// Per-cloud cluster translation backend
///
/// Implementations are pure: they read the cluster, the pre-resolved subnet
/// identifiers, and the injected context, and construct typed blocks.
pub trait CloudTranslator {
    /// The cloud this backend translates for
    fn cloud(&self) -> CloudProvider;

    /// Build the ordered block list for the cluster
    ///
    /// `subnet_ids` are the cluster's subnet references already resolved to
    /// provider output identifiers, in declaration order.
    fn translate(
        &self,
        cluster: &KubernetesCluster,
        subnet_ids: Vec<String>,
        ctx: &ResourceContext,
    ) -> Result<Vec<TfBlock>>;
}

/// Translate a cluster into its output blocks for one target cloud
///
/// This is the main entry point: it selects the backend, resolves all subnet
/// references (terminal error on any failure, no partial output), and
/// delegates to the backend.
pub fn translate(
    cluster: &KubernetesCluster,
    cloud: CloudProvider,
    ctx: &ResourceContext,
) -> Result<Vec<TfBlock>> {
    let translator = translator_for(cloud)?;

    let subnet_ids = cluster
        .subnet_ids
        .iter()
        .map(|subnet| ctx.resolve_subnet(subnet, cloud))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        cluster = %cluster.common.resource_id,
        %cloud,
        subnets = subnet_ids.len(),
        "translating kubernetes cluster"
    );
    translator.translate(cluster, subnet_ids, ctx)
}

/// Create a translator backend for the given cloud
///
/// Returns an error for clouds without an implemented backend (GCP).
pub fn translator_for(cloud: CloudProvider) -> Result<Box<dyn CloudTranslator>> {
    match cloud {
        CloudProvider::Aws => Ok(Box::new(AwsTranslator)),
        CloudProvider::Azure => Ok(Box::new(AzureTranslator)),
        CloudProvider::Gcp => Err(Error::unsupported_cloud(cloud)),
    }
}

/// AWS EKS translation backend
///
/// EKS wires its control-plane permissions through a separately declared IAM
/// role: the output is always [role, attachment, attachment, cluster], in
/// that order, because the attachments and the cluster reference the role by
/// its generated identifier.
#[derive(Debug, Default, Clone)]
pub struct AwsTranslator;

impl CloudTranslator for AwsTranslator {
    fn cloud(&self) -> CloudProvider {
        CloudProvider::Aws
    }

    fn translate(
        &self,
        cluster: &KubernetesCluster,
        subnet_ids: Vec<String>,
        _ctx: &ResourceContext,
    ) -> Result<Vec<TfBlock>> {
        let tf_id = cluster.common.tf_resource_id(CloudProvider::Aws);

        let role = AwsIamRole::new(
            &tf_id,
            format!("iam_for_k8cluster_{}", cluster.name),
            assume_role_policy(EKS_SERVICE_PRINCIPAL),
        );
        let cluster_policy = AwsIamRolePolicyAttachment::new(
            format!("{tf_id}_AmazonEKSClusterPolicy"),
            reference(AWS_IAM_ROLE, &tf_id, "name"),
            EKS_CLUSTER_POLICY_ARN,
        );
        let vpc_policy = AwsIamRolePolicyAttachment::new(
            format!("{tf_id}_AmazonEKSVPCResourceController"),
            reference(AWS_IAM_ROLE, &tf_id, "name"),
            EKS_VPC_CONTROLLER_POLICY_ARN,
        );
        let eks = AwsEksCluster::new(
            &tf_id,
            &cluster.name,
            reference(AWS_IAM_ROLE, &tf_id, "arn"),
            subnet_ids,
        );

        // Role must be declared before the blocks that reference it.
        Ok(vec![
            role.into(),
            cluster_policy.into(),
            vpc_policy.into(),
            eks.into(),
        ])
    }
}

/// Azure AKS translation backend
///
/// AKS has no separate role scaffolding; instead the cluster block embeds a
/// system-assigned identity and its default node pool, flattened from the
/// matching sibling pool in the context.
#[derive(Debug, Default, Clone)]
pub struct AzureTranslator;

impl CloudTranslator for AzureTranslator {
    fn cloud(&self) -> CloudProvider {
        CloudProvider::Azure
    }

    fn translate(
        &self,
        cluster: &KubernetesCluster,
        _subnet_ids: Vec<String>,
        ctx: &ResourceContext,
    ) -> Result<Vec<TfBlock>> {
        let tf_id = cluster.common.tf_resource_id(CloudProvider::Azure);

        // The cluster block cannot be emitted without its default pool, so a
        // missing pool fails fast here even if the caller skipped validation.
        let default_pool = ctx
            .node_pools_in_cloud(CloudProvider::Azure)
            .find(|pool| pool.is_default_pool_of(&cluster.common.resource_id))
            .ok_or_else(|| {
                Error::validation(format!(
                    "cluster {} has no default node pool for cloud azure",
                    cluster.common.resource_id
                ))
            })?;
        let embedded = default_pool.azure_pool().flatten();
        debug!(pool = %default_pool.common.resource_id, "embedding default node pool");

        let aks = AzureKubernetesCluster::new(
            tf_id,
            &cluster.name,
            ctx.resource_group_name(&cluster.common.resource_group_id, CloudProvider::Azure)?,
            ctx.location(&cluster.common, CloudProvider::Azure)?,
            embedded,
        );

        Ok(vec![aks.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{CommonParams, KubernetesNodePool};

    fn cluster(cloud: CloudProvider) -> KubernetesCluster {
        KubernetesCluster::new(
            CommonParams::new("cluster1", "rg1", cloud),
            "demo",
            vec!["s1".to_string(), "s2".to_string()],
        )
    }

    fn pool(id: &str, cluster_id: &str, cloud: CloudProvider, default: bool) -> KubernetesNodePool {
        KubernetesNodePool {
            common: CommonParams::new(id, "rg1", cloud),
            name: id.to_string(),
            cluster_id: cluster_id.to_string(),
            is_default_pool: default,
            vm_size: "Standard_DS2_v2".to_string(),
            node_count: 2,
        }
    }

    fn aws_ctx() -> ResourceContext {
        ResourceContext::new()
            .with_subnet_output("s1", CloudProvider::Aws, "${aws_subnet.s1_aws.id}")
            .with_subnet_output("s2", CloudProvider::Aws, "${aws_subnet.s2_aws.id}")
            .with_node_pool(pool("p1", "cluster1", CloudProvider::Aws, true))
    }

    fn azure_ctx() -> ResourceContext {
        ResourceContext::new()
            .with_subnet_output("s1", CloudProvider::Azure, "${azurerm_subnet.s1_azure.id}")
            .with_subnet_output("s2", CloudProvider::Azure, "${azurerm_subnet.s2_azure.id}")
            .with_resource_group_name("rg1", CloudProvider::Azure, "rg1-azure")
            .with_location(CloudProvider::Azure, "westeurope")
            .with_node_pool(pool("p1", "cluster1", CloudProvider::Azure, true))
    }

    // =========================================================================
    // Story: AWS Four-Block Ordering
    // =========================================================================

    /// Story: AWS translation always yields [role, attachment, attachment,
    /// cluster], with the role declared before everything that references it
    #[test]
    fn story_aws_emits_four_blocks_in_declaration_order() {
        let blocks = translate(&cluster(CloudProvider::Aws), CloudProvider::Aws, &aws_ctx())
            .expect("aws translation succeeds");
        assert_eq!(blocks.len(), 4);

        let addresses: Vec<_> = blocks.iter().map(TfBlock::address).collect();
        assert_eq!(
            addresses,
            vec![
                "aws_iam_role.cluster1_aws",
                "aws_iam_role_policy_attachment.cluster1_aws_AmazonEKSClusterPolicy",
                "aws_iam_role_policy_attachment.cluster1_aws_AmazonEKSVPCResourceController",
                "aws_eks_cluster.cluster1_aws",
            ]
        );
    }

    /// Story: the cluster's role reference matches the role block's identifier
    #[test]
    fn story_aws_cluster_references_generated_role() {
        let blocks = translate(&cluster(CloudProvider::Aws), CloudProvider::Aws, &aws_ctx()).unwrap();

        let role_id = match &blocks[0] {
            TfBlock::IamRole(role) => {
                assert_eq!(role.name, "iam_for_k8cluster_demo");
                role.block_id.clone()
            }
            other => panic!("expected role first, got {other:?}"),
        };

        match &blocks[3] {
            TfBlock::EksCluster(eks) => {
                assert_eq!(eks.role_arn, format!("aws_iam_role.{role_id}.arn"));
                assert_eq!(eks.name, "demo");
            }
            other => panic!("expected cluster last, got {other:?}"),
        }
    }

    /// Story: attachments carry exactly the two fixed standard policy ARNs
    /// and subnet order is preserved end to end
    #[test]
    fn story_aws_round_trip_policies_and_subnets() {
        let blocks = translate(&cluster(CloudProvider::Aws), CloudProvider::Aws, &aws_ctx()).unwrap();

        let arns: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                TfBlock::IamRolePolicyAttachment(a) => Some(a.policy_arn.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(arns, vec![EKS_CLUSTER_POLICY_ARN, EKS_VPC_CONTROLLER_POLICY_ARN]);

        match &blocks[3] {
            TfBlock::EksCluster(eks) => assert_eq!(
                eks.vpc_config.subnet_ids,
                vec!["${aws_subnet.s1_aws.id}", "${aws_subnet.s2_aws.id}"]
            ),
            other => panic!("expected cluster last, got {other:?}"),
        }
    }

    // =========================================================================
    // Story: Azure Single Block With Embedded Pool
    // =========================================================================

    /// Story: Azure translation yields one cluster block whose embedded pool
    /// is ownership-cleared and keeps its provider name
    #[test]
    fn story_azure_emits_single_block_with_flattened_pool() {
        let blocks = translate(
            &cluster(CloudProvider::Azure),
            CloudProvider::Azure,
            &azure_ctx(),
        )
        .expect("azure translation succeeds");
        assert_eq!(blocks.len(), 1);

        match &blocks[0] {
            TfBlock::AksCluster(aks) => {
                assert_eq!(aks.name, "demo");
                assert_eq!(aks.dns_prefix, "demo");
                assert_eq!(aks.resource_group_name, "rg1-azure");
                assert_eq!(aks.location, "westeurope");
                assert_eq!(aks.identity.type_, "SystemAssigned");
                assert!(aks.default_node_pool.block_id.is_none());
                assert!(aks.default_node_pool.cluster_id.is_none());
                assert_eq!(aks.default_node_pool.name, "p1");
            }
            other => panic!("expected aks cluster, got {other:?}"),
        }
    }

    /// Story: without a default pool the Azure translator refuses to emit an
    /// incomplete cluster, even if the caller skipped validation
    #[test]
    fn story_azure_fails_fast_without_default_pool() {
        let ctx = ResourceContext::new()
            .with_subnet_output("s1", CloudProvider::Azure, "out1")
            .with_subnet_output("s2", CloudProvider::Azure, "out2")
            .with_resource_group_name("rg1", CloudProvider::Azure, "rg1-azure")
            .with_location(CloudProvider::Azure, "westeurope")
            .with_node_pool(pool("p1", "cluster1", CloudProvider::Azure, false));

        let err = translate(&cluster(CloudProvider::Azure), CloudProvider::Azure, &ctx).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("no default node pool"));
    }

    /// Story: with multiple (invalid) default pools, the first in context
    /// order is selected deterministically
    #[test]
    fn story_azure_multiple_defaults_select_first_in_context_order() {
        let ctx = azure_ctx().with_node_pool(pool("p2", "cluster1", CloudProvider::Azure, true));
        let blocks =
            translate(&cluster(CloudProvider::Azure), CloudProvider::Azure, &ctx).unwrap();
        match &blocks[0] {
            TfBlock::AksCluster(aks) => assert_eq!(aks.default_node_pool.name, "p1"),
            other => panic!("expected aks cluster, got {other:?}"),
        }
    }

    // =========================================================================
    // Story: Terminal Errors
    // =========================================================================

    /// Story: unsupported clouds yield no blocks and an error naming the cloud
    #[test]
    fn story_unsupported_cloud_is_a_terminal_error() {
        let err = translate(&cluster(CloudProvider::Gcp), CloudProvider::Gcp, &aws_ctx())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedCloud { cloud: CloudProvider::Gcp }
        ));
        assert!(translator_for(CloudProvider::Gcp).is_err());
    }

    /// Story: any unresolvable subnet aborts translation with no partial output
    #[test]
    fn story_unresolved_subnet_aborts_translation() {
        let ctx = ResourceContext::new()
            .with_subnet_output("s1", CloudProvider::Aws, "out1")
            .with_node_pool(pool("p1", "cluster1", CloudProvider::Aws, true));

        let err = translate(&cluster(CloudProvider::Aws), CloudProvider::Aws, &ctx).unwrap_err();
        match err {
            Error::Resolution { kind, id, cloud } => {
                assert_eq!(kind, "subnet");
                assert_eq!(id, "s2");
                assert_eq!(cloud, CloudProvider::Aws);
            }
            other => panic!("expected resolution error, got {other:?}"),
        }
    }

    /// Story: missing resource-group or location resolution is terminal too
    #[test]
    fn story_azure_missing_collaborator_resolution_is_terminal() {
        let ctx = ResourceContext::new()
            .with_subnet_output("s1", CloudProvider::Azure, "out1")
            .with_subnet_output("s2", CloudProvider::Azure, "out2")
            .with_node_pool(pool("p1", "cluster1", CloudProvider::Azure, true));

        let err = translate(&cluster(CloudProvider::Azure), CloudProvider::Azure, &ctx).unwrap_err();
        assert!(matches!(err, Error::Resolution { kind: "resource group", .. }));
    }

    #[test]
    fn test_translator_backends_report_their_cloud() {
        assert_eq!(AwsTranslator.cloud(), CloudProvider::Aws);
        assert_eq!(AzureTranslator.cloud(), CloudProvider::Azure);
        assert_eq!(
            translator_for(CloudProvider::Azure).unwrap().cloud(),
            CloudProvider::Azure
        );
    }
}
