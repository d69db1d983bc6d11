//! AWS IAM blocks for cluster role scaffolding
//!
//! EKS requires a separately declared IAM role plus two standard policy
//! attachments, wired by name into the cluster block. These types model that
//! scaffolding; the compiler declares the role before anything that
//! references it.

use serde::{Deserialize, Serialize};

/// Terraform resource type for IAM roles
pub const AWS_IAM_ROLE: &str = "aws_iam_role";
/// Terraform resource type for IAM role policy attachments
pub const AWS_IAM_ROLE_POLICY_ATTACHMENT: &str = "aws_iam_role_policy_attachment";

/// Standard managed policy granting the EKS control plane its permissions
pub const EKS_CLUSTER_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AmazonEKSClusterPolicy";
/// Standard managed policy for the EKS VPC resource controller
pub const EKS_VPC_CONTROLLER_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/AmazonEKSVPCResourceController";

/// Assume-role trust policy document for the given AWS service principal
///
/// Returns the policy as a JSON string, the form the `assume_role_policy`
/// attribute expects.
pub fn assume_role_policy(service: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Action": "sts:AssumeRole",
            "Effect": "Allow",
            "Principal": { "Service": service },
            "Sid": ""
        }]
    })
    .to_string()
}

/// IAM role block with an assume-role trust policy
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AwsIamRole {
    /// Block identifier (not an HCL attribute)
    #[serde(skip)]
    pub block_id: String,
    /// Cloud-visible role name
    pub name: String,
    /// Trust policy document (JSON string)
    pub assume_role_policy: String,
}

impl AwsIamRole {
    /// Create an IAM role block
    pub fn new(
        block_id: impl Into<String>,
        name: impl Into<String>,
        assume_role_policy: impl Into<String>,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            name: name.into(),
            assume_role_policy: assume_role_policy.into(),
        }
    }
}

/// IAM role policy attachment block
///
/// Binds one managed policy to a role. The `role` attribute is a bare
/// reference to the role block's `name` attribute, so the role must be
/// declared earlier in the output sequence.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AwsIamRolePolicyAttachment {
    /// Block identifier (not an HCL attribute)
    #[serde(skip)]
    pub block_id: String,
    /// Reference to the role block's name attribute
    pub role: String,
    /// ARN of the managed policy to attach
    pub policy_arn: String,
}

impl AwsIamRolePolicyAttachment {
    /// Create a policy attachment block
    pub fn new(
        block_id: impl Into<String>,
        role: impl Into<String>,
        policy_arn: impl Into<String>,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            role: role.into(),
            policy_arn: policy_arn.into(),
        }
    }
}
