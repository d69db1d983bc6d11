//! Supporting types for cloud-agnostic resources

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported target cloud providers
///
/// This is a closed set: translation branches entirely on this value, and any
/// cloud without an implemented backend is a translation-time error, never a
/// crash or a silent no-op.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum CloudProvider {
    /// Amazon Web Services
    #[default]
    Aws,
    /// Microsoft Azure
    Azure,
    /// Google Cloud Platform (declared but not yet implemented)
    Gcp,
}

impl CloudProvider {
    /// Returns true if this is a valid cloud provider string
    pub fn is_valid(s: &str) -> bool {
        matches!(s.to_lowercase().as_str(), "aws" | "azure" | "gcp")
    }
}

impl std::str::FromStr for CloudProvider {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(Self::Aws),
            "azure" => Ok(Self::Azure),
            "gcp" => Ok(Self::Gcp),
            _ => Err(crate::Error::validation(format!(
                "invalid cloud provider: {s}, expected one of: aws, azure, gcp"
            ))),
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aws => write!(f, "aws"),
            Self::Azure => write!(f, "azure"),
            Self::Gcp => write!(f, "gcp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_str_accepts_known_clouds() {
        assert_eq!(CloudProvider::from_str("aws").unwrap(), CloudProvider::Aws);
        assert_eq!(
            CloudProvider::from_str("Azure").unwrap(),
            CloudProvider::Azure
        );
        assert_eq!(CloudProvider::from_str("GCP").unwrap(), CloudProvider::Gcp);
    }

    #[test]
    fn test_from_str_rejects_unknown_cloud() {
        let err = CloudProvider::from_str("oracle").unwrap_err();
        assert!(err.to_string().contains("invalid cloud provider"));
        assert!(err.to_string().contains("oracle"));
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for cloud in [CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp] {
            assert_eq!(
                CloudProvider::from_str(&cloud.to_string()).unwrap(),
                cloud
            );
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(CloudProvider::is_valid("aws"));
        assert!(CloudProvider::is_valid("AZURE"));
        assert!(!CloudProvider::is_valid("digitalocean"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&CloudProvider::Azure).unwrap();
        assert_eq!(json, "\"azure\"");
        let parsed: CloudProvider = serde_json::from_str("\"aws\"").unwrap();
        assert_eq!(parsed, CloudProvider::Aws);
    }
}
