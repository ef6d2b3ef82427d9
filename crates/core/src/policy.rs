//! Access-policy document construction
//!
//! Builds the structured policy documents the storage service expects,
//! serialized with serde. Documents are immutable once built; the two
//! canned variants cover anonymous read and anonymous full access.

use serde::Serialize;

use crate::error::{Error, Result};

/// Policy language version understood by S3-compatible backends
const POLICY_VERSION: &str = "2012-10-17";

/// An access-policy document: a list of statements
#[derive(Debug, Clone, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: &'static str,

    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

/// A single policy statement
#[derive(Debug, Clone, Serialize)]
pub struct PolicyStatement {
    #[serde(rename = "Sid")]
    pub sid: String,

    #[serde(rename = "Effect")]
    pub effect: String,

    #[serde(rename = "Principal")]
    pub principal: String,

    #[serde(rename = "Action")]
    pub action: Vec<String>,

    #[serde(rename = "Resource")]
    pub resource: Vec<String>,
}

impl PolicyDocument {
    /// Grant anonymous `GetObject` on every key under the bucket
    pub fn public_read(bucket: &str) -> Self {
        Self {
            version: POLICY_VERSION,
            statement: vec![PolicyStatement {
                sid: "PublicReadGetObject".to_string(),
                effect: "Allow".to_string(),
                principal: "*".to_string(),
                action: vec!["s3:GetObject".to_string()],
                resource: vec![format!("arn:aws:s3:::{bucket}/*")],
            }],
        }
    }

    /// Grant anonymous put/put-acl/get/get-acl/delete on the bucket and all
    /// of its keys
    pub fn multi_permission(bucket: &str) -> Self {
        Self {
            version: POLICY_VERSION,
            statement: vec![PolicyStatement {
                sid: "MultiplePermissions".to_string(),
                effect: "Allow".to_string(),
                principal: "*".to_string(),
                action: vec![
                    "s3:PutObject".to_string(),
                    "s3:PutObjectAcl".to_string(),
                    "s3:GetObject".to_string(),
                    "s3:GetObjectAcl".to_string(),
                    "s3:DeleteObject".to_string(),
                ],
                resource: vec![
                    format!("arn:aws:s3:::{bucket}"),
                    format!("arn:aws:s3:::{bucket}/*"),
                ],
            }],
        }
    }

    /// Serialize to the wire format the policy endpoint expects
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The canned policy variants selectable from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    PublicRead,
    MultiPermission,
}

impl PolicyKind {
    /// Parse the CLI argument into a policy kind.
    ///
    /// Unknown kinds are a usage error, raised before any service call.
    pub fn parse(kind: &str) -> Result<Self> {
        match kind {
            "public_read_policy" => Ok(Self::PublicRead),
            "multiple_policy" => Ok(Self::MultiPermission),
            other => Err(Error::Usage(format!(
                "missing policy: unknown kind '{other}' (expected 'public_read_policy' or 'multiple_policy')"
            ))),
        }
    }

    /// Build the document of this kind for a bucket
    pub fn document(self, bucket: &str) -> PolicyDocument {
        match self {
            Self::PublicRead => PolicyDocument::public_read(bucket),
            Self::MultiPermission => PolicyDocument::multi_permission(bucket),
        }
    }
}
