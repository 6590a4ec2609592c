use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionKind {
    FineLocation,
}

/// Outcome of a permission prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionResult {
    Granted,
    Denied,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum PermissionState {
    #[default]
    NotRequested,
    Requested,
    Granted,
    Denied,
}

#[async_trait]
pub trait PermissionSystem: Debug + Send + Sync {
    /// Whether the platform asks the user for permission at runtime. Without such a model access is implied.
    fn has_runtime_model(&self) -> bool;

    fn check_permission(&self, kind: PermissionKind) -> bool;

    async fn request_permission(&self, kind: PermissionKind) -> Result<PermissionResult, PermissionError>;
}

#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("unable to prompt for permission: {0}")]
    Prompt(#[from] std::io::Error),
    #[error("permission prompt was abandoned: {0}")]
    Abandoned(#[from] tokio::task::JoinError),
}
