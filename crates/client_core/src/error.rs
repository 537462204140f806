use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The remote call rejected: transport failure, remote error or a malformed reply.
    #[error("remote call failed: {source:#}")]
    RemoteCallFailure { source: anyhow::Error },
}
