use async_trait::async_trait;

/// Liveness probe for the backing database.
#[async_trait]
pub trait HealthCheck: Send + Sync + 'static {
    /// Run a trivial query.
    ///
    /// # Errors
    /// Any failure to reach the database or an unexpected result.
    async fn ping(&self) -> Result<(), anyhow::Error>;
}
