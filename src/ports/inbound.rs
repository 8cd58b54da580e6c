//! Inbound port. UI (adapter) calls into the application.

use crate::domain::GatewayError;

/// Input port: the hosting shell drives one full composition session
/// (type selection through publish/draft-save) and routes away when done.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive composition flow. Returns the final
    /// human-readable status message, or None when the user abandoned
    /// the session.
    async fn run_compose(&self) -> Result<Option<String>, GatewayError>;
}
