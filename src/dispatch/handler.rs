//! Command callback trait
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Blanket implementation for async closures
//! - 1.0.0: Initial trait for per-command callbacks

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

/// Callback invoked when a registered command is used
///
/// Implemented for any `Fn(I) -> impl Future<Output = anyhow::Result<()>>`, so
/// plain async closures can be registered directly.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl CommandCallback<SlashInteraction> for PingHandler {
///     async fn call(&self, interaction: SlashInteraction) -> Result<()> {
///         interaction.reply("Pong!").await
///     }
/// }
/// ```
#[async_trait]
pub trait CommandCallback<I>: Send + Sync {
    /// Handle one invocation
    ///
    /// Errors are logged by the router and never reach the platform loop.
    async fn call(&self, interaction: I) -> Result<()>;
}

#[async_trait]
impl<I, F, Fut> CommandCallback<I> for F
where
    I: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn call(&self, interaction: I) -> Result<()> {
        (self)(interaction).await
    }
}
