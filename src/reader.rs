//! On-chain constant reads needed during planning
//!
//! The only network round trip in a plan is the quorum denominator of the
//! ERC20 voting template. It is read once per plan and never retried here.

use std::future::Future;

use alloy::network::AnyNetwork;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use crate::contracts::ILinearERC20Voting;
use crate::error::{Error, Result};

/// Reads constants from already deployed template contracts
pub trait ConstantReader {
    /// Reads `QUORUM_DENOMINATOR()` from the ERC20 voting template
    fn quorum_denominator(&self, template: Address) -> impl Future<Output = Result<U256>> + Send;
}

/// Reads constants over RPC
#[derive(Debug, Clone)]
pub struct ProviderReader<P> {
    provider: P,
}

impl<P> ProviderReader<P>
where
    P: Provider<AnyNetwork> + Clone + 'static,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P> ConstantReader for ProviderReader<P>
where
    P: Provider<AnyNetwork> + Clone + Send + Sync + 'static,
{
    async fn quorum_denominator(&self, template: Address) -> Result<U256> {
        let strategy = ILinearERC20Voting::new(template, &self.provider);
        let denominator = strategy
            .QUORUM_DENOMINATOR()
            .call()
            .await
            .map_err(|e| Error::ExternalRead {
                what: "QUORUM_DENOMINATOR",
                reason: e.to_string(),
            })?;

        tracing::debug!(%template, %denominator, "read quorum denominator");
        Ok(denominator)
    }
}

/// Serves a known denominator without touching the network
#[derive(Debug, Clone, Copy)]
pub struct FixedReader {
    pub quorum_denominator: U256,
}

impl FixedReader {
    pub fn new(quorum_denominator: U256) -> Self {
        Self { quorum_denominator }
    }
}

impl ConstantReader for FixedReader {
    async fn quorum_denominator(&self, _template: Address) -> Result<U256> {
        Ok(self.quorum_denominator)
    }
}
