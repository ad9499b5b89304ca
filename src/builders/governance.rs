//! Azorius governance module deployment

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};

use super::ModuleSlot;
use crate::chain::ModuleTemplates;
use crate::contracts::{IAzorius, ISafe};
use crate::error::Result;
use crate::types::Call;

const MODULE: &str = "azorius";

/// The Azorius module clone, owned by and targeting the organization's Safe
#[derive(Debug, Clone)]
pub struct GovernanceBuilder {
    slot: ModuleSlot,
}

impl GovernanceBuilder {
    /// `strategy` must already be predicted; it is the module's only strategy
    pub fn new(
        templates: &ModuleTemplates,
        safe: Address,
        strategy: Address,
        timelock: u32,
        execution_period: u32,
        nonce: U256,
    ) -> Result<Self> {
        // owner, avatar, target, strategies, timelock period, execution period
        let params = (safe, safe, safe, vec![strategy], timelock, execution_period)
            .abi_encode_params();

        let initializer: Bytes = IAzorius::setUpCall {
            initializeParams: params.into(),
        }
        .abi_encode()
        .into();

        Ok(Self {
            slot: ModuleSlot::with_initializer(
                MODULE,
                templates.module_proxy_factory,
                templates.azorius,
                nonce,
                initializer,
            )?,
        })
    }

    pub fn slot(&self) -> &ModuleSlot {
        &self.slot
    }

    pub fn address(&self) -> Result<Address> {
        self.slot.address()
    }

    pub fn deployment_call(&self) -> Result<Call> {
        self.slot.deployment_call()
    }

    /// `safe.enableModule(azorius)`
    pub fn enable_module_call(&mut self, safe: Address) -> Result<Call> {
        let module = self.slot.address()?;
        self.slot.mark_configured()?;
        Ok(Call::typed(safe, ISafe::enableModuleCall { module }))
    }

    /// `azorius.setGuard(guard)`
    pub fn set_guard_call(&self, guard: Address) -> Result<Call> {
        Ok(Call::typed(self.slot.address()?, IAzorius::setGuardCall { guard }))
    }
}
