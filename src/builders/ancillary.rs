//! Fractal module: lets a parent organization execute through the child Safe

use alloy::primitives::{Address, U256};
use alloy::sol_types::{SolCall, SolValue};

use super::ModuleSlot;
use crate::chain::ModuleTemplates;
use crate::contracts::{IFractalModule, ISafe};
use crate::error::Result;
use crate::types::Call;

#[derive(Debug, Clone)]
pub struct FractalModuleBuilder {
    slot: ModuleSlot,
}

impl FractalModuleBuilder {
    pub fn new(templates: &ModuleTemplates, safe: Address, parent: Address, nonce: U256) -> Result<Self> {
        // owner, avatar, target, controllers
        let params = (parent, safe, safe, Vec::<Address>::new()).abi_encode_params();
        let initializer = IFractalModule::setUpCall {
            initializeParams: params.into(),
        }
        .abi_encode();

        Ok(Self {
            slot: ModuleSlot::with_initializer(
                "fractal module",
                templates.module_proxy_factory,
                templates.fractal_module,
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

    /// `safe.enableModule(fractal)`
    pub fn enable_module_call(&mut self, safe: Address) -> Result<Call> {
        let module = self.slot.address()?;
        self.slot.mark_configured()?;
        Ok(Call::typed(safe, ISafe::enableModuleCall { module }))
    }
}
