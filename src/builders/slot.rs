//! Write-once deployment slot shared by every module builder

use alloy::primitives::{Address, Bytes, U256};

use crate::contracts::IModuleProxyFactory;
use crate::create2::predict_module_address;
use crate::error::{Error, Result};
use crate::types::Call;

/// Readiness of a module slot. Transitions only move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing computed yet
    Uninitialized,
    /// Initializer computed; the deployment call can be built
    PayloadReady { initializer: Bytes },
    /// Address predicted; peers may reference it
    Predicted { initializer: Bytes, address: Address },
    /// Post-deployment configuration has been emitted
    Configured { initializer: Bytes, address: Address },
}

impl SlotState {
    fn name(&self) -> &'static str {
        match self {
            SlotState::Uninitialized => "uninitialized",
            SlotState::PayloadReady { .. } => "payload ready",
            SlotState::Predicted { .. } => "predicted",
            SlotState::Configured { .. } => "configured",
        }
    }
}

/// One clone deployment through the module proxy factory.
///
/// The nonce is fixed at construction; the initializer and address are
/// write-once and are never patched after being computed.
#[derive(Debug, Clone)]
pub struct ModuleSlot {
    module: &'static str,
    factory: Address,
    template: Address,
    nonce: U256,
    state: SlotState,
}

impl ModuleSlot {
    pub fn new(module: &'static str, factory: Address, template: Address, nonce: U256) -> Self {
        Self {
            module,
            factory,
            template,
            nonce,
            state: SlotState::Uninitialized,
        }
    }

    /// Computes the initializer and predicts the address in one step
    pub fn with_initializer(
        module: &'static str,
        factory: Address,
        template: Address,
        nonce: U256,
        initializer: impl Into<Bytes>,
    ) -> Result<Self> {
        let mut slot = Self::new(module, factory, template, nonce);
        slot.set_initializer(initializer)?;
        slot.predict()?;
        Ok(slot)
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    pub fn template(&self) -> Address {
        self.template
    }

    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    /// Uninitialized -> PayloadReady
    pub fn set_initializer(&mut self, initializer: impl Into<Bytes>) -> Result<()> {
        match self.state {
            SlotState::Uninitialized => {
                self.state = SlotState::PayloadReady {
                    initializer: initializer.into(),
                };
                Ok(())
            }
            _ => Err(self.already()),
        }
    }

    /// PayloadReady -> Predicted. Predicting again returns the same address.
    pub fn predict(&mut self) -> Result<Address> {
        match &self.state {
            SlotState::Uninitialized => Err(Error::NotYetInitialized {
                module: self.module,
            }),
            SlotState::PayloadReady { initializer } => {
                let initializer = initializer.clone();
                let address =
                    predict_module_address(self.factory, self.template, &initializer, self.nonce);
                tracing::debug!(module = self.module, %address, "predicted module address");
                self.state = SlotState::Predicted {
                    initializer,
                    address,
                };
                Ok(address)
            }
            SlotState::Predicted { address, .. } | SlotState::Configured { address, .. } => {
                Ok(*address)
            }
        }
    }

    /// Predicted -> Configured. Each slot is configured at most once.
    pub fn mark_configured(&mut self) -> Result<()> {
        match &self.state {
            SlotState::Predicted {
                initializer,
                address,
            } => {
                self.state = SlotState::Configured {
                    initializer: initializer.clone(),
                    address: *address,
                };
                Ok(())
            }
            SlotState::Configured { .. } => Err(self.already()),
            _ => Err(Error::NotYetPredicted {
                module: self.module,
            }),
        }
    }

    /// Predicted address; fails before prediction
    pub fn address(&self) -> Result<Address> {
        match &self.state {
            SlotState::Predicted { address, .. } | SlotState::Configured { address, .. } => {
                Ok(*address)
            }
            _ => Err(Error::NotYetPredicted {
                module: self.module,
            }),
        }
    }

    pub fn initializer(&self) -> Result<&Bytes> {
        match &self.state {
            SlotState::Uninitialized => Err(Error::NotYetInitialized {
                module: self.module,
            }),
            SlotState::PayloadReady { initializer }
            | SlotState::Predicted { initializer, .. }
            | SlotState::Configured { initializer, .. } => Ok(initializer),
        }
    }

    /// `deployModule(template, initializer, nonce)` on the module proxy factory
    pub fn deployment_call(&self) -> Result<Call> {
        let initializer = self.initializer()?.clone();
        Ok(Call::typed(
            self.factory,
            IModuleProxyFactory::deployModuleCall {
                masterCopy: self.template,
                initializer,
                saltNonce: self.nonce,
            },
        ))
    }

    fn already(&self) -> Error {
        Error::AlreadyInitialized {
            module: self.module,
            state: self.state.name(),
        }
    }
}
