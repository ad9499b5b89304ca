//! Parent token claim module deployment

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};

use super::ModuleSlot;
use crate::chain::ModuleTemplates;
use crate::contracts::IERC20Claim;
use crate::error::{Error, Result};
use crate::types::Call;

const MODULE: &str = "token claim";

/// Lets holders of the parent token claim a share of the child token.
///
/// `setUp` pulls the allocation from the Safe, so the Safe's approval of the
/// claim address must execute before the claim is deployed.
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    slot: ModuleSlot,
    amount: U256,
}

impl ClaimBuilder {
    pub fn new(
        templates: &ModuleTemplates,
        safe: Address,
        parent_token: Address,
        child_token: Address,
        amount: U256,
        nonce: U256,
    ) -> Result<Self> {
        if amount.is_zero() {
            return Err(Error::config("claim allocation must be non-zero"));
        }

        // deadline 0: claimable forever
        let params = (0u32, safe, parent_token, child_token, amount).abi_encode_params();
        let initializer: Bytes = IERC20Claim::setUpCall {
            initializeParams: params.into(),
        }
        .abi_encode()
        .into();

        Ok(Self {
            slot: ModuleSlot::with_initializer(
                MODULE,
                templates.module_proxy_factory,
                templates.claim_erc20,
                nonce,
                initializer,
            )?,
            amount,
        })
    }

    pub fn slot(&self) -> &ModuleSlot {
        &self.slot
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    pub fn address(&self) -> Result<Address> {
        self.slot.address()
    }

    pub fn deployment_call(&self) -> Result<Call> {
        self.slot.deployment_call()
    }
}
