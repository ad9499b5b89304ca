//! Governance token deployment

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};

use super::ModuleSlot;
use crate::chain::ModuleTemplates;
use crate::contracts::{IVotesERC20, IVotesERC20V1};
use crate::error::{Error, Result};
use crate::types::{Call, NewToken, TokenAllocation, TokenSource};

const MODULE: &str = "votes token";

/// The organization's governance token: a new clone or an imported address
#[derive(Debug, Clone)]
pub enum TokenBuilder {
    /// A fresh votes token deployed from the (lockable) votes template
    Deployed { slot: ModuleSlot, locked: bool },
    /// An existing token; nothing is deployed
    Imported { address: Address },
}

impl TokenBuilder {
    pub fn new(
        source: &TokenSource,
        templates: &ModuleTemplates,
        safe: Address,
        nonce: U256,
    ) -> Result<Self> {
        match source {
            TokenSource::Imported { address } => Ok(TokenBuilder::Imported { address: *address }),
            TokenSource::New(token) => {
                let (template, initializer) = if token.locked {
                    let template = templates.votes_erc20_lockable.ok_or_else(|| {
                        Error::config("locked token requested but no lockable votes template is configured")
                    })?;
                    (template, locked_initializer(token, safe)?)
                } else {
                    (templates.votes_erc20, unlocked_initializer(token, safe)?)
                };

                let slot = ModuleSlot::with_initializer(
                    MODULE,
                    templates.module_proxy_factory,
                    template,
                    nonce,
                    initializer,
                )?;

                Ok(TokenBuilder::Deployed {
                    slot,
                    locked: token.locked,
                })
            }
        }
    }

    /// Predicted clone address, or the imported token
    pub fn address(&self) -> Result<Address> {
        match self {
            TokenBuilder::Deployed { slot, .. } => slot.address(),
            TokenBuilder::Imported { address } => Ok(*address),
        }
    }

    /// `None` for imported tokens
    pub fn deployment_call(&self) -> Result<Option<Call>> {
        match self {
            TokenBuilder::Deployed { slot, .. } => slot.deployment_call().map(Some),
            TokenBuilder::Imported { .. } => Ok(None),
        }
    }

    pub fn is_imported(&self) -> bool {
        matches!(self, TokenBuilder::Imported { .. })
    }

    /// Approves `spender` to pull `amount` of this token from the Safe
    pub fn approve_call(&self, spender: Address, amount: U256) -> Result<Call> {
        Ok(Call::typed(
            self.address()?,
            IVotesERC20::approveCall { spender, amount },
        ))
    }
}

/// Configured allocations plus the unallocated remainder assigned to the Safe.
///
/// Allocations summing to more than the supply are rejected.
pub fn allocations_with_remainder(token: &NewToken, safe: Address) -> Result<Vec<TokenAllocation>> {
    let mut allocated = U256::ZERO;
    for allocation in &token.allocations {
        allocated = allocated
            .checked_add(allocation.amount)
            .ok_or_else(|| Error::config("token allocations overflow uint256"))?;
    }

    if allocated > token.supply {
        return Err(Error::Configuration(format!(
            "token allocations ({allocated}) exceed total supply ({})",
            token.supply
        )));
    }

    let mut allocations = token.allocations.clone();
    if token.supply > allocated {
        allocations.push(TokenAllocation {
            address: safe,
            amount: token.supply - allocated,
        });
    }

    Ok(allocations)
}

fn unlocked_initializer(token: &NewToken, safe: Address) -> Result<Bytes> {
    let allocations = allocations_with_remainder(token, safe)?;
    let (holders, amounts): (Vec<Address>, Vec<U256>) =
        allocations.iter().map(|a| (a.address, a.amount)).unzip();

    let params = (token.name.clone(), token.symbol.clone(), holders, amounts).abi_encode_params();

    Ok(IVotesERC20::setUpCall {
        initializeParams: params.into(),
    }
    .abi_encode()
    .into())
}

fn locked_initializer(token: &NewToken, safe: Address) -> Result<Bytes> {
    let allocations = allocations_with_remainder(token, safe)?
        .into_iter()
        .map(|a| IVotesERC20V1::Allocation {
            to: a.address,
            amount: a.amount,
        })
        .collect();

    Ok(IVotesERC20V1::initializeCall {
        metadata_: IVotesERC20V1::Metadata {
            name: token.name.clone(),
            symbol: token.symbol.clone(),
        },
        allocations_: allocations,
        owner_: safe,
        locked_: true,
        maxTotalSupply_: token.max_total_supply,
    }
    .abi_encode()
    .into())
}
