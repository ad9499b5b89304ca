//! Freeze voting and freeze guard deployment for sub-organizations
//!
//! A child organization is guarded by its parent: the parent can vote to
//! freeze the child, and the guard blocks the child's execution while frozen.
//! The freeze voting clone is deployed with a harmless `owner()` initializer
//! and set up by a separate call once its address is known to the guard.

use std::fmt;

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};

use super::ModuleSlot;
use crate::chain::ModuleTemplates;
use crate::contracts::{IAzorius, IFreezeGuard, IFreezeVoting, ISafe};
use crate::error::{Error, Result};
use crate::types::{Call, ParentLink, VotingStrategyKind};

/// Which freeze voting template matches the parent's governance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeVotingFlavor {
    Erc20,
    Erc721,
    Multisig,
}

impl FreezeVotingFlavor {
    /// A parent without a voting strategy is a multisig
    pub fn for_parent(kind: Option<VotingStrategyKind>) -> Self {
        match kind {
            None => FreezeVotingFlavor::Multisig,
            Some(kind) if kind.is_erc721() => FreezeVotingFlavor::Erc721,
            Some(_) => FreezeVotingFlavor::Erc20,
        }
    }

    pub fn template(&self, templates: &ModuleTemplates) -> Address {
        match self {
            FreezeVotingFlavor::Erc20 => templates.freeze_voting_erc20,
            FreezeVotingFlavor::Erc721 => templates.freeze_voting_erc721,
            FreezeVotingFlavor::Multisig => templates.freeze_voting_multisig,
        }
    }

    /// Where freeze votes are counted: the parent's strategy, token or Safe
    fn vote_source(&self, parent: &ParentLink) -> Result<Address> {
        match self {
            FreezeVotingFlavor::Erc721 => parent.strategy_address.ok_or_else(|| {
                Error::config("ERC721 parent requires its voting strategy address")
            }),
            FreezeVotingFlavor::Erc20 => parent
                .token
                .ok_or_else(|| Error::config("ERC20 parent requires its votes token address")),
            FreezeVotingFlavor::Multisig => Ok(parent.address),
        }
    }
}

impl fmt::Display for FreezeVotingFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreezeVotingFlavor::Erc20 => write!(f, "erc20"),
            FreezeVotingFlavor::Erc721 => write!(f, "erc721"),
            FreezeVotingFlavor::Multisig => write!(f, "multisig"),
        }
    }
}

/// Contract that installs the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardHost {
    /// Guard the Azorius module's proposal execution
    Azorius(Address),
    /// Guard the Safe's own transactions
    Safe(Address),
}

#[derive(Debug, Clone)]
pub struct FreezeBuilder {
    flavor: FreezeVotingFlavor,
    host: GuardHost,
    voting: ModuleSlot,
    voting_setup: Bytes,
    guard: ModuleSlot,
}

impl FreezeBuilder {
    /// Predicts the freeze voting clone, then the guard that references it.
    ///
    /// `azorius` selects the Azorius guard; without it the multisig guard is
    /// installed on `safe` directly.
    pub fn new(
        templates: &ModuleTemplates,
        safe: Address,
        parent: &ParentLink,
        azorius: Option<Address>,
        voting_nonce: U256,
        guard_nonce: U256,
    ) -> Result<Self> {
        let flavor = FreezeVotingFlavor::for_parent(parent.strategy_kind);
        let source = flavor.vote_source(parent)?;
        let freeze = &parent.freeze;

        let voting = ModuleSlot::with_initializer(
            "freeze voting",
            templates.module_proxy_factory,
            flavor.template(templates),
            voting_nonce,
            IFreezeVoting::ownerCall {}.abi_encode(),
        )?;
        let voting_address = voting.address()?;

        let voting_setup = IFreezeVoting::setUpCall {
            initializeParams: (
                parent.address,
                freeze.freeze_votes_threshold,
                freeze.freeze_proposal_period,
                freeze.freeze_period,
                source,
            )
                .abi_encode_params()
                .into(),
        }
        .abi_encode()
        .into();

        let (host, template, guard_params) = match azorius {
            Some(azorius) => (
                GuardHost::Azorius(azorius),
                templates.freeze_guard_azorius,
                (parent.address, voting_address).abi_encode_params(),
            ),
            None => (
                GuardHost::Safe(safe),
                templates.freeze_guard_multisig,
                (
                    freeze.timelock_period,
                    freeze.execution_period,
                    parent.address,
                    voting_address,
                    safe,
                )
                    .abi_encode_params(),
            ),
        };

        let guard = ModuleSlot::with_initializer(
            "freeze guard",
            templates.module_proxy_factory,
            template,
            guard_nonce,
            IFreezeGuard::setUpCall {
                initializeParams: guard_params.into(),
            }
            .abi_encode(),
        )?;

        tracing::debug!(%flavor, %source, "freeze voting configured against parent");

        Ok(Self {
            flavor,
            host,
            voting,
            voting_setup,
            guard,
        })
    }

    pub fn flavor(&self) -> FreezeVotingFlavor {
        self.flavor
    }

    pub fn host(&self) -> GuardHost {
        self.host
    }

    pub fn voting(&self) -> &ModuleSlot {
        &self.voting
    }

    pub fn guard(&self) -> &ModuleSlot {
        &self.guard
    }

    pub fn voting_address(&self) -> Result<Address> {
        self.voting.address()
    }

    pub fn guard_address(&self) -> Result<Address> {
        self.guard.address()
    }

    pub fn deploy_voting_call(&self) -> Result<Call> {
        self.voting.deployment_call()
    }

    /// `freezeVoting.setUp(parent, threshold, proposal period, freeze period, source)`
    pub fn voting_setup_call(&mut self) -> Result<Call> {
        let target = self.voting.address()?;
        self.voting.mark_configured()?;
        Ok(Call::call(target, self.voting_setup.clone()))
    }

    pub fn deploy_guard_call(&self) -> Result<Call> {
        self.guard.deployment_call()
    }

    /// Installs the guard on the Azorius module or on the Safe
    pub fn set_guard_call(&mut self) -> Result<Call> {
        let guard = self.guard.address()?;
        self.guard.mark_configured()?;

        Ok(match self.host {
            GuardHost::Azorius(azorius) => Call::typed(azorius, IAzorius::setGuardCall { guard }),
            GuardHost::Safe(safe) => Call::typed(safe, ISafe::setGuardCall { guard }),
        })
    }
}
