//! Linear voting strategy deployment

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};

use super::ModuleSlot;
use crate::chain::ModuleTemplates;
use crate::contracts::{
    ILinearERC20Voting, ILinearERC721Voting, BASIS_NUMERATOR, PROPOSER_WEIGHT, SENTINEL_MODULE,
};
use crate::error::{Error, Result};
use crate::reader::ConstantReader;
use crate::types::{AzoriusGovernance, Call, Erc721Voting, VotingStrategyKind};

const MODULE: &str = "voting strategy";

/// Quorum numerator for a percentage of the template's denominator, rounded down
pub fn quorum_numerator(percentage: U256, denominator: U256) -> Result<U256> {
    if percentage > U256::from(100) {
        return Err(Error::Configuration(format!(
            "quorum percentage {percentage} is above 100"
        )));
    }

    percentage
        .checked_mul(denominator)
        .map(|scaled| scaled / U256::from(100))
        .ok_or_else(|| Error::config("quorum numerator overflows uint256"))
}

/// The organization's voting strategy clone
#[derive(Debug, Clone)]
pub struct StrategyBuilder {
    kind: VotingStrategyKind,
    slot: ModuleSlot,
}

impl StrategyBuilder {
    /// Builds the strategy for `governance`.
    ///
    /// ERC20 strategies read the quorum denominator from the template first;
    /// `token` must then be the votes token address.
    pub async fn prepare<R: ConstantReader>(
        governance: &AzoriusGovernance,
        templates: &ModuleTemplates,
        safe: Address,
        token: Option<Address>,
        reader: &R,
        nonce: U256,
    ) -> Result<Self> {
        match governance.voting_strategy {
            VotingStrategyKind::LinearErc20 => {
                let erc20 = governance.erc20.as_ref().ok_or_else(|| {
                    Error::config("ERC20 voting strategy requires erc20 parameters")
                })?;
                let token = token
                    .ok_or_else(|| Error::config("ERC20 voting strategy requires a votes token"))?;

                let denominator = reader
                    .quorum_denominator(templates.linear_voting_erc20)
                    .await?;
                let numerator = quorum_numerator(erc20.quorum_percentage, denominator)?;

                Self::erc20(templates, safe, token, governance.voting_period, numerator, nonce)
            }
            VotingStrategyKind::LinearErc721 => {
                let erc721 = governance.erc721.as_ref().ok_or_else(|| {
                    Error::config("ERC721 voting strategy requires erc721 parameters")
                })?;

                Self::erc721(templates, safe, erc721, governance.voting_period, nonce)
            }
            kind => Err(Error::UnsupportedVariant(format!(
                "{kind} cannot be deployed as an organization's own voting strategy"
            ))),
        }
    }

    pub fn erc20(
        templates: &ModuleTemplates,
        safe: Address,
        token: Address,
        voting_period: u32,
        quorum_numerator: U256,
        nonce: U256,
    ) -> Result<Self> {
        let params = (
            safe,
            token,
            SENTINEL_MODULE,
            voting_period,
            U256::from(PROPOSER_WEIGHT),
            quorum_numerator,
            U256::from(BASIS_NUMERATOR),
        )
            .abi_encode_params();

        let initializer: Bytes = ILinearERC20Voting::setUpCall {
            initializeParams: params.into(),
        }
        .abi_encode()
        .into();

        Ok(Self {
            kind: VotingStrategyKind::LinearErc20,
            slot: ModuleSlot::with_initializer(
                MODULE,
                templates.module_proxy_factory,
                templates.linear_voting_erc20,
                nonce,
                initializer,
            )?,
        })
    }

    pub fn erc721(
        templates: &ModuleTemplates,
        safe: Address,
        voting: &Erc721Voting,
        voting_period: u32,
        nonce: U256,
    ) -> Result<Self> {
        if voting.nfts.is_empty() {
            return Err(Error::config("ERC721 voting strategy requires at least one NFT"));
        }

        let (tokens, weights): (Vec<Address>, Vec<U256>) = voting
            .nfts
            .iter()
            .map(|nft| (nft.token_address, nft.token_weight))
            .unzip();

        let params = (
            safe,
            tokens,
            weights,
            SENTINEL_MODULE,
            voting_period,
            voting.quorum_threshold,
            U256::from(PROPOSER_WEIGHT),
            U256::from(BASIS_NUMERATOR),
        )
            .abi_encode_params();

        let initializer: Bytes = ILinearERC721Voting::setUpCall {
            initializeParams: params.into(),
        }
        .abi_encode()
        .into();

        Ok(Self {
            kind: VotingStrategyKind::LinearErc721,
            slot: ModuleSlot::with_initializer(
                MODULE,
                templates.module_proxy_factory,
                templates.linear_voting_erc721,
                nonce,
                initializer,
            )?,
        })
    }

    pub fn kind(&self) -> VotingStrategyKind {
        self.kind
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

    /// Points the strategy at its Azorius module, replacing the sentinel
    pub fn set_azorius_call(&mut self, azorius: Address) -> Result<Call> {
        let strategy = self.slot.address()?;
        self.slot.mark_configured()?;

        Ok(match self.kind {
            VotingStrategyKind::LinearErc721 => Call::typed(
                strategy,
                ILinearERC721Voting::setAzoriusCall {
                    azoriusModule: azorius,
                },
            ),
            _ => Call::typed(
                strategy,
                ILinearERC20Voting::setAzoriusCall {
                    azoriusModule: azorius,
                },
            ),
        })
    }
}
