//! User-supplied organization configuration
//!
//! The descriptor is read-only input to planning. Builders only read it.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Voting strategy families known to the DAO contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VotingStrategyKind {
    /// Votes weighted by a fungible governance token
    LinearErc20,
    /// Votes weighted per NFT collection
    LinearErc721,
    LinearErc20HatsWhitelisting,
    LinearErc721HatsWhitelisting,
}

impl VotingStrategyKind {
    pub fn is_erc20(&self) -> bool {
        matches!(self, Self::LinearErc20 | Self::LinearErc20HatsWhitelisting)
    }

    pub fn is_erc721(&self) -> bool {
        matches!(self, Self::LinearErc721 | Self::LinearErc721HatsWhitelisting)
    }
}

impl std::fmt::Display for VotingStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LinearErc20 => "linearErc20",
            Self::LinearErc721 => "linearErc721",
            Self::LinearErc20HatsWhitelisting => "linearErc20HatsWhitelisting",
            Self::LinearErc721HatsWhitelisting => "linearErc721HatsWhitelisting",
        };
        f.write_str(name)
    }
}

/// Complete description of the organization to deploy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDescriptor {
    /// Display name, written to the metadata registry when requested
    pub name: String,
    /// Snapshot ENS name, written to the metadata registry when requested
    #[serde(default)]
    pub snapshot_ens: Option<String>,
    pub governance: Governance,
    /// Set for sub-organizations only
    #[serde(default)]
    pub parent: Option<ParentLink>,
}

impl OrganizationDescriptor {
    pub fn is_sub_organization(&self) -> bool {
        self.parent.is_some()
    }
}

/// How the organization makes decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Governance {
    /// Plain Safe multisig, no governance module
    Multisig(MultisigGovernance),
    /// Azorius governance module driven by a voting strategy
    Azorius(AzoriusGovernance),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigGovernance {
    /// Safe signers, in setup order
    pub trusted_addresses: Vec<Address>,
    pub signature_threshold: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzoriusGovernance {
    pub voting_strategy: VotingStrategyKind,
    /// Voting period in blocks
    pub voting_period: u32,
    /// Timelock period in blocks
    pub timelock: u32,
    /// Execution period in blocks
    pub execution_period: u32,
    /// Required for ERC20 strategies
    #[serde(default)]
    pub erc20: Option<Erc20Voting>,
    /// Required for ERC721 strategies
    #[serde(default)]
    pub erc721: Option<Erc721Voting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Voting {
    pub token: TokenSource,
    /// Quorum as a percentage of total voting weight (0-100)
    pub quorum_percentage: U256,
    /// Parent token amount made claimable by this organization's token holders
    #[serde(default)]
    pub parent_allocation_amount: U256,
}

/// Where the governance token comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum TokenSource {
    /// Deploy a fresh votes token
    New(NewToken),
    /// Reuse an already deployed votes token
    Imported { address: Address },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewToken {
    pub name: String,
    pub symbol: String,
    /// Total supply; anything not allocated goes to the Safe
    pub supply: U256,
    #[serde(default)]
    pub allocations: Vec<TokenAllocation>,
    /// Locked tokens are transferable only by the owning Safe
    #[serde(default)]
    pub locked: bool,
    /// Mint cap, only used by locked tokens
    #[serde(default)]
    pub max_total_supply: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAllocation {
    pub address: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc721Voting {
    pub nfts: Vec<NftWeight>,
    /// Absolute voting weight needed to reach quorum
    pub quorum_threshold: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftWeight {
    pub token_address: Address,
    pub token_weight: U256,
}

/// Link from a sub-organization to its parent.
///
/// The parent is referenced, never owned; these addresses only feed the
/// freeze voting, freeze guard and claim parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentLink {
    /// Parent Safe address
    pub address: Address,
    /// Parent governance token, if the parent votes with an ERC20
    #[serde(default)]
    pub token: Option<Address>,
    /// Parent voting strategy kind; `None` for a multisig parent
    #[serde(default)]
    pub strategy_kind: Option<VotingStrategyKind>,
    /// Parent voting strategy address, required for ERC721 parents
    #[serde(default)]
    pub strategy_address: Option<Address>,
    pub freeze: FreezeParams,
    /// Deploy and enable the Fractal module so the parent can act through the child
    #[serde(default)]
    pub attach_fractal_module: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeParams {
    /// Votes needed to freeze the child
    pub freeze_votes_threshold: U256,
    /// Blocks a freeze proposal stays open
    pub freeze_proposal_period: u32,
    /// Blocks a successful freeze lasts
    pub freeze_period: u32,
    /// Multisig guard timelock, in seconds
    #[serde(default)]
    pub timelock_period: u32,
    /// Multisig guard execution window, in seconds
    #[serde(default)]
    pub execution_period: u32,
}
