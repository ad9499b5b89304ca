//! Chain configuration: Safe contract addresses and DAO module templates

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Canonical Safe v1.4.1 contract addresses
/// These addresses are the same across all supported chains (CREATE2 deployment)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAddresses {
    /// Safe singleton address
    pub safe_singleton: Address,
    /// MultiSendCallOnly contract address, the batch relay
    pub multi_send_call_only: Address,
    /// Safe proxy factory address
    pub proxy_factory: Address,
    /// Compatibility fallback handler
    pub fallback_handler: Address,
}

impl Default for ChainAddresses {
    fn default() -> Self {
        Self::v1_4_1()
    }
}

impl ChainAddresses {
    /// Returns the canonical Safe v1.4.1 addresses
    pub fn v1_4_1() -> Self {
        Self {
            safe_singleton: address!("41675C099F32341bf84BFc5382aF534df5C7461a"),
            multi_send_call_only: address!("9641d764fc13c8B624c04430C7356C1C7C8102e2"),
            proxy_factory: address!("4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67"),
            fallback_handler: address!("fd0732Dc9E303f09fCEf3a7388Ad10A83459Ec99"),
        }
    }
}

/// Addresses of the module proxy factory and every module template.
///
/// These are per-deployment constants; they are never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTemplates {
    /// Zodiac module proxy factory that clones every template below
    pub module_proxy_factory: Address,
    /// On-chain key/value registry used for DAO metadata
    pub key_value_pairs: Address,
    pub azorius: Address,
    pub linear_voting_erc20: Address,
    pub linear_voting_erc721: Address,
    pub votes_erc20: Address,
    /// Only required when deploying locked tokens
    #[serde(default)]
    pub votes_erc20_lockable: Option<Address>,
    pub claim_erc20: Address,
    pub freeze_guard_azorius: Address,
    pub freeze_guard_multisig: Address,
    pub freeze_voting_erc20: Address,
    pub freeze_voting_erc721: Address,
    pub freeze_voting_multisig: Address,
    pub fractal_module: Address,
}

/// Chain configuration including addresses and chain ID
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Safe contract addresses
    #[serde(default)]
    pub addresses: ChainAddresses,
    /// Module templates
    pub templates: ModuleTemplates,
}

impl ChainConfig {
    /// Creates a new chain configuration with canonical v1.4.1 Safe addresses
    pub fn new(chain_id: u64, templates: ModuleTemplates) -> Self {
        Self {
            chain_id,
            addresses: ChainAddresses::v1_4_1(),
            templates,
        }
    }

    /// The batch relay address, which temporarily owns every new Safe
    pub fn relay(&self) -> Address {
        self.addresses.multi_send_call_only
    }
}
