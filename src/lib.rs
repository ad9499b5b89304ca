//! # safe-dao
//!
//! Plans the deployment of a DAO around a Safe v1.4.1 as one atomic
//! transaction.
//!
//! ## Features
//!
//! - CREATE2 prediction of every module clone before anything is deployed
//! - Azorius governance with ERC20 or ERC721 linear voting
//! - Sub-organizations guarded by their parent through freeze voting
//! - Owner rewiring authorized by the MultiSend relay in the same transaction
//! - Reproducible plans through an injected nonce source
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use safe_dao::{
//!     ChainConfig, OrganizationAssembler, OsEntropy, PlanOptions, ProviderReader,
//!     SafeDeployment, SafeTarget,
//! };
//!
//! let reader = ProviderReader::new(provider);
//! let mut assembler = OrganizationAssembler::new(&config, &reader, OsEntropy);
//!
//! // The Safe starts out owned by the relay
//! let owners = assembler.initial_owners(&descriptor)?;
//! let deployment = SafeDeployment::new(&config.addresses, owners, 1, salt_nonce, &creation_code);
//!
//! let plan = assembler
//!     .build_organization_plan(&descriptor, &SafeTarget::New(deployment), &PlanOptions::default())
//!     .await?;
//!
//! // One call to the relay deploys and wires everything
//! let tx = plan.transaction();
//! ```
//!
//! ## Plan layout
//!
//! The outer batch runs from the MultiSend relay: Safe creation, module
//! deployments, then a single `execTransaction` on the Safe that runs the
//! inner batch. The inner batch wires modules, installs guards, hands
//! ownership to governance, and removes the relay last.

pub mod builders;
pub mod chain;
pub mod contracts;
pub mod create2;
pub mod entropy;
pub mod error;
pub mod plan;
pub mod reader;
pub mod signing;
pub mod types;

// Re-export main types at crate root
pub use builders::{FreezeVotingFlavor, ModuleSlot, SlotState};
pub use chain::{ChainAddresses, ChainConfig, ModuleTemplates};
pub use contracts::{IMultiSendCallOnly, IModuleProxyFactory, ISafe, ISafeProxyFactory};
pub use create2::{predict_module_address, SafeDeployment};
pub use entropy::{NonceSource, OsEntropy, SeededEntropy};
pub use error::{Error, Result};
pub use plan::{OrganizationAssembler, OrganizationPlan, PlanOptions, PredictedAddresses, SafeTarget};
pub use reader::{ConstantReader, FixedReader, ProviderReader};
pub use signing::with_relay_approval;
pub use types::{BatchEnvelope, Call, Governance, Operation, OrganizationDescriptor};

// Re-export alloy types that are commonly used
pub use alloy::network::AnyNetwork;
pub use alloy::primitives::{Address, Bytes, U256};
pub use alloy::providers::Provider;
