//! Organization deployment plans
//!
//! A plan is two batches. The inner batch holds every call that must be
//! authorized by the Safe itself (module enabling, guard installation, owner
//! rewiring, token approvals). The outer batch creates the Safe, deploys the
//! module clones, executes the inner batch through the Safe with the relay's
//! pre-validated approval, and finally deploys anything that depends on the
//! inner batch having run.

mod assembler;
mod metadata;
mod owners;

pub use assembler::OrganizationAssembler;
pub use metadata::{metadata_calls, DAO_NAME_KEY, SNAPSHOT_ENS_KEY};
pub use owners::{add_owner_call, remove_owner_call};

use alloy::primitives::{Address, Bytes};
use serde::Serialize;

use crate::contracts::IMultiSendCallOnly;
use crate::create2::SafeDeployment;
use crate::types::{BatchEnvelope, Call};

/// The Safe an organization is built around
#[derive(Debug, Clone)]
pub enum SafeTarget {
    /// Create a fresh Safe in the outer batch
    New(SafeDeployment),
    /// Attach governance to a deployed Safe whose most recently added owner is the relay
    Existing { address: Address, owners: Vec<Address> },
}

impl SafeTarget {
    pub fn address(&self) -> Address {
        match self {
            SafeTarget::New(deployment) => deployment.address,
            SafeTarget::Existing { address, .. } => *address,
        }
    }

    /// Owners in linked-list order at the time the inner batch starts
    pub fn owners(&self) -> &[Address] {
        match self {
            SafeTarget::New(deployment) => &deployment.owners,
            SafeTarget::Existing { owners, .. } => owners,
        }
    }

    pub fn is_existing(&self) -> bool {
        matches!(self, SafeTarget::Existing { .. })
    }
}

/// Optional plan steps
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Write the organization name to the metadata registry
    pub set_name: bool,
    /// Write the snapshot ENS name to the metadata registry
    pub set_snapshot: bool,
}

/// Every address the plan deploys to or configures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedAddresses {
    pub safe: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azorius: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fractal_module: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze_voting: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze_guard: Option<Address>,
}

/// A fully assembled organization deployment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPlan {
    pub safe: Address,
    /// MultiSendCallOnly relay that submits the outer batch
    pub relay: Address,
    pub outer: BatchEnvelope,
    pub inner: BatchEnvelope,
    pub predicted: PredictedAddresses,
    /// Index of the Safe `execTransaction` wrapping `inner` within `outer`
    inner_index: usize,
}

impl OrganizationPlan {
    pub fn inner_index(&self) -> usize {
        self.inner_index
    }

    /// Packed MultiSend payload of the outer batch
    pub fn encode(&self) -> Bytes {
        self.outer.encode()
    }

    /// The single transaction to broadcast: `relay.multiSend(outer)`
    pub fn transaction(&self) -> Call {
        Call::typed(
            self.relay,
            IMultiSendCallOnly::multiSendCall {
                transactions: self.encode(),
            },
        )
    }

    /// Calls in the order they execute on chain, with the inner batch
    /// expanded in place of the Safe execution that runs it
    pub fn execution_order(&self) -> Vec<&Call> {
        let mut order = Vec::with_capacity(self.outer.len() + self.inner.len());
        for (index, call) in self.outer.calls().iter().enumerate() {
            if index == self.inner_index {
                order.extend(self.inner.calls());
            } else {
                order.push(call);
            }
        }
        order
    }
}
