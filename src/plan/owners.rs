//! Safe owner rewiring calls
//!
//! Safe keeps its owners in a singly linked list headed by a sentinel.
//! `addOwnerWithThreshold` inserts at the head; `removeOwner` needs the owner
//! that points at the one being removed.

use alloy::primitives::{Address, U256};

use crate::contracts::ISafe;
use crate::types::Call;

/// `safe.addOwnerWithThreshold(owner, threshold)`
pub fn add_owner_call(safe: Address, owner: Address, threshold: u64) -> Call {
    Call::typed(
        safe,
        ISafe::addOwnerWithThresholdCall {
            owner,
            _threshold: U256::from(threshold),
        },
    )
}

/// `safe.removeOwner(prev, owner, threshold)`
pub fn remove_owner_call(safe: Address, prev: Address, owner: Address, threshold: u64) -> Call {
    Call::typed(
        safe,
        ISafe::removeOwnerCall {
            prevOwner: prev,
            owner,
            _threshold: U256::from(threshold),
        },
    )
}
