//! Organization metadata written to the key/value registry

use alloy::primitives::Address;

use crate::contracts::IKeyValuePairs;
use crate::types::{Call, OrganizationDescriptor};

use super::PlanOptions;

pub const DAO_NAME_KEY: &str = "daoName";
pub const SNAPSHOT_ENS_KEY: &str = "snapshotENS";

fn update_value(registry: Address, key: &str, value: &str) -> Call {
    Call::typed(
        registry,
        IKeyValuePairs::updateValuesCall {
            _keys: vec![key.to_string()],
            _values: vec![value.to_string()],
        },
    )
}

/// Name and snapshot updates, each only when requested
pub fn metadata_calls(
    registry: Address,
    descriptor: &OrganizationDescriptor,
    options: &PlanOptions,
) -> Vec<Call> {
    let mut calls = Vec::new();

    if options.set_name {
        calls.push(update_value(registry, DAO_NAME_KEY, &descriptor.name));
    }

    if options.set_snapshot {
        match &descriptor.snapshot_ens {
            Some(ens) => calls.push(update_value(registry, SNAPSHOT_ENS_KEY, ens)),
            None => tracing::warn!("snapshot update requested but no snapshot ENS is configured"),
        }
    }

    calls
}
