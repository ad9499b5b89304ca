//! Ordered batch of calls and its MultiSend packing
//!
//! Each packed entry is `operation (1) | to (20) | value (32) | data length (32) | data`.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::Serialize;

use super::Call;
use crate::contracts::IMultiSendCallOnly;

/// Fixed header size of one packed entry
pub const ENTRY_HEADER_LEN: usize = 1 + 20 + 32 + 32;

/// An ordered sequence of calls executed atomically by a MultiSend relay.
///
/// Order is preserved exactly as pushed: no sorting, no deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchEnvelope {
    calls: Vec<Call>,
}

impl BatchEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call to the end of the batch
    pub fn push(&mut self, call: Call) {
        self.calls.push(call);
    }

    /// Calls in execution order
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Index of the first call matching `predicate`
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(predicate)
    }

    /// Packed MultiSend payload of every call, in order
    pub fn encode(&self) -> Bytes {
        let size = self
            .calls
            .iter()
            .map(|call| ENTRY_HEADER_LEN + call.data.len())
            .sum();
        let mut packed = Vec::with_capacity(size);

        for call in &self.calls {
            packed.push(call.operation.as_u8());
            packed.extend_from_slice(call.to.as_slice());
            packed.extend_from_slice(&call.value.to_be_bytes::<32>());
            packed.extend_from_slice(&U256::from(call.data.len()).to_be_bytes::<32>());
            packed.extend_from_slice(&call.data);
        }

        packed.into()
    }

    /// `multiSend(bytes)` calldata wrapping the packed payload
    pub fn multisend_calldata(&self) -> Bytes {
        IMultiSendCallOnly::multiSendCall {
            transactions: self.encode(),
        }
        .abi_encode()
        .into()
    }

    /// The whole batch as a single delegate call into `relay`
    pub fn as_delegate_call(&self, relay: Address) -> Call {
        Call::delegate_call(relay, self.multisend_calldata())
    }
}

impl Extend<Call> for BatchEnvelope {
    fn extend<T: IntoIterator<Item = Call>>(&mut self, iter: T) {
        self.calls.extend(iter);
    }
}

impl FromIterator<Call> for BatchEnvelope {
    fn from_iter<T: IntoIterator<Item = Call>>(iter: T) -> Self {
        Self {
            calls: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BatchEnvelope {
    type Item = &'a Call;
    type IntoIter = std::slice::Iter<'a, Call>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}
