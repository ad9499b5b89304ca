//! Atomic call types

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

/// How a batch entry is executed by the relay or Safe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Operation {
    /// Regular call (default)
    #[default]
    Call = 0,
    /// Delegate call into a batch relay, executed in the caller's context
    DelegateCall = 1,
}

impl Operation {
    /// Returns the operation as a u8 value
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl From<Operation> for u8 {
    fn from(op: Operation) -> Self {
        op.as_u8()
    }
}

/// One entry of a batch: target, value, calldata and operation.
///
/// Calls are immutable values; their position within a batch is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Target address
    pub to: Address,
    /// Value to send
    pub value: U256,
    /// Calldata
    pub data: Bytes,
    /// Operation type
    pub operation: Operation,
}

impl Call {
    /// Creates a new Call with the given parameters
    pub fn new(to: Address, value: U256, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value,
            data: data.into(),
            operation: Operation::Call,
        }
    }

    /// Creates a new Call with zero value
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self::new(to, U256::ZERO, data)
    }

    /// Creates a zero-value Call from a `sol!` generated call type
    pub fn typed<C: SolCall>(to: Address, call: C) -> Self {
        Self::call(to, call.abi_encode())
    }

    /// Creates a new delegate call
    pub fn delegate_call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data: data.into(),
            operation: Operation::DelegateCall,
        }
    }

    /// Returns the 4-byte selector of the calldata, if any
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4).and_then(|s| s.try_into().ok())
    }

    /// Returns true if this call targets `to` with the selector of `C`
    pub fn is_call_to<C: SolCall>(&self, to: Address) -> bool {
        self.to == to && self.selector() == Some(C::SELECTOR)
    }

    /// Decodes the calldata as `C`
    pub fn decode<C: SolCall>(&self) -> crate::Result<C> {
        Ok(C::abi_decode(&self.data)?)
    }
}
