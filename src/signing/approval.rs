//! Pre-validated relay approval for Safe execution
//!
//! A Safe accepts a signature whose `v` byte is 1 when `msg.sender` is the
//! owner named in the `r` slot. The batch relay is an owner of every Safe
//! being set up, so it can authorize the inner batch without any ECDSA key.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::contracts::ISafe;
use crate::types::{BatchEnvelope, Call};

/// Length of a single Safe signature: r (32) | s (32) | v (1)
pub const SIGNATURE_LEN: usize = 65;

/// Signature type byte meaning "caller is the signer and pre-approves"
pub const PRE_VALIDATED_MARKER: u8 = 1;

/// Encodes a pre-validated signature naming `relay` as the approving owner
pub fn relay_approval(relay: Address) -> Bytes {
    let mut sig_bytes = Vec::with_capacity(SIGNATURE_LEN);

    // r = owner address (left-padded to 32 bytes)
    let mut r = [0u8; 32];
    r[12..].copy_from_slice(relay.as_slice());
    sig_bytes.extend_from_slice(&r);

    // s = 0, no dynamic data offset
    sig_bytes.extend_from_slice(&[0u8; 32]);

    sig_bytes.push(PRE_VALIDATED_MARKER);

    Bytes::from(sig_bytes)
}

/// Wraps `inner` into a single `execTransaction` on `safe`, authorized by `relay`.
///
/// The Safe delegate-calls `relay.multiSend(inner)`, so every inner call runs
/// with the Safe as `msg.sender`. Valid only while `relay` is still an owner:
/// the inner batch must remove the relay last.
pub fn with_relay_approval(safe: Address, relay: Address, inner: &BatchEnvelope) -> Call {
    let batch = inner.as_delegate_call(relay);

    let exec = ISafe::execTransactionCall {
        to: batch.to,
        value: batch.value,
        data: batch.data,
        operation: batch.operation.as_u8(),
        safeTxGas: U256::ZERO,
        baseGas: U256::ZERO,
        gasPrice: U256::ZERO,
        gasToken: Address::ZERO,
        refundReceiver: Address::ZERO,
        signatures: relay_approval(relay),
    };

    Call::call(safe, exec.abi_encode())
}
