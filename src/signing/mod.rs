//! Synthetic approvals for Safe execution

mod approval;

pub use approval::{relay_approval, with_relay_approval, PRE_VALIDATED_MARKER, SIGNATURE_LEN};
