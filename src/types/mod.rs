//! Type definitions for DAO deployment plans

mod call;
mod descriptor;
mod envelope;

pub use call::{Call, Operation};
pub use descriptor::{
    AzoriusGovernance, Erc20Voting, Erc721Voting, FreezeParams, Governance, MultisigGovernance,
    NewToken, NftWeight, OrganizationDescriptor, ParentLink, TokenAllocation, TokenSource,
    VotingStrategyKind,
};
pub use envelope::{BatchEnvelope, ENTRY_HEADER_LEN};
