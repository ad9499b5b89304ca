//! Per-module deployment builders
//!
//! Each builder owns one or more [`ModuleSlot`]s: it computes the module's
//! initializer, predicts its clone address, and emits the deployment call plus
//! any post-deployment configuration calls. Builders never reach into each
//! other; the assembler passes predicted addresses between them.

mod ancillary;
mod claim;
mod freeze;
mod governance;
mod slot;
mod strategy;
mod token;

pub use ancillary::FractalModuleBuilder;
pub use claim::ClaimBuilder;
pub use freeze::{FreezeBuilder, FreezeVotingFlavor, GuardHost};
pub use governance::GovernanceBuilder;
pub use slot::{ModuleSlot, SlotState};
pub use strategy::{quorum_numerator, StrategyBuilder};
pub use token::{allocations_with_remainder, TokenBuilder};
