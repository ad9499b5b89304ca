//! Sub-organization plans guarded by a parent

use alloy::primitives::{Address, U256};
use alloy::sol_types::{sol_data, SolCall, SolType};
use safe_dao::contracts::{
    IAzorius, IERC20Claim, IFractalModule, IFreezeVoting, IModuleProxyFactory, ISafe, IVotesERC20,
};
use safe_dao::types::{Erc20Voting, Governance, VotingStrategyKind};
use safe_dao::{Error, OrganizationPlan};

use crate::common::*;

type VotingSetupParams = (
    sol_data::Address,
    sol_data::Uint<256>,
    sol_data::Uint<32>,
    sol_data::Uint<32>,
    sol_data::Address,
);

type ClaimParams = (
    sol_data::Uint<32>,
    sol_data::Address,
    sol_data::Address,
    sol_data::Address,
    sol_data::Uint<256>,
);

/// Decoded `setUp` params of the freeze voting clone
fn voting_setup(plan: &OrganizationPlan) -> (Address, U256, u32, u32, Address) {
    let voting = plan.predicted.freeze_voting.unwrap();
    let call = plan
        .inner
        .calls()
        .iter()
        .find(|call| call.is_call_to::<IFreezeVoting::setUpCall>(voting))
        .expect("freeze voting is set up");
    let setup = call.decode::<IFreezeVoting::setUpCall>().unwrap();
    VotingSetupParams::abi_decode_params(&setup.initializeParams).unwrap()
}

#[tokio::test]
async fn test_azorius_child_with_parent_allocation() {
    let mut descriptor = erc20_descriptor(new_token(1000, 600), 50);
    descriptor.parent = Some(parent_link(Some(VotingStrategyKind::LinearErc20), true));

    let plan = build_plan(&descriptor).await.expect("plan should build");
    let claim = plan.predicted.claim.unwrap();
    let token = plan.predicted.token.unwrap();

    let approvals = positions::<IVotesERC20::approveCall>(&plan);
    let claims = plan
        .execution_order()
        .iter()
        .enumerate()
        .filter(|(_, call)| deployed_address(call, &plan) == Some(claim))
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    assert_eq!(approvals.len(), 1);
    assert_eq!(claims.len(), 1);
    assert!(approvals[0] < claims[0]);

    let approve = plan.execution_order()[approvals[0]]
        .decode::<IVotesERC20::approveCall>()
        .unwrap();
    assert_eq!(plan.execution_order()[approvals[0]].to, token);
    assert_eq!(approve.spender, claim);
    assert_eq!(approve.amount, U256::from(50));

    // claim deployment closes the outer batch
    let last = plan.outer.calls().last().unwrap();
    assert_eq!(deployed_address(last, &plan), Some(claim));

    let initializer = initializer_of(&plan, claim).unwrap();
    let setup = IERC20Claim::setUpCall::abi_decode(&initializer).unwrap();
    let (deadline, funder, parent_token, child_token, amount) =
        ClaimParams::abi_decode_params(&setup.initializeParams).unwrap();
    assert_eq!(deadline, 0);
    assert_eq!(funder, plan.safe);
    assert_eq!(parent_token, PARENT_TOKEN);
    assert_eq!(child_token, token);
    assert_eq!(amount, U256::from(50));

    assert_deployed_before_use(&plan);
}

#[tokio::test]
async fn test_azorius_child_guarded_by_erc20_parent() {
    let mut descriptor = erc20_descriptor(new_token(1000, 1000), 0);
    descriptor.parent = Some(parent_link(Some(VotingStrategyKind::LinearErc20), true));

    let plan = build_plan(&descriptor).await.expect("plan should build");
    let templates = templates();
    let azorius = plan.predicted.azorius.unwrap();
    let fractal = plan.predicted.fractal_module.unwrap();
    let voting = plan.predicted.freeze_voting.unwrap();
    let guard = plan.predicted.freeze_guard.unwrap();

    assert_eq!(template_deployed_at(&plan, voting), Some(templates.freeze_voting_erc20));
    assert_eq!(template_deployed_at(&plan, guard), Some(templates.freeze_guard_azorius));
    assert_eq!(template_deployed_at(&plan, fractal), Some(templates.fractal_module));

    let (parent, threshold, proposal_period, freeze_period, source) = voting_setup(&plan);
    assert_eq!(parent, PARENT_SAFE);
    assert_eq!(threshold, U256::from(100));
    assert_eq!(proposal_period, 3600);
    assert_eq!(freeze_period, 7200);
    assert_eq!(source, PARENT_TOKEN);

    let set_guard = plan
        .inner
        .position(|call| call.is_call_to::<IAzorius::setGuardCall>(azorius))
        .expect("guard installed on azorius");
    assert_eq!(
        plan.inner.calls()[set_guard]
            .decode::<IAzorius::setGuardCall>()
            .unwrap()
            .guard,
        guard
    );
    assert!(plan
        .inner
        .position(|call| call.is_call_to::<ISafe::setGuardCall>(plan.safe))
        .is_none());

    // deployed in the outer batch, enabled in the inner one
    let deploy = plan
        .outer
        .position(|call| deployed_address(call, &plan) == Some(fractal))
        .unwrap();
    assert!(deploy < plan.inner_index());
    let enable = plan
        .inner
        .position(|call| {
            call.decode::<ISafe::enableModuleCall>()
                .is_ok_and(|enable| enable.module == fractal)
        })
        .unwrap();
    assert!(enable < set_guard);

    let initializer = initializer_of(&plan, fractal).unwrap();
    let setup = IFractalModule::setUpCall::abi_decode(&initializer).unwrap();
    assert!(!setup.initializeParams.is_empty());

    let owners = OwnerList::new(vec![plan.relay], 1).replay(&plan);
    assert_eq!(owners.owners, vec![azorius]);

    assert_deployed_before_use(&plan);
}

#[tokio::test]
async fn test_multisig_child_of_multisig_parent() {
    let mut descriptor = multisig_descriptor(vec![SIGNER_A, SIGNER_B], 1);
    descriptor.parent = Some(parent_link(None, true));

    let plan = build_plan(&descriptor).await.expect("plan should build");
    let templates = templates();
    let voting = plan.predicted.freeze_voting.unwrap();
    let guard = plan.predicted.freeze_guard.unwrap();

    assert_eq!(plan.outer.len(), 3);
    assert_eq!(
        deployed_address(&plan.outer.calls()[1], &plan),
        plan.predicted.fractal_module
    );
    assert_eq!(plan.inner_index(), 2);

    assert_eq!(template_deployed_at(&plan, voting), Some(templates.freeze_voting_multisig));
    assert_eq!(template_deployed_at(&plan, guard), Some(templates.freeze_guard_multisig));

    let (_, _, _, _, source) = voting_setup(&plan);
    assert_eq!(source, PARENT_SAFE);

    let set_guard = plan.inner.calls()[plan.inner.len() - 2]
        .decode::<ISafe::setGuardCall>()
        .unwrap();
    assert_eq!(plan.inner.calls()[plan.inner.len() - 2].to, plan.safe);
    assert_eq!(set_guard.guard, guard);

    // relay removal stays last
    assert!(plan.inner.calls().last().unwrap().is_call_to::<ISafe::removeOwnerCall>(plan.safe));

    let owners = OwnerList::new(vec![SIGNER_A, SIGNER_B, plan.relay], 1).replay(&plan);
    assert_eq!(owners.owners, vec![SIGNER_A, SIGNER_B]);

    assert_deployed_before_use(&plan);
}

#[tokio::test]
async fn test_freeze_voting_deployed_before_setup() {
    let mut descriptor = multisig_descriptor(vec![SIGNER_A], 1);
    descriptor.parent = Some(parent_link(None, false));

    let plan = build_plan(&descriptor).await.expect("plan should build");
    let inner = plan.inner.calls();

    // deploy voting, set up voting, deploy guard, set guard, remove relay
    assert_eq!(inner.len(), 5);
    assert!(inner[0].decode::<IModuleProxyFactory::deployModuleCall>().is_ok());
    assert!(inner[1].decode::<IFreezeVoting::setUpCall>().is_ok());
    assert!(inner[2].decode::<IModuleProxyFactory::deployModuleCall>().is_ok());
    assert!(inner[3].decode::<ISafe::setGuardCall>().is_ok());
    assert_eq!(plan.predicted.fractal_module, None);
    assert_eq!(plan.outer.len(), 2);
}

#[tokio::test]
async fn test_erc721_parent_counts_votes_on_strategy() {
    let mut descriptor = multisig_descriptor(vec![SIGNER_A], 1);
    descriptor.parent = Some(parent_link(Some(VotingStrategyKind::LinearErc721), false));

    let plan = build_plan(&descriptor).await.expect("plan should build");

    assert_eq!(
        template_deployed_at(&plan, plan.predicted.freeze_voting.unwrap()),
        Some(templates().freeze_voting_erc721)
    );
    let (_, _, _, _, source) = voting_setup(&plan);
    assert_eq!(source, PARENT_STRATEGY);
}

#[tokio::test]
async fn test_erc721_parent_without_strategy_rejected() {
    let mut parent = parent_link(Some(VotingStrategyKind::LinearErc721), false);
    parent.strategy_address = None;
    let mut descriptor = multisig_descriptor(vec![SIGNER_A], 1);
    descriptor.parent = Some(parent);

    let err = build_plan(&descriptor).await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[tokio::test]
async fn test_allocation_without_parent_token_rejected() {
    let mut parent = parent_link(None, false);
    parent.token = None;
    let mut descriptor = erc20_descriptor(new_token(1000, 1000), 50);
    descriptor.parent = Some(parent);

    let err = build_plan(&descriptor).await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[tokio::test]
async fn test_allocation_without_child_token_rejected() {
    let mut descriptor = erc721_descriptor();
    if let Governance::Azorius(governance) = &mut descriptor.governance {
        governance.erc20 = Some(Erc20Voting {
            token: new_token(1000, 1000),
            quorum_percentage: U256::from(4),
            parent_allocation_amount: U256::from(50),
        });
    }
    descriptor.parent = Some(parent_link(Some(VotingStrategyKind::LinearErc20), false));

    let err = build_plan(&descriptor).await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "{err}");
}

#[tokio::test]
async fn test_allocation_without_parent_rejected() {
    let err = build_plan(&erc20_descriptor(new_token(1000, 1000), 50))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}
