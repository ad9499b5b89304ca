//! Governance organization plans

use alloy::primitives::{Address, U256};
use alloy::sol_types::{sol_data, SolCall, SolType};
use safe_dao::contracts::{
    IAzorius, IKeyValuePairs, ILinearERC20Voting, ILinearERC721Voting, IMultiSendCallOnly,
    ISafe, ISafeProxyFactory, IVotesERC20, SENTINEL_MODULE,
};
use safe_dao::plan::{PlanOptions, SafeTarget};
use safe_dao::signing::relay_approval;
use safe_dao::types::{Governance, TokenSource, VotingStrategyKind};
use safe_dao::{Error, Operation};

use crate::common::*;

type Erc20StrategyParams = (
    sol_data::Address,
    sol_data::Address,
    sol_data::Address,
    sol_data::Uint<32>,
    sol_data::Uint<256>,
    sol_data::Uint<256>,
    sol_data::Uint<256>,
);

type TokenParams = (
    sol_data::String,
    sol_data::String,
    sol_data::Array<sol_data::Address>,
    sol_data::Array<sol_data::Uint<256>>,
);

#[tokio::test]
async fn test_root_erc20_outer_batch_order() {
    let plan = build_plan(&erc20_descriptor(new_token(1000, 600), 0))
        .await
        .expect("plan should build");
    let templates = templates();
    let outer = plan.outer.calls();

    assert_eq!(outer.len(), 5);
    assert!(outer[0].decode::<ISafeProxyFactory::createProxyWithNonceCall>().is_ok());
    assert_eq!(deployed_address(&outer[1], &plan), plan.predicted.token);
    assert_eq!(deployed_address(&outer[2], &plan), plan.predicted.strategy);
    assert_eq!(deployed_address(&outer[3], &plan), plan.predicted.azorius);
    assert_eq!(plan.inner_index(), 4);
    assert!(outer[4].is_call_to::<ISafe::execTransactionCall>(plan.safe));

    assert_eq!(
        template_deployed_at(&plan, plan.predicted.token.unwrap()),
        Some(templates.votes_erc20)
    );
    assert_deployed_before_use(&plan);
}

#[tokio::test]
async fn test_root_erc20_inner_batch_order() {
    let plan = build_plan(&erc20_descriptor(new_token(1000, 600), 0))
        .await
        .expect("plan should build");
    let azorius = plan.predicted.azorius.unwrap();
    let strategy = plan.predicted.strategy.unwrap();
    let inner = plan.inner.calls();

    assert_eq!(inner.len(), 4);

    assert!(inner[0].is_call_to::<ILinearERC20Voting::setAzoriusCall>(strategy));
    let wire = inner[0].decode::<ILinearERC20Voting::setAzoriusCall>().unwrap();
    assert_eq!(wire.azoriusModule, azorius);

    assert!(inner[1].is_call_to::<ISafe::enableModuleCall>(plan.safe));
    assert_eq!(inner[1].decode::<ISafe::enableModuleCall>().unwrap().module, azorius);

    let add = inner[2].decode::<ISafe::addOwnerWithThresholdCall>().unwrap();
    assert_eq!(add.owner, azorius);
    assert_eq!(add._threshold, U256::from(1));

    let remove = inner[3].decode::<ISafe::removeOwnerCall>().unwrap();
    assert_eq!(remove.prevOwner, azorius);
    assert_eq!(remove.owner, plan.relay);
}

#[tokio::test]
async fn test_token_address_and_remainder_in_initializers() {
    let plan = build_plan(&erc20_descriptor(new_token(1000, 600), 0))
        .await
        .expect("plan should build");
    let token = plan.predicted.token.unwrap();

    let strategy_init = initializer_of(&plan, plan.predicted.strategy.unwrap()).unwrap();
    let setup = ILinearERC20Voting::setUpCall::abi_decode(&strategy_init).unwrap();
    let (owner, strategy_token, sentinel, _, _, quorum, _) =
        Erc20StrategyParams::abi_decode_params(&setup.initializeParams).unwrap();
    assert_eq!(owner, plan.safe);
    assert_eq!(strategy_token, token);
    assert_eq!(sentinel, SENTINEL_MODULE);
    // 4% of 1,000,000
    assert_eq!(quorum, U256::from(40_000));

    let token_init = initializer_of(&plan, token).unwrap();
    let setup = IVotesERC20::setUpCall::abi_decode(&token_init).unwrap();
    let (_, _, holders, amounts) = TokenParams::abi_decode_params(&setup.initializeParams).unwrap();
    assert_eq!(holders, vec![HOLDER, plan.safe]);
    assert_eq!(amounts, vec![U256::from(600), U256::from(400)]);
}

#[tokio::test]
async fn test_ownership_handed_to_azorius() {
    let plan = build_plan(&erc20_descriptor(new_token(1000, 1000), 0))
        .await
        .expect("plan should build");

    let owners = OwnerList::new(vec![plan.relay], 1).replay(&plan);

    assert_eq!(owners.owners, vec![plan.predicted.azorius.unwrap()]);
    assert_eq!(owners.threshold, 1);
}

#[tokio::test]
async fn test_inner_batch_runs_with_relay_approval() {
    let plan = build_plan(&erc20_descriptor(new_token(1000, 1000), 0))
        .await
        .expect("plan should build");

    let exec = plan.outer.calls()[plan.inner_index()]
        .decode::<ISafe::execTransactionCall>()
        .unwrap();

    assert_eq!(exec.to, plan.relay);
    assert_eq!(exec.operation, Operation::DelegateCall.as_u8());
    assert_eq!(exec.signatures, relay_approval(plan.relay));

    let multisend = IMultiSendCallOnly::multiSendCall::abi_decode(&exec.data).unwrap();
    assert_eq!(multisend.transactions, plan.inner.encode());
}

#[tokio::test]
async fn test_transaction_sends_outer_batch_to_relay() {
    let plan = build_plan(&erc20_descriptor(new_token(1000, 1000), 0))
        .await
        .expect("plan should build");

    let tx = plan.transaction();
    assert_eq!(tx.to, plan.relay);
    assert_eq!(tx.operation, Operation::Call);

    let multisend = tx.decode::<IMultiSendCallOnly::multiSendCall>().unwrap();
    assert_eq!(multisend.transactions, plan.outer.encode());
    assert_eq!(plan.encode(), plan.outer.encode());
}

#[tokio::test]
async fn test_metadata_leads_inner_batch() {
    let descriptor = erc20_descriptor(new_token(1000, 1000), 0);
    let options = PlanOptions {
        set_name: true,
        set_snapshot: true,
    };
    let plan = build_plan_with(&descriptor, &new_safe(&descriptor), &options, SEED)
        .await
        .expect("plan should build");
    let registry = templates().key_value_pairs;

    let inner = plan.inner.calls();
    assert_eq!(inner.len(), 6);
    assert!(inner[0].is_call_to::<IKeyValuePairs::updateValuesCall>(registry));
    assert!(inner[1].is_call_to::<IKeyValuePairs::updateValuesCall>(registry));

    let ens = inner[1].decode::<IKeyValuePairs::updateValuesCall>().unwrap();
    assert_eq!(ens._values, vec!["guild.eth".to_string()]);
}

#[tokio::test]
async fn test_imported_token_not_deployed() {
    let imported = Address::repeat_byte(0x77);
    let plan = build_plan(&erc20_descriptor(TokenSource::Imported { address: imported }, 0))
        .await
        .expect("plan should build");

    assert_eq!(plan.predicted.token, Some(imported));
    // create, strategy, azorius, exec
    assert_eq!(plan.outer.len(), 4);

    let strategy_init = initializer_of(&plan, plan.predicted.strategy.unwrap()).unwrap();
    let setup = ILinearERC20Voting::setUpCall::abi_decode(&strategy_init).unwrap();
    let params = Erc20StrategyParams::abi_decode_params(&setup.initializeParams).unwrap();
    assert_eq!(params.1, imported);
}

#[tokio::test]
async fn test_locked_token_uses_lockable_template() {
    let mut token = new_token(1000, 1000);
    if let TokenSource::New(new) = &mut token {
        new.locked = true;
        new.max_total_supply = U256::from(5000);
    }

    let plan = build_plan(&erc20_descriptor(token, 0)).await.expect("plan should build");

    assert_eq!(
        template_deployed_at(&plan, plan.predicted.token.unwrap()),
        templates().votes_erc20_lockable
    );
}

#[tokio::test]
async fn test_erc721_strategy() {
    let plan = build_plan(&erc721_descriptor()).await.expect("plan should build");
    let strategy = plan.predicted.strategy.unwrap();

    assert_eq!(plan.predicted.token, None);
    assert_eq!(
        template_deployed_at(&plan, strategy),
        Some(templates().linear_voting_erc721)
    );
    assert!(plan.inner.calls()[0].is_call_to::<ILinearERC721Voting::setAzoriusCall>(strategy));

    let azorius_init = initializer_of(&plan, plan.predicted.azorius.unwrap()).unwrap();
    let setup = IAzorius::setUpCall::abi_decode(&azorius_init).unwrap();
    let (_, _, _, strategies, timelock, _) = <(
        sol_data::Address,
        sol_data::Address,
        sol_data::Address,
        sol_data::Array<sol_data::Address>,
        sol_data::Uint<32>,
        sol_data::Uint<32>,
    )>::abi_decode_params(&setup.initializeParams)
    .unwrap();
    assert_eq!(strategies, vec![strategy]);
    assert_eq!(timelock, 600);

    assert_deployed_before_use(&plan);
}

#[tokio::test]
async fn test_existing_safe_removes_prior_owners() {
    let descriptor = erc20_descriptor(new_token(1000, 1000), 0);
    let relay = config().relay();
    let safe = Address::repeat_byte(0x5a);
    let target = SafeTarget::Existing {
        address: safe,
        owners: vec![relay, SIGNER_A, SIGNER_B],
    };

    let plan = build_plan_with(&descriptor, &target, &PlanOptions::default(), SEED)
        .await
        .expect("plan should build");

    assert_eq!(plan.safe, safe);
    assert!(positions::<ISafeProxyFactory::createProxyWithNonceCall>(&plan).is_empty());

    let removals = positions::<ISafe::removeOwnerCall>(&plan);
    let add = positions::<ISafe::addOwnerWithThresholdCall>(&plan);
    assert_eq!(removals.len(), 3);
    assert!(add[0] < removals[0]);

    let owners = OwnerList::new(vec![relay, SIGNER_A, SIGNER_B], 1).replay(&plan);
    assert_eq!(owners.owners, vec![plan.predicted.azorius.unwrap()]);
}

#[tokio::test]
async fn test_existing_safe_without_relay_rejected() {
    let descriptor = erc20_descriptor(new_token(1000, 1000), 0);
    let target = SafeTarget::Existing {
        address: Address::repeat_byte(0x5a),
        owners: vec![SIGNER_A],
    };

    let err = build_plan_with(&descriptor, &target, &PlanOptions::default(), SEED)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[tokio::test]
async fn test_hats_strategy_unsupported() {
    let mut descriptor = erc20_descriptor(new_token(1000, 1000), 0);
    if let Governance::Azorius(governance) = &mut descriptor.governance {
        governance.voting_strategy = VotingStrategyKind::LinearErc20HatsWhitelisting;
    }

    let err = build_plan(&descriptor).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedVariant(_)));
}

#[tokio::test]
async fn test_hats_strategy_rejected_before_token_checks() {
    let mut without_params = erc20_descriptor(new_token(1000, 1000), 0);
    let mut over_allocated = erc20_descriptor(new_token(1000, 1001), 0);
    for descriptor in [&mut without_params, &mut over_allocated] {
        if let Governance::Azorius(governance) = &mut descriptor.governance {
            governance.voting_strategy = VotingStrategyKind::LinearErc20HatsWhitelisting;
        }
    }
    if let Governance::Azorius(governance) = &mut without_params.governance {
        governance.erc20 = None;
    }

    for descriptor in [without_params, over_allocated] {
        let err = build_plan(&descriptor).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedVariant(_)), "{err}");
    }
}

#[tokio::test]
async fn test_over_allocation_rejected() {
    let err = build_plan(&erc20_descriptor(new_token(1000, 1001), 0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[tokio::test]
async fn test_plans_reproducible_per_seed() {
    let descriptor = erc20_descriptor(new_token(1000, 600), 0);
    let target = new_safe(&descriptor);
    let options = PlanOptions::default();

    let first = build_plan_with(&descriptor, &target, &options, 1).await.unwrap();
    let again = build_plan_with(&descriptor, &target, &options, 1).await.unwrap();
    let other = build_plan_with(&descriptor, &target, &options, 2).await.unwrap();

    assert_eq!(first.encode(), again.encode());
    assert_eq!(first.predicted, again.predicted);
    assert_ne!(first.predicted.azorius, other.predicted.azorius);
    assert_eq!(first.safe, other.safe);
}
