use alloy::network::AnyNetwork;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use color_eyre::eyre::{eyre, Result};
use safe_dao::{
    ChainConfig, ConstantReader, FixedReader, ISafe, ISafeProxyFactory, NonceSource,
    OrganizationAssembler, OrganizationDescriptor, OsEntropy, PlanOptions, ProviderReader,
    SafeDeployment, SafeTarget, SeededEntropy,
};

use crate::bundle::write_bundle;
use crate::cli::PlanArgs;
use crate::config::{load_json, parse_u256};
use crate::output::PlanOutput;

pub async fn run(args: PlanArgs, json: bool) -> Result<()> {
    let config: ChainConfig = load_json(&args.templates)?;
    let descriptor: OrganizationDescriptor = load_json(&args.descriptor)?;

    let provider = ProviderBuilder::new()
        .network::<AnyNetwork>()
        .connect_http(args.rpc_url.parse()?);

    let chain_id = provider.get_chain_id().await?;
    if chain_id != config.chain_id {
        return Err(eyre!(
            "RPC chain id {} does not match configured chain id {}",
            chain_id,
            config.chain_id
        ));
    }

    let mut nonces: Box<dyn NonceSource> = match args.seed {
        Some(seed) => Box::new(SeededEntropy::new(seed)),
        None => Box::new(OsEntropy),
    };

    match &args.quorum_denominator {
        Some(denominator) => {
            let reader = FixedReader::new(parse_u256(denominator)?);
            plan_with(&args, &config, &descriptor, &provider, &reader, &mut *nonces, json).await
        }
        None => {
            let reader = ProviderReader::new(provider.clone());
            plan_with(&args, &config, &descriptor, &provider, &reader, &mut *nonces, json).await
        }
    }
}

async fn plan_with<P, R>(
    args: &PlanArgs,
    config: &ChainConfig,
    descriptor: &OrganizationDescriptor,
    provider: &P,
    reader: &R,
    nonces: &mut dyn NonceSource,
    json: bool,
) -> Result<()>
where
    P: Provider<AnyNetwork>,
    R: ConstantReader,
{
    let mut assembler = OrganizationAssembler::new(config, reader, nonces);

    let target = match &args.existing_safe {
        Some(safe) => {
            let address: Address = safe
                .parse()
                .map_err(|e| eyre!("Invalid Safe address '{}': {}", safe, e))?;
            let owners = ISafe::new(address, provider).getOwners().call().await?;
            SafeTarget::Existing { address, owners }
        }
        None => {
            let creation_code = ISafeProxyFactory::new(config.addresses.proxy_factory, provider)
                .proxyCreationCode()
                .call()
                .await?;
            let owners = assembler.initial_owners(descriptor)?;
            SafeTarget::New(SafeDeployment::new(
                &config.addresses,
                owners,
                1,
                parse_u256(&args.safe_salt_nonce)?,
                &creation_code,
            ))
        }
    };

    let options = PlanOptions {
        set_name: args.set_name,
        set_snapshot: args.set_snapshot,
    };

    let plan = assembler
        .build_organization_plan(descriptor, &target, &options)
        .await?;

    if let Some(path) = &args.bundle_out {
        write_bundle(path, plan.outer.calls())?;
    }

    let output = PlanOutput {
        transaction: plan.transaction(),
        plan: &plan,
    };
    output.print(json);

    Ok(())
}
