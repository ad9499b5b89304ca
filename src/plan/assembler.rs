//! Orchestrates module builders into an ordered organization plan

use alloy::primitives::Address;

use super::{
    add_owner_call, metadata_calls, remove_owner_call, OrganizationPlan, PlanOptions,
    PredictedAddresses, SafeTarget,
};
use crate::builders::{
    ClaimBuilder, FractalModuleBuilder, FreezeBuilder, GovernanceBuilder, StrategyBuilder,
    TokenBuilder,
};
use crate::chain::ChainConfig;
use crate::entropy::NonceSource;
use crate::error::{Error, Result};
use crate::reader::ConstantReader;
use crate::signing::with_relay_approval;
use crate::types::{
    AzoriusGovernance, BatchEnvelope, Call, Governance, MultisigGovernance, OrganizationDescriptor,
    ParentLink, VotingStrategyKind,
};

/// Appends `call` and records the step
fn append(batch: &mut BatchEnvelope, step: &'static str, call: Call) {
    tracing::debug!(step, to = %call.to, index = batch.len(), "plan step");
    batch.push(call);
}

/// Builds organization plans against one chain configuration.
///
/// Every module slot draws its own nonce from `nonces`, so a seeded source
/// reproduces a plan exactly.
pub struct OrganizationAssembler<'a, R, N> {
    config: &'a ChainConfig,
    reader: &'a R,
    nonces: N,
}

impl<'a, R, N> OrganizationAssembler<'a, R, N>
where
    R: ConstantReader,
    N: NonceSource,
{
    pub fn new(config: &'a ChainConfig, reader: &'a R, nonces: N) -> Self {
        Self {
            config,
            reader,
            nonces,
        }
    }

    /// Owners a new Safe must be created with, in setup order.
    ///
    /// The relay is always an owner so it can approve the inner batch; a
    /// multisig organization starts with its signers ahead of the relay.
    pub fn initial_owners(&self, descriptor: &OrganizationDescriptor) -> Result<Vec<Address>> {
        let relay = self.config.relay();
        match &descriptor.governance {
            Governance::Azorius(_) => Ok(vec![relay]),
            Governance::Multisig(multisig) => {
                validate_multisig(multisig, relay)?;
                let mut owners = multisig.trusted_addresses.clone();
                owners.push(relay);
                Ok(owners)
            }
        }
    }

    /// Assembles the complete deployment for `descriptor` around `safe`
    pub async fn build_organization_plan(
        &mut self,
        descriptor: &OrganizationDescriptor,
        safe: &SafeTarget,
        options: &PlanOptions,
    ) -> Result<OrganizationPlan> {
        let plan = match &descriptor.governance {
            Governance::Azorius(governance) => {
                self.build_azorius(descriptor, governance, safe, options).await?
            }
            Governance::Multisig(multisig) => {
                self.build_multisig(descriptor, multisig, safe, options)?
            }
        };

        tracing::info!(
            name = %descriptor.name,
            safe = %plan.safe,
            outer = plan.outer.len(),
            inner = plan.inner.len(),
            sub_organization = descriptor.is_sub_organization(),
            "assembled organization plan"
        );

        Ok(plan)
    }

    async fn build_azorius(
        &mut self,
        descriptor: &OrganizationDescriptor,
        governance: &AzoriusGovernance,
        target: &SafeTarget,
        options: &PlanOptions,
    ) -> Result<OrganizationPlan> {
        let config = self.config;
        let templates = &config.templates;
        let relay = config.relay();
        let safe = target.address();
        let prior_owners = prior_owners(target, relay)?;

        let kind = governance.voting_strategy;
        if !matches!(
            kind,
            VotingStrategyKind::LinearErc20 | VotingStrategyKind::LinearErc721
        ) {
            return Err(Error::UnsupportedVariant(format!(
                "{kind} cannot be deployed as an organization's own voting strategy"
            )));
        }

        let token = match kind {
            VotingStrategyKind::LinearErc20 => {
                let erc20 = governance.erc20.as_ref().ok_or_else(|| {
                    Error::config("ERC20 voting strategy requires erc20 parameters")
                })?;
                Some(TokenBuilder::new(
                    &erc20.token,
                    templates,
                    safe,
                    self.nonces.next_nonce(),
                )?)
            }
            _ => None,
        };
        let token_address = token.as_ref().map(TokenBuilder::address).transpose()?;

        let mut strategy = StrategyBuilder::prepare(
            governance,
            templates,
            safe,
            token_address,
            self.reader,
            self.nonces.next_nonce(),
        )
        .await?;

        let mut azorius = GovernanceBuilder::new(
            templates,
            safe,
            strategy.address()?,
            governance.timelock,
            governance.execution_period,
            self.nonces.next_nonce(),
        )?;
        let azorius_address = azorius.address()?;

        let claim = match (&descriptor.parent, &governance.erc20, token_address) {
            (Some(parent), Some(erc20), Some(child_token))
                if !erc20.parent_allocation_amount.is_zero() =>
            {
                let parent_token = parent.token.ok_or_else(|| {
                    Error::config("parent allocation requires the parent's token address")
                })?;
                Some(ClaimBuilder::new(
                    templates,
                    safe,
                    parent_token,
                    child_token,
                    erc20.parent_allocation_amount,
                    self.nonces.next_nonce(),
                )?)
            }
            (None, Some(erc20), _) if !erc20.parent_allocation_amount.is_zero() => {
                return Err(Error::config(
                    "parent allocation configured for an organization without a parent",
                ));
            }
            (Some(_), Some(erc20), None) if !erc20.parent_allocation_amount.is_zero() => {
                return Err(Error::config(
                    "parent allocation requires an ERC20 voting token to claim against",
                ));
            }
            _ => None,
        };

        let mut sub = self.sub_organization(descriptor.parent.as_ref(), safe, Some(azorius_address))?;

        let mut inner = BatchEnvelope::new();
        for call in metadata_calls(templates.key_value_pairs, descriptor, options) {
            append(&mut inner, "metadata", call);
        }
        append(&mut inner, "wire strategy", strategy.set_azorius_call(azorius_address)?);
        append(&mut inner, "enable azorius", azorius.enable_module_call(safe)?);
        if let Some(sub) = sub.as_mut() {
            sub.append_guarding(&mut inner, safe)?;
        }

        // Azorius becomes an owner before anyone else leaves
        append(&mut inner, "add azorius owner", add_owner_call(safe, azorius_address, 1));
        for owner in &prior_owners {
            append(
                &mut inner,
                "remove prior owner",
                remove_owner_call(safe, relay, *owner, 1),
            );
        }
        append(
            &mut inner,
            "remove relay",
            remove_owner_call(safe, azorius_address, relay, 1),
        );

        if let (Some(claim), Some(token)) = (&claim, &token) {
            append(
                &mut inner,
                "approve claim",
                token.approve_call(claim.address()?, claim.amount())?,
            );
        }

        let mut outer = BatchEnvelope::new();
        if let SafeTarget::New(deployment) = target {
            append(&mut outer, "create safe", deployment.call.clone());
        }
        if let Some(deploy) = token.as_ref().map(TokenBuilder::deployment_call).transpose()?.flatten() {
            append(&mut outer, "deploy token", deploy);
        }
        append(&mut outer, "deploy strategy", strategy.deployment_call()?);
        append(&mut outer, "deploy azorius", azorius.deployment_call()?);
        if let Some(fractal) = sub.as_ref().and_then(|sub| sub.fractal.as_ref()) {
            append(&mut outer, "deploy fractal module", fractal.deployment_call()?);
        }

        let inner_index = outer.len();
        append(&mut outer, "execute inner batch", with_relay_approval(safe, relay, &inner));

        // Last: its setUp pulls the allowance approved by the inner batch
        if let Some(claim) = &claim {
            append(&mut outer, "deploy claim", claim.deployment_call()?);
        }

        let predicted = PredictedAddresses {
            safe,
            token: token_address,
            strategy: Some(strategy.address()?),
            azorius: Some(azorius_address),
            claim: claim.as_ref().map(ClaimBuilder::address).transpose()?,
            ..sub_predictions(sub.as_ref(), safe)?
        };

        Ok(OrganizationPlan {
            safe,
            relay,
            outer,
            inner,
            predicted,
            inner_index,
        })
    }

    fn build_multisig(
        &mut self,
        descriptor: &OrganizationDescriptor,
        multisig: &MultisigGovernance,
        target: &SafeTarget,
        options: &PlanOptions,
    ) -> Result<OrganizationPlan> {
        let config = self.config;
        let relay = config.relay();
        validate_multisig(multisig, relay)?;

        let deployment = match target {
            SafeTarget::New(deployment) => deployment,
            SafeTarget::Existing { .. } => {
                return Err(Error::config(
                    "a multisig organization cannot be attached to an existing Safe",
                ));
            }
        };

        let expected = self.initial_owners(descriptor)?;
        if deployment.owners != expected || deployment.threshold != 1 {
            return Err(Error::config(
                "multisig Safe must be created with its signers then the relay, at threshold 1",
            ));
        }

        let safe = deployment.address;
        let last_signer = *multisig
            .trusted_addresses
            .last()
            .ok_or_else(|| Error::config("multisig requires at least one signer"))?;

        let mut sub = self.sub_organization(descriptor.parent.as_ref(), safe, None)?;

        let mut inner = BatchEnvelope::new();
        for call in metadata_calls(config.templates.key_value_pairs, descriptor, options) {
            append(&mut inner, "metadata", call);
        }
        if let Some(sub) = sub.as_mut() {
            sub.append_guarding(&mut inner, safe)?;
        }
        append(
            &mut inner,
            "remove relay",
            remove_owner_call(safe, last_signer, relay, multisig.signature_threshold),
        );

        let mut outer = BatchEnvelope::new();
        append(&mut outer, "create safe", deployment.call.clone());
        if let Some(fractal) = sub.as_ref().and_then(|sub| sub.fractal.as_ref()) {
            append(&mut outer, "deploy fractal module", fractal.deployment_call()?);
        }
        let inner_index = outer.len();
        append(&mut outer, "execute inner batch", with_relay_approval(safe, relay, &inner));

        Ok(OrganizationPlan {
            safe,
            relay,
            outer,
            inner,
            predicted: sub_predictions(sub.as_ref(), safe)?,
            inner_index,
        })
    }

    fn sub_organization(
        &mut self,
        parent: Option<&ParentLink>,
        safe: Address,
        azorius: Option<Address>,
    ) -> Result<Option<SubOrganization>> {
        let Some(parent) = parent else {
            return Ok(None);
        };
        let config = self.config;
        let templates = &config.templates;

        let fractal = if parent.attach_fractal_module {
            Some(FractalModuleBuilder::new(
                templates,
                safe,
                parent.address,
                self.nonces.next_nonce(),
            )?)
        } else {
            None
        };

        let voting_nonce = self.nonces.next_nonce();
        let guard_nonce = self.nonces.next_nonce();
        let freeze = FreezeBuilder::new(templates, safe, parent, azorius, voting_nonce, guard_nonce)?;

        Ok(Some(SubOrganization { fractal, freeze }))
    }
}

/// Modules linking a child organization to its parent
struct SubOrganization {
    fractal: Option<FractalModuleBuilder>,
    freeze: FreezeBuilder,
}

impl SubOrganization {
    /// Fractal enable, then freeze voting deploy and setup, then guard deploy and install
    fn append_guarding(&mut self, inner: &mut BatchEnvelope, safe: Address) -> Result<()> {
        if let Some(fractal) = self.fractal.as_mut() {
            append(inner, "enable fractal module", fractal.enable_module_call(safe)?);
        }
        append(inner, "deploy freeze voting", self.freeze.deploy_voting_call()?);
        append(inner, "set up freeze voting", self.freeze.voting_setup_call()?);
        append(inner, "deploy freeze guard", self.freeze.deploy_guard_call()?);
        append(inner, "install freeze guard", self.freeze.set_guard_call()?);
        Ok(())
    }
}

fn sub_predictions(sub: Option<&SubOrganization>, safe: Address) -> Result<PredictedAddresses> {
    let mut predicted = PredictedAddresses {
        safe,
        ..Default::default()
    };

    if let Some(sub) = sub {
        predicted.fractal_module = sub.fractal.as_ref().map(FractalModuleBuilder::address).transpose()?;
        predicted.freeze_voting = Some(sub.freeze.voting_address()?);
        predicted.freeze_guard = Some(sub.freeze.guard_address()?);
    }

    Ok(predicted)
}

/// Owners other than the relay that must be removed from a governed Safe.
///
/// `removeOwner(relay, owner)` is only valid while the relay directly
/// precedes each owner, so the relay must head the list.
fn prior_owners(target: &SafeTarget, relay: Address) -> Result<Vec<Address>> {
    if let SafeTarget::New(deployment) = target {
        if deployment.threshold != 1 {
            return Err(Error::config("new Safe must be created at threshold 1"));
        }
    }

    match target.owners().split_first() {
        Some((head, rest)) if *head == relay => {
            if rest.contains(&relay) {
                return Err(Error::config("relay is listed as an owner twice"));
            }
            Ok(rest.to_vec())
        }
        _ => Err(Error::config(
            "the relay must be the most recently added owner of the Safe",
        )),
    }
}

fn validate_multisig(multisig: &MultisigGovernance, relay: Address) -> Result<()> {
    let signers = multisig.trusted_addresses.len() as u64;

    if signers == 0 {
        return Err(Error::config("multisig requires at least one signer"));
    }
    if multisig.signature_threshold == 0 {
        return Err(Error::config("multisig signature threshold must be at least 1"));
    }
    if multisig.signature_threshold > signers {
        return Err(Error::Configuration(format!(
            "signature threshold {} exceeds {signers} signers",
            multisig.signature_threshold
        )));
    }
    if multisig.trusted_addresses.contains(&relay) {
        return Err(Error::config("the relay cannot be a multisig signer"));
    }

    Ok(())
}
