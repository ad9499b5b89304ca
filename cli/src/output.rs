use alloy::primitives::{Address, B256, U256};
use safe_dao::{Call, OrganizationPlan, PredictedAddresses};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutput<'a> {
    pub plan: &'a OrganizationPlan,
    /// The one transaction to broadcast
    pub transaction: Call,
}

impl PlanOutput<'_> {
    pub fn print(&self, json: bool) {
        if json {
            println!("{}", serde_json::to_string_pretty(self).unwrap());
            return;
        }

        println!("Safe: {}", self.plan.safe);
        print_predicted(&self.plan.predicted);
        println!();

        println!("Outer batch ({} calls):", self.plan.outer.len());
        for (i, call) in self.plan.outer.calls().iter().enumerate() {
            print_call(i, call);
            if i == self.plan.inner_index() {
                println!("    Inner batch ({} calls):", self.plan.inner.len());
                for (j, inner) in self.plan.inner.calls().iter().enumerate() {
                    print!("    ");
                    print_call(j, inner);
                }
            }
        }
        println!();

        println!("Transaction:");
        println!("  To: {}", self.transaction.to);
        println!("  Data: {} bytes", self.transaction.data.len());
    }
}

fn print_predicted(predicted: &PredictedAddresses) {
    let entries = [
        ("Token", predicted.token),
        ("Strategy", predicted.strategy),
        ("Azorius", predicted.azorius),
        ("Claim", predicted.claim),
        ("Fractal Module", predicted.fractal_module),
        ("Freeze Voting", predicted.freeze_voting),
        ("Freeze Guard", predicted.freeze_guard),
    ];

    for (label, address) in entries {
        if let Some(address) = address {
            println!("  {}: {}", label, address);
        }
    }
}

fn print_call(index: usize, call: &Call) {
    let selector = call
        .selector()
        .map(|s| format!("0x{}", alloy::primitives::hex::encode(s)))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  {}: {} selector={} data={} bytes",
        index + 1,
        call.to,
        selector,
        call.data.len()
    );
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictOutput {
    pub address: Address,
    pub salt: B256,
    pub nonce: U256,
}

impl PredictOutput {
    pub fn print(&self, json: bool) {
        if json {
            println!("{}", serde_json::to_string_pretty(self).unwrap());
        } else {
            println!("Predicted Address: {}", self.address);
            println!("  Salt: {}", self.salt);
            println!("  Nonce: {}", self.nonce);
        }
    }
}
