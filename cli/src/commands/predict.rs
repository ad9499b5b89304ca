use alloy::primitives::Address;
use color_eyre::eyre::{eyre, Result};
use safe_dao::create2::{generate_salt, predict_module_address};

use crate::cli::PredictArgs;
use crate::config::{parse_hex_data, parse_u256};
use crate::output::PredictOutput;

pub fn run(args: PredictArgs, json: bool) -> Result<()> {
    let factory: Address = args
        .factory
        .parse()
        .map_err(|e| eyre!("Invalid factory address '{}': {}", args.factory, e))?;
    let template: Address = args
        .template
        .parse()
        .map_err(|e| eyre!("Invalid template address '{}': {}", args.template, e))?;
    let initializer = parse_hex_data(&args.initializer)?;
    let nonce = parse_u256(&args.nonce)?;

    let output = PredictOutput {
        address: predict_module_address(factory, template, &initializer, nonce),
        salt: generate_salt(&initializer, nonce),
        nonce,
    };

    output.print(json);

    Ok(())
}
