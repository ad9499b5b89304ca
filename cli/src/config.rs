use std::fs;
use std::path::Path;

use alloy::primitives::{hex, Bytes, U256};
use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::de::DeserializeOwned;

/// Reads and deserializes a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(eyre!("File not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).wrap_err_with(|| format!("Invalid JSON in {}", path.display()))
}

/// Parses a decimal or 0x-prefixed hex integer
pub fn parse_u256(s: &str) -> Result<U256> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        U256::from_str_radix(hex, 16).map_err(|e| eyre!("Invalid hex value '{}': {}", s, e))
    } else {
        s.parse::<U256>().map_err(|e| eyre!("Invalid value '{}': {}", s, e))
    }
}

/// Parses hex calldata, with or without a 0x prefix
pub fn parse_hex_data(s: &str) -> Result<Bytes> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| eyre!("Invalid hex data: {}", e))?;
    Ok(Bytes::from(bytes))
}
