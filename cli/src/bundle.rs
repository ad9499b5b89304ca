use std::fs;
use std::path::Path;

use color_eyre::eyre::Result;
use safe_dao::Call;
use serde::Serialize;

/// Safe Transaction Builder bundle entry
#[derive(Debug, Serialize)]
pub struct BundleTransaction {
    pub to: String,
    pub value: String,
    pub data: String,
    pub operation: u8,
}

impl From<&Call> for BundleTransaction {
    fn from(call: &Call) -> Self {
        Self {
            to: call.to.to_checksum(None),
            value: call.value.to_string(),
            data: call.data.to_string(),
            operation: call.operation.as_u8(),
        }
    }
}

/// Writes `calls` as a bundle file
pub fn write_bundle(path: &Path, calls: &[Call]) -> Result<()> {
    let transactions: Vec<BundleTransaction> = calls.iter().map(BundleTransaction::from).collect();
    fs::write(path, serde_json::to_string_pretty(&transactions)?)?;
    tracing::info!(path = %path.display(), calls = calls.len(), "wrote bundle");
    Ok(())
}
