//! Chain configuration and deployment constants

mod config;

pub use config::{ChainAddresses, ChainConfig, ModuleTemplates};
