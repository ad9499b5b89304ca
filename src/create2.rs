//! CREATE2 address prediction for module clones and Safe proxies
//!
//! Every DAO module is an EIP-1167 minimal proxy deployed by the Zodiac module
//! proxy factory. The factory derives the salt from the initializer and a
//! caller-chosen nonce, so the clone address is known before anything is
//! deployed:
//!
//! ```text
//! init_code = 602d8060093d393df3363d3d373d3d3d363d73 ++ template ++ 5af43d82803e903d91602b57fd5bf3
//! salt      = keccak256(keccak256(initializer) ++ nonce)
//! address   = keccak256(0xff ++ factory ++ salt ++ keccak256(init_code))[12:]
//! ```
//!
//! The Safe proxy factory uses the same salt rule with a different init code
//! (`proxyCreationCode ++ singleton`).

use alloy::primitives::{hex, keccak256, Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;

use crate::chain::ChainAddresses;
use crate::contracts::{ISafeProxyFactory, ISafeSetup};
use crate::types::Call;

/// EIP-1167 creation code preceding the template address
pub const CLONE_PREFIX: [u8; 19] = hex!("602d8060093d393df3363d3d373d3d3d363d73");

/// EIP-1167 creation code following the template address
pub const CLONE_SUFFIX: [u8; 15] = hex!("5af43d82803e903d91602b57fd5bf3");

/// Creation code of a minimal proxy delegating to `template`
pub fn clone_creation_code(template: Address) -> Bytes {
    let mut code = Vec::with_capacity(CLONE_PREFIX.len() + 20 + CLONE_SUFFIX.len());
    code.extend_from_slice(&CLONE_PREFIX);
    code.extend_from_slice(template.as_slice());
    code.extend_from_slice(&CLONE_SUFFIX);
    Bytes::from(code)
}

/// Salt used by both factories: keccak256(keccak256(initializer) ++ nonce)
pub fn generate_salt(initializer: &[u8], nonce: U256) -> B256 {
    let initializer_hash = keccak256(initializer);

    let mut salt_input = [0u8; 64];
    salt_input[..32].copy_from_slice(initializer_hash.as_slice());
    salt_input[32..64].copy_from_slice(&nonce.to_be_bytes::<32>());

    keccak256(salt_input)
}

/// keccak256(0xff ++ deployer ++ salt ++ keccak256(init_code))[12:]
pub fn create2_address(deployer: Address, salt: B256, init_code: &[u8]) -> Address {
    let init_code_hash = keccak256(init_code);

    let mut create2_input = Vec::with_capacity(1 + 20 + 32 + 32);
    create2_input.push(0xff);
    create2_input.extend_from_slice(deployer.as_slice());
    create2_input.extend_from_slice(salt.as_slice());
    create2_input.extend_from_slice(init_code_hash.as_slice());

    let hash = keccak256(&create2_input);

    Address::from_slice(&hash[12..])
}

/// Predicts where `factory.deployModule(template, initializer, nonce)` deploys.
///
/// Pure: identical inputs always give the identical address.
pub fn predict_module_address(
    factory: Address,
    template: Address,
    initializer: &[u8],
    nonce: U256,
) -> Address {
    let salt = generate_salt(initializer, nonce);
    create2_address(factory, salt, &clone_creation_code(template))
}

/// Encodes the Safe.setup() call for proxy initialization
pub fn encode_setup_call(owners: &[Address], threshold: u64, fallback_handler: Address) -> Bytes {
    let setup_call = ISafeSetup::setupCall {
        _owners: owners.to_vec(),
        _threshold: U256::from(threshold),
        to: Address::ZERO,
        data: Bytes::new(),
        fallbackHandler: fallback_handler,
        paymentToken: Address::ZERO,
        payment: U256::ZERO,
        paymentReceiver: Address::ZERO,
    };

    Bytes::from(setup_call.abi_encode())
}

/// Computes the CREATE2 address for a Safe proxy
///
/// `creation_code` is `SafeProxyFactory.proxyCreationCode()`; the singleton is
/// appended to it as a 32-byte word.
pub fn compute_create2_address(
    factory: Address,
    singleton: Address,
    initializer: &Bytes,
    salt_nonce: U256,
    creation_code: &Bytes,
) -> Address {
    let salt = generate_salt(initializer, salt_nonce);

    let mut init_code = creation_code.to_vec();
    let mut singleton_padded = [0u8; 32];
    singleton_padded[12..].copy_from_slice(singleton.as_slice());
    init_code.extend_from_slice(&singleton_padded);

    create2_address(factory, salt, &init_code)
}

/// A Safe that does not exist yet: its creation call and predicted address
#[derive(Debug, Clone)]
pub struct SafeDeployment {
    /// Predicted Safe proxy address
    pub address: Address,
    /// `createProxyWithNonce` call on the Safe proxy factory
    pub call: Call,
    /// Owners in setup order
    pub owners: Vec<Address>,
    pub threshold: u64,
    pub salt_nonce: U256,
}

impl SafeDeployment {
    /// Builds the creation call for a Safe owned by `owners` at `threshold`
    pub fn new(
        addresses: &ChainAddresses,
        owners: Vec<Address>,
        threshold: u64,
        salt_nonce: U256,
        creation_code: &Bytes,
    ) -> Self {
        let initializer = encode_setup_call(&owners, threshold, addresses.fallback_handler);

        let address = compute_create2_address(
            addresses.proxy_factory,
            addresses.safe_singleton,
            &initializer,
            salt_nonce,
            creation_code,
        );

        let call = Call::typed(
            addresses.proxy_factory,
            ISafeProxyFactory::createProxyWithNonceCall {
                _singleton: addresses.safe_singleton,
                initializer,
                saltNonce: salt_nonce,
            },
        );

        Self {
            address,
            call,
            owners,
            threshold,
            salt_nonce,
        }
    }
}
