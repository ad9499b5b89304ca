//! Contract ABI definitions for Safe v1.4.1 and the DAO module templates

use alloy::primitives::{address, Address};
use alloy::sol;

/// Placeholder module address used by Safe and Zodiac linked lists.
///
/// Voting strategies are initialized with this as their Azorius module and
/// rewired with `setAzorius` once the real module address is known.
pub const SENTINEL_MODULE: Address = address!("0000000000000000000000000000000000000001");

/// Basis numerator passed to every linear voting strategy (50% of 1,000,000).
pub const BASIS_NUMERATOR: u64 = 500_000;

/// Voting weight required to submit a proposal.
pub const PROPOSER_WEIGHT: u64 = 1;

sol! {
    /// Safe v1.4.1 interface: execution and owner/module management
    #[sol(rpc)]
    interface ISafe {
        /// Execute a transaction (requires valid signature)
        function execTransaction(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address payable refundReceiver,
            bytes memory signatures
        ) external payable returns (bool success);

        /// Returns array of owners
        function getOwners() external view returns (address[] memory owners);

        /// Returns the threshold (number of required signatures)
        function getThreshold() external view returns (uint256 threshold);

        function enableModule(address module) external;

        function setGuard(address guard) external;

        function addOwnerWithThreshold(address owner, uint256 _threshold) external;

        function removeOwner(address prevOwner, address owner, uint256 _threshold) external;
    }

    /// Safe.setup() used as the proxy initializer
    interface ISafeSetup {
        function setup(
            address[] calldata _owners,
            uint256 _threshold,
            address to,
            bytes calldata data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address payable paymentReceiver
        ) external;
    }

    /// Safe proxy factory
    #[sol(rpc)]
    interface ISafeProxyFactory {
        function createProxyWithNonce(address _singleton, bytes memory initializer, uint256 saltNonce)
            external returns (address proxy);

        function proxyCreationCode() external pure returns (bytes memory);
    }

    /// MultiSendCallOnly - batch relay that rejects DelegateCall entries
    #[sol(rpc)]
    interface IMultiSendCallOnly {
        /// Sends multiple transactions in a single call (Call only, no DelegateCall)
        function multiSend(bytes memory transactions) external payable;
    }

    /// Zodiac module proxy factory (EIP-1167 clones)
    interface IModuleProxyFactory {
        function deployModule(address masterCopy, bytes memory initializer, uint256 saltNonce)
            external returns (address proxy);
    }

    /// On-chain key/value metadata registry
    interface IKeyValuePairs {
        function updateValues(string[] memory _keys, string[] memory _values) external;
    }

    /// Votes token, unlocked variant
    interface IVotesERC20 {
        function setUp(bytes memory initializeParams) external;
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Votes token, lockable variant
    interface IVotesERC20V1 {
        struct Metadata {
            string name;
            string symbol;
        }

        struct Allocation {
            address to;
            uint256 amount;
        }

        function initialize(
            Metadata calldata metadata_,
            Allocation[] calldata allocations_,
            address owner_,
            bool locked_,
            uint256 maxTotalSupply_
        ) external;
    }

    /// Token-weighted linear voting strategy
    #[sol(rpc)]
    interface ILinearERC20Voting {
        function setUp(bytes memory initializeParams) external;
        function setAzorius(address azoriusModule) external;
        function QUORUM_DENOMINATOR() external view returns (uint256);
    }

    /// NFT-weighted linear voting strategy
    interface ILinearERC721Voting {
        function setUp(bytes memory initializeParams) external;
        function setAzorius(address azoriusModule) external;
    }

    /// Azorius governance module
    interface IAzorius {
        function setUp(bytes memory initializeParams) external;
        function setGuard(address guard) external;
    }

    /// Claim module letting child token holders pull a parent token allocation
    interface IERC20Claim {
        function setUp(bytes memory initializeParams) external;
    }

    /// Shared surface of the ERC20, ERC721 and multisig freeze voting templates
    interface IFreezeVoting {
        function owner() external view returns (address);
        function setUp(bytes memory initializeParams) external;
    }

    /// Shared surface of the Azorius and multisig freeze guard templates
    interface IFreezeGuard {
        function setUp(bytes memory initializeParams) external;
    }

    /// Fractal module letting a parent DAO execute through a child Safe
    interface IFractalModule {
        function setUp(bytes memory initializeParams) external;
    }
}
