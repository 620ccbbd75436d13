//! # Token Scenarios
//!
//! End-to-end flows through `LedgerService`: deployment, transfer, delegated
//! transfer, minting and burning, checked against whole-token balances.
//!
//! ## Test Categories
//!
//! 1. **Fee-free ledger** - plain ERC-20 arithmetic
//! 2. **Reference fee** - 2% added on top of every transfer
//! 3. **Null address** - rejected everywhere, state untouched
//! 4. **Deployment** - from TOML config

use mnt_ledger::prelude::*;
use std::sync::Arc;

// =============================================================================
// TEST HELPERS
// =============================================================================

fn owner() -> Address {
    "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap()
}

fn addr1() -> Address {
    "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".parse().unwrap()
}

fn addr2() -> Address {
    "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc".parse().unwrap()
}

fn tokens(amount: &str) -> U256 {
    parse_units(amount).unwrap()
}

fn deploy(fees: FeeSchedule) -> LedgerService<InMemoryEventLog> {
    mnt_telemetry::init_for_tests();
    let genesis = Genesis::new(owner(), to_base_units(111)).with_fees(fees);
    LedgerService::new(genesis, Arc::new(InMemoryEventLog::new())).unwrap()
}

fn assert_balances(ledger: &impl TokenLedgerApi, expected: &[(Address, &str)]) {
    for (account, amount) in expected {
        assert_eq!(
            format_units(ledger.balance_of(account)),
            *amount,
            "balance of {account}"
        );
    }
}

// =============================================================================
// FEE-FREE LEDGER
// =============================================================================

#[test]
fn test_metadata_and_initial_supply() {
    let ledger = deploy(FeeSchedule::ZERO);

    assert_eq!(ledger.name(), "Manul Token");
    assert_eq!(ledger.symbol(), "MNT");
    assert_eq!(ledger.decimals(), 18);
    assert_eq!(ledger.total_supply(), to_base_units(111));
    assert_eq!(ledger.balance_of(&owner()), to_base_units(111));
}

#[test]
fn test_fee_free_transfer() {
    let ledger = deploy(FeeSchedule::ZERO);

    let receipt = ledger.transfer(owner(), addr1(), tokens("20")).unwrap();

    assert_eq!(
        receipt.events,
        vec![LedgerEvent::Transfer {
            from: owner(),
            to: addr1(),
            amount: tokens("20"),
        }]
    );
    assert_balances(&ledger, &[(owner(), "91"), (addr1(), "20")]);
}

#[test]
fn test_fee_free_delegated_transfer() {
    let ledger = deploy(FeeSchedule::ZERO);
    ledger.transfer(owner(), addr1(), tokens("20")).unwrap();

    let receipt = ledger.approve(owner(), addr1(), tokens("60")).unwrap();
    assert_eq!(
        receipt.events,
        vec![LedgerEvent::Approval {
            owner: owner(),
            delegate: addr1(),
            amount: tokens("60"),
        }]
    );

    let err = ledger
        .transfer_from(addr1(), owner(), addr1(), tokens("65"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));

    ledger
        .transfer_from(addr1(), owner(), addr1(), tokens("30"))
        .unwrap();

    assert_balances(&ledger, &[(owner(), "61"), (addr1(), "50")]);
    assert_eq!(ledger.allowance(&owner(), &addr1()), tokens("30"));
}

#[test]
fn test_fee_free_mint_and_burn() {
    let ledger = deploy(FeeSchedule::ZERO);
    ledger.transfer(owner(), addr1(), tokens("20")).unwrap();
    ledger.approve(owner(), addr1(), tokens("60")).unwrap();
    ledger
        .transfer_from(addr1(), owner(), addr1(), tokens("30"))
        .unwrap();

    let err = ledger.mint(owner(), owner(), tokens("22")).unwrap_err();
    assert!(matches!(err, LedgerError::Unauthorized { role: Role::Minter, .. }));

    ledger.grant_role(owner(), Role::Minter, owner()).unwrap();
    let receipt = ledger.mint(owner(), owner(), tokens("22")).unwrap();
    assert!(receipt.events[0].is_mint());
    assert_balances(&ledger, &[(owner(), "83")]);
    assert_eq!(ledger.total_supply(), to_base_units(133));

    ledger.grant_role(owner(), Role::Burner, owner()).unwrap();
    let err = ledger.burn(owner(), owner(), tokens("222")).unwrap_err();
    assert!(err.to_string().starts_with("insufficient balance to burn"));

    ledger.burn(owner(), owner(), tokens("23")).unwrap();
    assert_balances(&ledger, &[(owner(), "60")]);
    assert_eq!(ledger.total_supply(), to_base_units(110));
    assert!(ledger.audit().is_empty());
}

// =============================================================================
// REFERENCE FEE
// =============================================================================

#[test]
fn test_transfer_with_fee() {
    let ledger = deploy(FeeSchedule::REFERENCE);

    let receipt = ledger.transfer(owner(), addr1(), tokens("20")).unwrap();

    assert_eq!(receipt.transferred(), Some(tokens("20.4")));
    assert_balances(&ledger, &[(owner(), "90.6"), (addr1(), "20.4")]);
    assert_eq!(ledger.total_supply(), to_base_units(111));
}

#[test]
fn test_full_flow_with_fee() {
    let ledger = deploy(FeeSchedule::REFERENCE);
    ledger.transfer(owner(), addr1(), tokens("20")).unwrap();
    ledger.approve(owner(), addr1(), tokens("60")).unwrap();

    // 65 + 1.3 exceeds the allowance of 60
    let err = ledger
        .transfer_from(addr1(), owner(), addr1(), tokens("65"))
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientAllowance {
            owner: owner(),
            delegate: addr1(),
            required: tokens("66.3"),
            available: tokens("60"),
        }
    );

    ledger
        .transfer_from(addr1(), owner(), addr1(), tokens("29"))
        .unwrap();
    assert_eq!(ledger.allowance(&owner(), &addr1()), tokens("30.42"));
    assert_balances(&ledger, &[(owner(), "61.02"), (addr1(), "49.98")]);

    ledger.grant_role(owner(), Role::Minter, owner()).unwrap();
    ledger.mint(owner(), owner(), tokens("22")).unwrap();
    assert_balances(&ledger, &[(owner(), "83.02")]);
    assert_eq!(ledger.total_supply(), to_base_units(133));

    ledger.grant_role(owner(), Role::Burner, owner()).unwrap();
    ledger.burn(owner(), owner(), tokens("222")).unwrap_err();
    ledger.burn(owner(), owner(), tokens("23")).unwrap();
    assert_balances(&ledger, &[(owner(), "60.02")]);
    assert_eq!(ledger.total_supply(), to_base_units(110));
    assert!(ledger.audit().is_empty());
}

#[test]
fn test_whole_balance_cannot_be_sent_with_fee() {
    let ledger = deploy(FeeSchedule::REFERENCE);

    let err = ledger
        .transfer(owner(), addr1(), to_base_units(111))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));

    // 108.8 + 2.176 fits in 111
    ledger.transfer(owner(), addr1(), tokens("108.8")).unwrap();
    assert_balances(&ledger, &[(owner(), "0.024"), (addr1(), "110.976")]);
}

#[test]
fn test_unlimited_allowance_through_service() {
    let ledger = deploy(FeeSchedule::REFERENCE);
    ledger
        .approve(owner(), addr1(), UNLIMITED_ALLOWANCE)
        .unwrap();

    for _ in 0..5 {
        ledger
            .transfer_from(addr1(), owner(), addr2(), tokens("10"))
            .unwrap();
    }

    assert_eq!(ledger.allowance(&owner(), &addr1()), U256::MAX);
    assert_balances(&ledger, &[(addr2(), "51"), (owner(), "60")]);
}

// =============================================================================
// NULL ADDRESS
// =============================================================================

#[test]
fn test_null_address_rejected_everywhere() {
    let ledger = deploy(FeeSchedule::REFERENCE);
    ledger.grant_role(owner(), Role::Minter, owner()).unwrap();
    ledger.grant_role(owner(), Role::Burner, owner()).unwrap();
    ledger.approve(owner(), addr1(), tokens("50")).unwrap();
    ledger.sink().clear();
    let before = ledger.stats().operations_applied;

    let null = Address::ZERO;
    let one = tokens("1");
    let results = [
        ledger.transfer(owner(), null, one),
        ledger.transfer(null, owner(), one),
        ledger.approve(owner(), null, one),
        ledger.approve(null, owner(), one),
        ledger.transfer_from(addr1(), owner(), null, one),
        ledger.transfer_from(addr1(), null, addr2(), one),
        ledger.transfer_from(null, owner(), addr2(), one),
        ledger.mint(owner(), null, one),
        ledger.burn(owner(), null, one),
        ledger.grant_role(owner(), Role::Minter, null),
    ];

    for result in results {
        assert!(matches!(result, Err(LedgerError::InvalidAddress { .. })));
    }
    assert!(ledger.sink().is_empty());
    assert_eq!(ledger.stats().operations_applied, before);
    assert_eq!(ledger.balance_of(&null), U256::zero());
    assert_eq!(ledger.total_supply(), to_base_units(111));
    assert!(ledger.audit().is_empty());
}

// =============================================================================
// DEPLOYMENT
// =============================================================================

#[test]
fn test_deploy_from_toml() {
    mnt_telemetry::init_for_tests();
    let config = LedgerConfig::from_toml_str(
        r#"
        initial_supply = "111000000000000000000"
        deployer = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"

        [fee]
        numerator = 0
        denominator = 1
        "#,
    )
    .unwrap();

    let ledger = LedgerService::deploy(&config, Arc::new(InMemoryEventLog::new())).unwrap();

    assert!(ledger.has_role(Role::Admin, &owner()));
    assert_eq!(ledger.fee_schedule(), FeeSchedule::ZERO);
    assert_balances(&ledger, &[(owner(), "111")]);
    assert!(ledger.sink().events()[0].is_mint());
}
