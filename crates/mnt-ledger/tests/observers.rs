//! # Observer Tests
//!
//! Event delivery through `LedgerService` to broadcast subscribers.

use mnt_ledger::prelude::*;
use std::sync::Arc;
use tokio::sync::broadcast::error::TryRecvError;

fn owner() -> Address {
    Address::repeat_byte(0x11)
}

fn spender() -> Address {
    Address::repeat_byte(0x22)
}

#[tokio::test]
async fn test_subscriber_sees_events_in_order() {
    mnt_telemetry::init_for_tests();
    let sink = Arc::new(BroadcastEventSink::new());
    let mut events = sink.subscribe();

    let genesis = Genesis::new(owner(), U256::from(1_000)).with_fees(FeeSchedule::ZERO);
    let ledger = LedgerService::new(genesis, Arc::clone(&sink)).unwrap();
    ledger.approve(owner(), spender(), U256::from(300)).unwrap();
    ledger
        .transfer_from(spender(), owner(), spender(), U256::from(100))
        .unwrap();
    ledger.grant_role(owner(), Role::Burner, owner()).unwrap();
    ledger.burn(owner(), spender(), U256::from(40)).unwrap();

    let mut received = Vec::new();
    for _ in 0..5 {
        received.push(events.recv().await.unwrap());
    }

    assert_eq!(
        received.iter().map(LedgerEvent::name).collect::<Vec<_>>(),
        vec!["Transfer", "Approval", "Transfer", "RoleGranted", "Transfer"]
    );
    assert!(received[0].is_mint());
    assert!(received[4].is_burn());
    assert_eq!(
        received[3],
        LedgerEvent::RoleGranted {
            role: Role::Burner,
            account: owner(),
            sender: owner(),
        }
    );
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(ledger.stats().deliveries, 5);
}

#[tokio::test]
async fn test_rejections_are_not_broadcast() {
    let sink = Arc::new(BroadcastEventSink::with_capacity(16));
    let genesis = Genesis::new(owner(), U256::from(10));
    let ledger = LedgerService::new(genesis, Arc::clone(&sink)).unwrap();
    let mut events = sink.subscribe();

    ledger
        .transfer(owner(), spender(), U256::from(11))
        .unwrap_err();
    ledger
        .mint(spender(), spender(), U256::from(1))
        .unwrap_err();

    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(ledger.stats().operations_rejected, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_one_order() {
    let sink = Arc::new(BroadcastEventSink::with_capacity(256));
    let mut events = sink.subscribe();
    let genesis = Genesis::new(owner(), U256::from(1_000_000)).with_fees(FeeSchedule::ZERO);
    let ledger = Arc::new(LedgerService::new(genesis, Arc::clone(&sink)).unwrap());

    let mut tasks = Vec::new();
    for i in 1..=4u8 {
        let ledger = Arc::clone(&ledger);
        tasks.push(tokio::spawn(async move {
            for _ in 0..25 {
                ledger
                    .transfer(owner(), Address::repeat_byte(0x40 + i), U256::from(10))
                    .unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    // genesis + 100 transfers, each leaving the owner 10 poorer
    let mut expected_owner = U256::from(1_000_000);
    assert!(events.recv().await.unwrap().is_mint());
    for _ in 0..100 {
        match events.recv().await.unwrap() {
            LedgerEvent::Transfer { from, amount, .. } => {
                assert_eq!(from, owner());
                expected_owner -= amount;
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(ledger.balance_of(&owner()), expected_owner);
    assert_eq!(expected_owner, U256::from(999_000));
    assert!(ledger.audit().is_empty());
}
