//! End-to-end walks of the proposal lifecycle through the public API.

use quorumsig_lib::{
    AccountId, Address, LedgerClock, LoggingTransferExecutor, MultisigEngine, MultisigError,
    TransactionKind,
};

fn owners() -> Vec<AccountId> {
    vec!["alice".into(), "bob".into(), "carol".into()]
}

fn clock(slot: u64, unix_timestamp: i64) -> LedgerClock {
    LedgerClock::new(slot, unix_timestamp)
}

fn setup() -> (MultisigEngine, Address) {
    let mut engine = MultisigEngine::new();
    let addr = engine
        .create_multisig(&"alice".into(), owners(), 2, Some(3), &clock(1, 1_000))
        .unwrap();
    (engine, addr)
}

#[test]
fn transfer_lifecycle_from_proposal_to_execution() {
    let (mut engine, addr) = setup();

    // Propose a transfer against nonce 0.
    let id = engine
        .propose_transaction(
            &addr,
            &"alice".into(),
            b"transfer:carol:250".to_vec(),
            0,
            TransactionKind::Transfer,
            None,
            &clock(20, 2_000),
        )
        .unwrap();
    assert_eq!(id, 0);

    let registry = engine.registry(&addr).unwrap();
    assert_eq!(registry.transaction_count, 1);
    assert_eq!(registry.nonce, 1);

    // Owner B approves; the bitmap is index-aligned to the owner list.
    engine.approve_transaction(&addr, &"bob".into(), id).unwrap();
    assert_eq!(
        engine.proposal(&addr, id).unwrap().approvals,
        vec![false, true, false]
    );

    engine
        .approve_transaction(&addr, &"alice".into(), id)
        .unwrap();

    // Execute after a slot advance.
    engine
        .execute_transaction(
            &addr,
            &"carol".into(),
            id,
            &clock(21, 2_100),
            &mut LoggingTransferExecutor,
        )
        .unwrap();
    assert!(engine.proposal(&addr, id).unwrap().executed);

    // Re-execution is rejected.
    assert_eq!(
        engine.execute_transaction(
            &addr,
            &"carol".into(),
            id,
            &clock(22, 2_200),
            &mut LoggingTransferExecutor,
        ),
        Err(MultisigError::AlreadyExecuted)
    );
}

#[test]
fn nonce_strictly_orders_accepted_proposals() {
    let (mut engine, addr) = setup();

    for expected_nonce in 0..3u64 {
        let slot = 20 + expected_nonce * 11;
        let id = engine
            .propose_transaction(
                &addr,
                &"alice".into(),
                vec![1, 2, 3],
                expected_nonce,
                TransactionKind::Transfer,
                None,
                &clock(slot, 2_000 + expected_nonce as i64),
            )
            .unwrap();
        assert_eq!(id, expected_nonce);
        assert_eq!(engine.registry(&addr).unwrap().nonce, expected_nonce + 1);
    }

    // Every previously consumed nonce is dead forever.
    for stale in 0..3u64 {
        assert!(matches!(
            engine.propose_transaction(
                &addr,
                &"alice".into(),
                vec![1],
                stale,
                TransactionKind::Transfer,
                None,
                &clock(100, 3_000),
            ),
            Err(MultisigError::InvalidNonce { provided, .. }) if provided == stale
        ));
    }
}

#[test]
fn pause_recovery_runs_through_admin_quorum() {
    let (mut engine, addr) = setup();

    engine
        .emergency_pause(&addr, &"bob".into(), &clock(10, 1_500))
        .unwrap();
    assert_eq!(
        engine.registry(&addr).unwrap().paused_by,
        Some("bob".into())
    );

    // Standard work is frozen.
    assert_eq!(
        engine.propose_transaction(
            &addr,
            &"alice".into(),
            vec![1],
            0,
            TransactionKind::Transfer,
            None,
            &clock(20, 2_000),
        ),
        Err(MultisigError::MultisigPaused)
    );

    // The unpause proposal itself goes through the paused registry.
    let id = engine
        .propose_transaction(
            &addr,
            &"alice".into(),
            b"unpause".to_vec(),
            0,
            TransactionKind::AdminAction,
            None,
            &clock(20, 2_000),
        )
        .unwrap();
    for owner in ["alice", "bob", "carol"] {
        engine.approve_transaction(&addr, &owner.into(), id).unwrap();
    }
    engine
        .unpause(&addr, &"alice".into(), id, &clock(21, 2_100))
        .unwrap();

    let registry = engine.registry(&addr).unwrap();
    assert!(!registry.paused);
    assert_eq!(registry.paused_by, None);

    // Standard proposals flow again, against the advanced nonce.
    assert!(engine
        .propose_transaction(
            &addr,
            &"alice".into(),
            vec![1],
            1,
            TransactionKind::Transfer,
            None,
            &clock(40, 3_000),
        )
        .is_ok());
}

#[test]
fn engine_state_round_trips_through_json() {
    let (mut engine, addr) = setup();
    engine
        .propose_transaction(
            &addr,
            &"alice".into(),
            vec![1, 2, 3],
            0,
            TransactionKind::Transfer,
            Some(4),
            &clock(20, 2_000),
        )
        .unwrap();
    engine.approve_transaction(&addr, &"bob".into(), 0).unwrap();

    let json = serde_json::to_string_pretty(&engine).unwrap();
    let mut restored: MultisigEngine = serde_json::from_str(&json).unwrap();

    assert_eq!(
        restored.proposal(&addr, 0).unwrap(),
        engine.proposal(&addr, 0).unwrap()
    );

    // The restored engine keeps enforcing the lifecycle.
    restored
        .approve_transaction(&addr, &"alice".into(), 0)
        .unwrap();
    restored
        .execute_transaction(
            &addr,
            &"alice".into(),
            0,
            &clock(21, 2_100),
            &mut LoggingTransferExecutor,
        )
        .unwrap();
    assert!(restored.proposal(&addr, 0).unwrap().executed);
}
