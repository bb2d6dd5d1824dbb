//! # Lock Lifecycle Flows
//!
//! Deposit, commit, unlock and withdraw through the vault's public API with
//! a real oracle adapter, custody ledger and event bus wired in.

#[cfg(test)]
mod tests {
    use crate::fixtures::{deploy_funded, ether, usd, ALICE, BOB, START};
    use shared_bus::{EventFilter, EventTopic, VaultEvent};
    use shared_types::{U256, SECONDS_PER_DAY};
    use wh_02_lock_vault::{LockStatus, LockVaultApi, ValueCustody, VaultError};
    use wh_runtime::{RuntimeConfig, Scenario, ScenarioRunner, VaultContainer};

    // =============================================================================
    // END TO END
    // =============================================================================

    /// Lock 1 ether for a year at $2500 while ETH trades at $2000, then
    /// unlock early when the price reaches $3000.
    #[tokio::test]
    async fn test_price_unlock_end_to_end() {
        let d = deploy_funded(2000);
        let mut events = d.bus.subscribe(EventFilter::all());
        let target_date = START + 365 * SECONDS_PER_DAY;

        assert_eq!(d.vault.deposit(ALICE, ether("1")).await, Ok(ether("1")));
        d.vault
            .set_parameters(ALICE, target_date, U256::from(2500u64))
            .await
            .unwrap();

        assert_eq!(d.vault.can_withdraw(ALICE).await, Ok(false));
        assert_eq!(
            d.vault.withdraw(ALICE).await,
            Err(VaultError::WithdrawalConditionsNotMet)
        );

        d.feed.update_answer(usd(3000));
        assert_eq!(d.vault.can_withdraw(ALICE).await, Ok(true));
        assert_eq!(d.vault.withdraw(ALICE).await, Ok(ether("1")));

        assert_eq!(d.custody.balance_of(&ALICE), ether("10"));
        assert!(d.custody.custodied().await.is_zero());

        let info = d.vault.get_lock_info(ALICE).await;
        assert!(info.withdrawn);
        assert_eq!(info.amount, ether("1"));
        assert_eq!(info.target_date, target_date);
        assert_eq!(info.target_price_usd, U256::from(2500u64));

        // Terminal: no new deposit, no second withdrawal
        assert_eq!(
            d.vault.deposit(ALICE, ether("1")).await,
            Err(VaultError::LockAlreadyWithdrawn)
        );
        assert_eq!(
            d.vault.withdraw(ALICE).await,
            Err(VaultError::WithdrawalConditionsNotMet)
        );

        let published = events.drain();
        assert_eq!(
            published,
            vec![
                VaultEvent::Deposited {
                    owner: ALICE,
                    amount: ether("1"),
                    total: ether("1"),
                },
                VaultEvent::ParametersCommitted {
                    owner: ALICE,
                    target_date,
                    target_price: U256::from(250_000_000_000u64),
                },
                VaultEvent::Withdrawn {
                    owner: ALICE,
                    amount: ether("1"),
                },
            ]
        );
    }

    /// The date alone unlocks, whatever the price does.
    #[tokio::test]
    async fn test_date_unlock_at_exact_target() {
        let d = deploy_funded(2000);
        let target_date = START + 30 * SECONDS_PER_DAY;

        d.vault.deposit(ALICE, ether("2")).await.unwrap();
        d.vault
            .set_parameters(ALICE, target_date, U256::from(1_000_000u64))
            .await
            .unwrap();

        d.clock.set(target_date - 1);
        assert_eq!(d.vault.can_withdraw(ALICE).await, Ok(false));

        d.clock.set(target_date);
        assert_eq!(d.vault.can_withdraw(ALICE).await, Ok(true));
        assert_eq!(d.vault.withdraw(ALICE).await, Ok(ether("2")));
    }

    /// A target date already in the past unlocks immediately.
    #[tokio::test]
    async fn test_past_target_date_unlocks_immediately() {
        let d = deploy_funded(2000);
        d.vault.deposit(ALICE, ether("1")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START - 1, U256::from(1_000_000u64))
            .await
            .unwrap();

        assert_eq!(d.vault.withdraw(ALICE).await, Ok(ether("1")));
    }

    /// Deposits after commitment join the same lock and leave together.
    #[tokio::test]
    async fn test_top_up_after_commit_withdrawn_in_full() {
        let d = deploy_funded(2000);
        d.vault.deposit(ALICE, ether("1")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START + SECONDS_PER_DAY, U256::from(2500u64))
            .await
            .unwrap();
        assert_eq!(d.vault.deposit(ALICE, ether("0.5")).await, Ok(ether("1.5")));

        d.clock.advance(SECONDS_PER_DAY);
        assert_eq!(d.vault.withdraw(ALICE).await, Ok(ether("1.5")));
        assert_eq!(d.custody.balance_of(&ALICE), ether("10"));
    }

    // =============================================================================
    // ISOLATION
    // =============================================================================

    /// One owner's lock never affects another's.
    #[tokio::test]
    async fn test_locks_isolated_per_owner() {
        let d = deploy_funded(2000);

        d.vault.deposit(ALICE, ether("1")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START + 365 * SECONDS_PER_DAY, U256::from(5000u64))
            .await
            .unwrap();

        d.vault.deposit(BOB, ether("3")).await.unwrap();
        d.vault
            .set_parameters(BOB, START, U256::from(5000u64))
            .await
            .unwrap();

        assert_eq!(d.vault.total_locked().await, ether("4"));
        assert_eq!(d.vault.withdraw(BOB).await, Ok(ether("3")));

        assert_eq!(d.vault.can_withdraw(ALICE).await, Ok(false));
        assert_eq!(
            d.vault.get_lock_info(ALICE).await.status,
            LockStatus::Committed
        );
        assert_eq!(d.vault.total_locked().await, ether("1"));
        assert_eq!(d.custody.custodied().await, ether("1"));
    }

    /// Subscribers filtered by owner and topic only see their events.
    #[tokio::test]
    async fn test_event_filters_by_owner_and_topic() {
        let d = deploy_funded(2000);
        let mut bob_events = d.bus.subscribe(EventFilter::owners(vec![BOB]));
        let mut deposits = d.bus.subscribe(EventFilter::topics(vec![EventTopic::Deposits]));

        d.vault.deposit(ALICE, ether("1")).await.unwrap();
        d.vault.deposit(BOB, ether("2")).await.unwrap();
        d.vault
            .set_parameters(BOB, START, U256::from(1u64))
            .await
            .unwrap();

        let bob_seen = bob_events.drain();
        assert_eq!(bob_seen.len(), 2);
        assert!(bob_seen.iter().all(|e| *e.owner() == BOB));

        let deposit_seen = deposits.drain();
        assert_eq!(deposit_seen.len(), 2);
        assert!(deposit_seen
            .iter()
            .all(|e| e.topic() == EventTopic::Deposits));
    }

    /// Rejected operations publish nothing.
    #[tokio::test]
    async fn test_rejections_publish_no_events() {
        let d = deploy_funded(2000);
        let mut events = d.bus.subscribe(EventFilter::all());

        assert_eq!(
            d.vault
                .set_parameters(ALICE, START, U256::from(1u64))
                .await,
            Err(VaultError::NoDepositFound)
        );
        assert_eq!(
            d.vault.deposit(ALICE, U256::zero()).await,
            Err(VaultError::InvalidAmount)
        );
        assert_eq!(
            d.vault.withdraw(ALICE).await,
            Err(VaultError::WithdrawalConditionsNotMet)
        );

        assert!(events.drain().is_empty());
    }

    // =============================================================================
    // RUNTIME
    // =============================================================================

    /// The runtime's built-in scenario passes and its report serializes.
    #[tokio::test]
    async fn test_runtime_scenario_report() {
        let container = VaultContainer::new(&RuntimeConfig {
            start_time: Some(START),
            ..RuntimeConfig::default()
        })
        .unwrap();

        let report = ScenarioRunner::new(&container)
            .run(&Scenario::price_unlock())
            .await
            .unwrap();
        assert!(report.passed);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["passed"], true);
        assert_eq!(json["steps"][7]["outcome"]["kind"], "withdrawn");
        assert_eq!(json["steps"][7]["outcome"]["amount"], "1");
        assert_eq!(json["steps"][8]["outcome"]["status"], "Withdrawn");
    }
}
