//! # Withdrawal Races
//!
//! Overlapping calls against one lock while a custody transfer is still in
//! flight. Readers see the committed state until the transfer resolves and
//! overlapping mutations wait for it.

#[cfg(test)]
mod tests {
    use crate::fixtures::{deploy, deploy_funded, ether, ALICE, BOB, START};
    use shared_bus::{EventFilter, EventTopic};
    use shared_types::U256;
    use std::sync::Arc;
    use std::time::Duration;
    use wh_02_lock_vault::{LockStatus, LockVaultApi, ValueCustody, VaultError};

    use crate::fixtures::SlowCustody;

    fn slow_custody() -> Arc<SlowCustody> {
        let custody = SlowCustody::new(Duration::from_millis(20));
        custody.inner.fund(ALICE, ether("10"));
        Arc::new(custody)
    }

    /// Two withdrawals racing on one lock pay out exactly once.
    #[tokio::test]
    async fn test_concurrent_withdrawals_pay_once() {
        let d = deploy(slow_custody(), 2000);
        d.vault.deposit(ALICE, ether("4")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START, U256::from(2500u64))
            .await
            .unwrap();

        let (first, second) = tokio::join!(d.vault.withdraw(ALICE), d.vault.withdraw(ALICE));

        let results = [first, second];
        let paid: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
        assert_eq!(paid.len(), 1);
        assert_eq!(*paid[0], Ok(ether("4")));
        assert!(results
            .iter()
            .any(|r| *r == Err(VaultError::WithdrawalConditionsNotMet)));

        assert_eq!(d.custody.inner.balance_of(&ALICE), ether("10"));
        assert!(d.custody.custodied().await.is_zero());
    }

    /// A deposit that lands while a successful transfer is pending waits,
    /// then finds the lock withdrawn.
    #[tokio::test]
    async fn test_deposit_during_pending_withdrawal_rejected() {
        let d = deploy(slow_custody(), 2000);
        d.vault.deposit(ALICE, ether("1")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START, U256::from(2500u64))
            .await
            .unwrap();

        let (withdrawn, deposited) =
            tokio::join!(d.vault.withdraw(ALICE), d.vault.deposit(ALICE, ether("1")));

        assert_eq!(withdrawn, Ok(ether("1")));
        assert_eq!(deposited, Err(VaultError::LockAlreadyWithdrawn));
        assert_eq!(d.custody.inner.balance_of(&ALICE), ether("10"));
    }

    /// A deposit that lands while a failing transfer is pending waits and is
    /// then accepted; readers never see the lock as withdrawn.
    #[tokio::test]
    async fn test_deposit_during_failing_withdrawal_accepted() {
        let d = deploy(slow_custody(), 2000);
        d.vault.deposit(ALICE, ether("1")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START, U256::from(2500u64))
            .await
            .unwrap();
        d.custody.inner.fail_next_transfer("recipient reverted");

        let (withdrawn, deposited, pending) = tokio::join!(
            d.vault.withdraw(ALICE),
            async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                d.vault.deposit(ALICE, ether("1")).await
            },
            async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                d.vault.get_lock_info(ALICE).await
            }
        );

        assert!(matches!(withdrawn, Err(VaultError::TransferFailed { .. })));
        assert_eq!(deposited, Ok(ether("2")));
        assert!(!pending.withdrawn);
        assert_eq!(pending.status, LockStatus::Committed);
        assert_eq!(pending.amount, ether("1"));

        let info = d.vault.get_lock_info(ALICE).await;
        assert_eq!(info.amount, ether("2"));
        assert_eq!(d.custody.custodied().await, ether("2"));
        assert_eq!(d.custody.inner.balance_of(&ALICE), ether("8"));
    }

    /// A failed transfer leaves the lock committed and a retry succeeds.
    #[tokio::test]
    async fn test_failed_transfer_keeps_lock_then_retries() {
        let d = deploy_funded(2000);
        let mut withdrawals = d.bus.subscribe(EventFilter::topics(vec![EventTopic::Withdrawals]));

        d.vault.deposit(ALICE, ether("2")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START, U256::from(2500u64))
            .await
            .unwrap();

        d.custody.fail_next_transfer("recipient reverted");
        assert!(matches!(
            d.vault.withdraw(ALICE).await,
            Err(VaultError::TransferFailed { .. })
        ));

        let info = d.vault.get_lock_info(ALICE).await;
        assert_eq!(info.status, LockStatus::Committed);
        assert!(!info.withdrawn);
        assert_eq!(d.vault.total_locked().await, ether("2"));
        assert_eq!(d.custody.custodied().await, ether("2"));
        assert!(withdrawals.drain().is_empty());

        assert_eq!(d.vault.withdraw(ALICE).await, Ok(ether("2")));
        assert_eq!(withdrawals.drain().len(), 1);
        assert_eq!(d.custody.balance_of(&ALICE), ether("10"));
    }

    /// Deposits from many tasks all land in the total.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_deposits_accumulate() {
        let d = deploy_funded(2000);

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let vault = Arc::clone(&d.vault);
                tokio::spawn(async move { vault.deposit(BOB, ether("0.1")).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(d.vault.get_lock_info(BOB).await.amount, ether("2"));
        assert_eq!(d.custody.balance_of(&BOB), ether("8"));
        assert_eq!(d.custody.custodied().await, ether("2"));
    }
}
