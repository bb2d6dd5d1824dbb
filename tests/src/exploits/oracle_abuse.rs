//! # Oracle Abuse
//!
//! Feeds that report carried-over, incomplete or non-positive rounds, and
//! prices that move between `can_withdraw` and `withdraw`. None of them
//! may release a lock early.

#[cfg(test)]
mod tests {
    use crate::fixtures::{deploy_funded, ether, usd, Deployment, ALICE, START};
    use shared_types::{U256, SECONDS_PER_DAY};
    use wh_01_price_oracle::OracleError;
    use wh_02_lock_vault::{InMemoryCustody, LockStatus, LockVaultApi, ValueCustody, VaultError};

    const YEAR: u64 = 365 * SECONDS_PER_DAY;

    async fn committed_at_2500() -> Deployment<InMemoryCustody> {
        let d = deploy_funded(2000);
        d.vault.deposit(ALICE, ether("1")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START + YEAR, U256::from(2500u64))
            .await
            .unwrap();
        d
    }

    /// A spike reported in a round answered earlier is not trusted.
    #[tokio::test]
    async fn test_carried_over_round_does_not_unlock() {
        let d = committed_at_2500().await;
        let round = d.feed.update_answer(usd(10_000));
        d.feed.set_answered_in_round(round - 1);

        assert_eq!(
            d.vault.can_withdraw(ALICE).await,
            Err(VaultError::OracleUnavailable(OracleError::StaleRound {
                round_id: round,
                answered_in_round: round - 1,
            }))
        );
        assert!(matches!(
            d.vault.withdraw(ALICE).await,
            Err(VaultError::OracleUnavailable(_))
        ));
        assert_eq!(
            d.vault.get_lock_info(ALICE).await.status,
            LockStatus::Committed
        );
    }

    /// A round that never completed is not trusted.
    #[tokio::test]
    async fn test_incomplete_round_does_not_unlock() {
        let d = committed_at_2500().await;
        let next = d.feed.latest_round() + 1;
        d.feed.update_round_data(next, usd(10_000), 0, START);

        assert_eq!(
            d.vault.withdraw(ALICE).await,
            Err(VaultError::OracleUnavailable(OracleError::IncompleteRound(next)))
        );
        assert_eq!(d.custody.custodied().await, ether("1"));
    }

    /// A broken feed blocks the price path but not the date path.
    #[tokio::test]
    async fn test_negative_answer_blocks_only_price_path() {
        let d = committed_at_2500().await;
        d.feed.update_answer(-1);

        assert!(matches!(
            d.vault.can_withdraw(ALICE).await,
            Err(VaultError::OracleUnavailable(
                OracleError::NonPositiveAnswer { .. }
            ))
        ));

        d.clock.advance(YEAR);
        assert_eq!(d.vault.can_withdraw(ALICE).await, Ok(true));
        assert_eq!(d.vault.withdraw(ALICE).await, Ok(ether("1")));
    }

    /// An unreachable feed surfaces as an oracle error, not as "locked".
    #[tokio::test]
    async fn test_unreachable_feed_reported() {
        let d = committed_at_2500().await;
        d.feed.set_unreachable(true);

        assert!(matches!(
            d.vault.can_withdraw(ALICE).await,
            Err(VaultError::OracleUnavailable(OracleError::Unreachable(_)))
        ));

        d.feed.set_unreachable(false);
        assert_eq!(d.vault.can_withdraw(ALICE).await, Ok(false));
    }

    /// `withdraw` re-reads the price; an earlier `can_withdraw` is not a permit.
    #[tokio::test]
    async fn test_price_drop_after_check_blocks_withdraw() {
        let d = committed_at_2500().await;

        d.feed.update_answer(usd(2500));
        assert_eq!(d.vault.can_withdraw(ALICE).await, Ok(true));

        d.feed.update_answer(usd(2499));
        assert_eq!(
            d.vault.withdraw(ALICE).await,
            Err(VaultError::WithdrawalConditionsNotMet)
        );
        assert_eq!(d.custody.custodied().await, ether("1"));
    }
}
