//! # Reentrant Recipient
//!
//! The recipient of a withdrawal calls back into the vault from inside the
//! transfer, the classic DAO pattern. Any mutation for the owner being paid
//! is refused with `ReentrantCall` and custody pays out once.

#[cfg(test)]
mod tests {
    use crate::fixtures::{deploy, ether, Deployment, Oracle, ALICE, START};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared_types::{Address, U256};
    use std::sync::{Arc, OnceLock, Weak};
    use wh_02_lock_vault::{
        CustodyError, InMemoryCustody, LockStatus, LockVaultApi, LockVaultService, ValueCustody,
        VaultError,
    };

    type Vault = LockVaultService<Oracle, ReentrantCustody>;

    /// What the hostile recipient calls while being paid.
    #[derive(Clone, Copy)]
    enum Reentry {
        Withdraw,
        Deposit,
    }

    /// Custody whose recipient re-enters the vault once per transfer.
    struct ReentrantCustody {
        inner: InMemoryCustody,
        reentry: Reentry,
        vault: OnceLock<Weak<Vault>>,
        reentries: Mutex<Vec<Result<U256, VaultError>>>,
    }

    impl ReentrantCustody {
        fn new(reentry: Reentry) -> Self {
            let inner = InMemoryCustody::new();
            inner.fund(ALICE, ether("10"));
            Self {
                inner,
                reentry,
                vault: OnceLock::new(),
                reentries: Mutex::new(Vec::new()),
            }
        }
    }

    async fn attack(reentry: Reentry) -> Deployment<ReentrantCustody> {
        let d = deploy(Arc::new(ReentrantCustody::new(reentry)), 2000);
        d.custody
            .vault
            .set(Arc::downgrade(&d.vault))
            .unwrap_or_else(|_| panic!("vault already attached"));

        d.vault.deposit(ALICE, ether("5")).await.unwrap();
        d.vault
            .set_parameters(ALICE, START, U256::from(1u64))
            .await
            .unwrap();
        d
    }

    #[async_trait]
    impl ValueCustody for ReentrantCustody {
        async fn receive(&self, from: Address, amount: U256) -> Result<(), CustodyError> {
            self.inner.receive(from, amount).await
        }

        async fn transfer_out(&self, to: Address, amount: U256) -> Result<(), CustodyError> {
            let first_entry = self.reentries.lock().is_empty();
            if first_entry {
                if let Some(vault) = self.vault.get().and_then(Weak::upgrade) {
                    let nested = match self.reentry {
                        Reentry::Withdraw => vault.withdraw(to).await,
                        Reentry::Deposit => vault.deposit(to, ether("1")).await,
                    };
                    self.reentries.lock().push(nested);
                }
            }
            self.inner.transfer_out(to, amount).await
        }

        async fn custodied(&self) -> U256 {
            self.inner.custodied().await
        }
    }

    #[tokio::test]
    async fn test_reentrant_withdraw_refused() {
        let d = attack(Reentry::Withdraw).await;

        assert_eq!(d.vault.withdraw(ALICE).await, Ok(ether("5")));

        let reentries = d.custody.reentries.lock().clone();
        assert_eq!(reentries, vec![Err(VaultError::ReentrantCall)]);

        assert_eq!(d.custody.inner.balance_of(&ALICE), ether("10"));
        assert!(d.custody.custodied().await.is_zero());
        assert_eq!(
            d.vault.get_lock_info(ALICE).await.status,
            LockStatus::Withdrawn
        );
    }

    #[tokio::test]
    async fn test_reentrant_deposit_refused() {
        let d = attack(Reentry::Deposit).await;

        assert_eq!(d.vault.withdraw(ALICE).await, Ok(ether("5")));

        let reentries = d.custody.reentries.lock().clone();
        assert_eq!(reentries, vec![Err(VaultError::ReentrantCall)]);

        assert_eq!(d.custody.inner.balance_of(&ALICE), ether("10"));
        assert!(d.custody.custodied().await.is_zero());
        assert_eq!(d.vault.total_locked().await, U256::zero());
    }
}
