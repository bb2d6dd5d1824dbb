//! Lock Vault Service - lock lifecycle and the unlock predicate
//!
//! The ledger is a single map behind a write-preferring async lock. Checks
//! and commits run under the write lock, which gives the total order of a
//! sequential ledger.
//!
//! Custody calls and oracle reads never run under the ledger lock. Before a
//! deposit or withdrawal leaves the ledger it marks its owner as settling;
//! the lock itself keeps its committed state until the outcome is known, so
//! readers never see an unsettled transfer. Other mutations for that owner
//! wait for the settlement to resolve. A call made from inside the custody
//! transfer on behalf of the settling owner fails with
//! [`VaultError::ReentrantCall`].

use crate::domain::{
    invariant_commit_allowed, invariant_valid_threshold, Lock, LockInfo, UnlockParameters,
    VaultError, VaultResult,
};
use crate::metrics;
use crate::ports::inbound::LockVaultApi;
use crate::ports::outbound::ValueCustody;
use crate::COMPONENT;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_bus::{EventPublisher, VaultEvent};
use shared_types::{short_address, Address, TimeSource, Timestamp, U256};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock, RwLockWriteGuard};
use wh_01_price_oracle::PriceOracleApi;
use wh_telemetry::log_lock_event;

tokio::task_local! {
    /// Owner whose custody call is running on this task.
    static SETTLING_OWNER: Address;
}

fn reentrant(owner: &Address) -> bool {
    SETTLING_OWNER
        .try_with(|settling| settling == owner)
        .unwrap_or(false)
}

/// Marks an owner as settling until dropped, including on cancellation.
struct Settlement<'a> {
    settling: &'a Mutex<HashSet<Address>>,
    settled: &'a Notify,
    owner: Address,
}

impl Drop for Settlement<'_> {
    fn drop(&mut self) {
        self.settling.lock().remove(&self.owner);
        self.settled.notify_waiters();
    }
}

/// Lock vault over an oracle and a custody primitive.
pub struct LockVaultService<O, C>
where
    O: PriceOracleApi,
    C: ValueCustody,
{
    oracle: Arc<O>,
    custody: Arc<C>,
    time_source: Arc<dyn TimeSource>,
    publisher: Arc<dyn EventPublisher>,
    locks: RwLock<HashMap<Address, Lock>>,
    /// Owners with a custody call in flight.
    settling: Mutex<HashSet<Address>>,
    settled: Notify,
}

impl<O, C> LockVaultService<O, C>
where
    O: PriceOracleApi,
    C: ValueCustody,
{
    /// Create an empty vault.
    pub fn new(
        oracle: Arc<O>,
        custody: Arc<C>,
        time_source: Arc<dyn TimeSource>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            oracle,
            custody,
            time_source,
            publisher,
            locks: RwLock::new(HashMap::new()),
            settling: Mutex::new(HashSet::new()),
            settled: Notify::new(),
        }
    }

    /// The oracle the vault reads.
    pub fn oracle(&self) -> &Arc<O> {
        &self.oracle
    }

    /// The custody the vault moves value through.
    pub fn custody(&self) -> &Arc<C> {
        &self.custody
    }

    /// Number of locks that still hold value.
    pub async fn active_locks(&self) -> usize {
        self.locks
            .read()
            .await
            .values()
            .filter(|lock| lock.state.is_active())
            .count()
    }

    /// Evaluate `now >= target_date || price >= target_price`.
    ///
    /// The date is checked first; the oracle is only read when the date has
    /// not been reached.
    async fn unlock_condition_met(&self, parameters: &UnlockParameters) -> VaultResult<bool> {
        let now = self.time_source.now();
        if parameters.date_reached(now) {
            return Ok(true);
        }

        let price = self.oracle.current_price().await.map_err(|e| {
            metrics::record_oracle_failure();
            VaultError::from(e)
        })?;
        Ok(parameters.price_reached(price))
    }

    fn rejected(&self, operation: &'static str, owner: &Address, err: &VaultError) {
        metrics::record_rejection(operation, err.reason());
        log_lock_event!(
            warn,
            COMPONENT,
            "[wh-02] operation rejected",
            short_address(owner),
            operation = operation,
            reason = err.reason(),
            error = %err
        );
    }

    fn refresh_active_gauge(locks: &HashMap<Address, Lock>) {
        metrics::set_active_locks(locks.values().filter(|l| l.state.is_active()).count());
    }

    /// Write access to the ledger once no settlement is in flight for `owner`.
    async fn settled_locks(
        &self,
        owner: &Address,
    ) -> VaultResult<RwLockWriteGuard<'_, HashMap<Address, Lock>>> {
        if reentrant(owner) {
            return Err(VaultError::ReentrantCall);
        }

        loop {
            // Registered before the check so a wakeup in between is not lost
            let settled = self.settled.notified();
            let locks = self.locks.write().await;
            if !self.settling.lock().contains(owner) {
                return Ok(locks);
            }
            drop(locks);
            settled.await;
        }
    }

    /// Mark `owner` as settling. Called with the ledger write lock held.
    fn begin_settlement(&self, owner: Address) -> Settlement<'_> {
        self.settling.lock().insert(owner);
        Settlement {
            settling: &self.settling,
            settled: &self.settled,
            owner,
        }
    }

    /// Store `lock` after a successful custody call, then end the settlement.
    async fn commit_settled(&self, settlement: Settlement<'_>, lock: Lock) {
        let mut locks = self.locks.write().await;
        locks.insert(settlement.owner, lock);
        Self::refresh_active_gauge(&locks);
        drop(locks);
        drop(settlement);
    }

    async fn try_deposit(&self, caller: Address, amount: U256) -> VaultResult<U256> {
        let (settlement, lock, total) = {
            let locks = self.settled_locks(&caller).await?;
            let mut lock = locks.get(&caller).cloned().unwrap_or_else(|| Lock::new(caller));
            let total = lock.deposit(amount)?;
            (self.begin_settlement(caller), lock, total)
        };

        // Value only moves once every check has passed
        SETTLING_OWNER
            .scope(caller, self.custody.receive(caller, amount))
            .await?;
        self.commit_settled(settlement, lock).await;

        metrics::record_deposit();
        log_lock_event!(
            info,
            COMPONENT,
            "[wh-02] deposit accepted",
            short_address(&caller),
            amount = %amount,
            total = %total
        );
        self.publisher
            .publish(VaultEvent::Deposited {
                owner: caller,
                amount,
                total,
            })
            .await;

        Ok(total)
    }

    async fn try_set_parameters(
        &self,
        caller: Address,
        target_date: Timestamp,
        target_price_usd: U256,
    ) -> VaultResult<()> {
        let mut locks = self.settled_locks(&caller).await?;

        let mut lock = locks.get(&caller).cloned().unwrap_or_else(|| Lock::new(caller));
        invariant_commit_allowed(&lock.state)?;
        let target_price = invariant_valid_threshold(target_price_usd)?;

        let parameters = UnlockParameters {
            target_date,
            target_price_usd,
            target_price,
        };
        lock.commit(parameters)?;
        locks.insert(caller, lock);
        drop(locks);

        metrics::record_commitment();
        log_lock_event!(
            info,
            COMPONENT,
            "[wh-02] parameters committed",
            short_address(&caller),
            target_date = target_date,
            target_price_usd = %target_price_usd
        );
        self.publisher
            .publish(VaultEvent::ParametersCommitted {
                owner: caller,
                target_date,
                target_price,
            })
            .await;

        Ok(())
    }

    async fn try_withdraw(&self, caller: Address) -> VaultResult<U256> {
        let (settlement, mut lock, parameters) = {
            let locks = self.settled_locks(&caller).await?;
            let lock = locks
                .get(&caller)
                .cloned()
                .ok_or(VaultError::WithdrawalConditionsNotMet)?;

            let parameters = match lock.state.parameters() {
                Some(parameters) if lock.state.is_active() => *parameters,
                _ => return Err(VaultError::WithdrawalConditionsNotMet),
            };
            (self.begin_settlement(caller), lock, parameters)
        };

        let amount = self.settle_withdrawal(&mut lock, &parameters).await?;
        self.commit_settled(settlement, lock).await;

        metrics::record_withdrawal();
        log_lock_event!(
            info,
            COMPONENT,
            "[wh-02] lock withdrawn",
            short_address(&caller),
            amount = %amount
        );
        self.publisher
            .publish(VaultEvent::Withdrawn {
                owner: caller,
                amount,
            })
            .await;

        Ok(amount)
    }

    /// Check the unlock predicate and move the value out. `lock` is only
    /// moved to `Withdrawn` once the transfer has gone through.
    async fn settle_withdrawal(
        &self,
        lock: &mut Lock,
        parameters: &UnlockParameters,
    ) -> VaultResult<U256> {
        // Re-evaluated here; an earlier can_withdraw result is not trusted
        if !self.unlock_condition_met(parameters).await? {
            return Err(VaultError::WithdrawalConditionsNotMet);
        }

        let amount = lock.state.amount();
        SETTLING_OWNER
            .scope(lock.owner, self.custody.transfer_out(lock.owner, amount))
            .await?;
        lock.release()?;
        Ok(amount)
    }
}

#[async_trait]
impl<O, C> LockVaultApi for LockVaultService<O, C>
where
    O: PriceOracleApi + 'static,
    C: ValueCustody + 'static,
{
    async fn deposit(&self, caller: Address, amount: U256) -> VaultResult<U256> {
        self.try_deposit(caller, amount)
            .await
            .inspect_err(|e| self.rejected("deposit", &caller, e))
    }

    async fn set_parameters(
        &self,
        caller: Address,
        target_date: Timestamp,
        target_price_usd: U256,
    ) -> VaultResult<()> {
        self.try_set_parameters(caller, target_date, target_price_usd)
            .await
            .inspect_err(|e| self.rejected("set_parameters", &caller, e))
    }

    async fn can_withdraw(&self, owner: Address) -> VaultResult<bool> {
        let parameters = {
            let locks = self.locks.read().await;
            match locks.get(&owner) {
                Some(lock) if lock.state.is_active() && !lock.state.amount().is_zero() => {
                    lock.state.parameters().copied()
                }
                _ => None,
            }
        };

        let Some(parameters) = parameters else {
            return Ok(false);
        };

        let allowed = self.unlock_condition_met(&parameters).await?;
        log_lock_event!(
            debug,
            COMPONENT,
            "[wh-02] withdrawability evaluated",
            short_address(&owner),
            allowed = allowed
        );
        Ok(allowed)
    }

    async fn withdraw(&self, caller: Address) -> VaultResult<U256> {
        self.try_withdraw(caller)
            .await
            .inspect_err(|e| self.rejected("withdraw", &caller, e))
    }

    async fn get_lock_info(&self, owner: Address) -> LockInfo {
        self.locks
            .read()
            .await
            .get(&owner)
            .map(Lock::info)
            .unwrap_or_default()
    }

    async fn current_price(&self) -> VaultResult<U256> {
        Ok(self.oracle.current_price().await?)
    }

    async fn total_locked(&self) -> U256 {
        self.locks
            .read()
            .await
            .values()
            .filter(|lock| lock.state.is_active())
            .fold(U256::zero(), |acc, lock| acc.saturating_add(lock.state.amount()))
    }
}
