//! In-Memory Custody Adapter
//!
//! Implements `ValueCustody` over a local wallet ledger, the way a dev chain
//! would move native value between accounts and the vault.

use crate::domain::CustodyError;
use crate::ports::outbound::ValueCustody;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{short_address, Address, U256};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Default)]
struct CustodyState {
    wallets: HashMap<Address, U256>,
    held: U256,
    fail_next_transfer: Option<String>,
}

/// Wallet balances plus the vault's held balance.
#[derive(Default)]
pub struct InMemoryCustody {
    state: Mutex<CustodyState>,
}

impl InMemoryCustody {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a wallet (faucet).
    pub fn fund(&self, wallet: Address, amount: U256) {
        let mut state = self.state.lock();
        let balance = state.wallets.entry(wallet).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Wallet balance.
    pub fn balance_of(&self, wallet: &Address) -> U256 {
        self.state
            .lock()
            .wallets
            .get(wallet)
            .copied()
            .unwrap_or_default()
    }

    /// Make the next outbound transfer fail with `reason`.
    pub fn fail_next_transfer(&self, reason: impl Into<String>) {
        self.state.lock().fail_next_transfer = Some(reason.into());
    }
}

#[async_trait]
impl ValueCustody for InMemoryCustody {
    async fn receive(&self, from: Address, amount: U256) -> Result<(), CustodyError> {
        let mut state = self.state.lock();
        let available = state.wallets.get(&from).copied().unwrap_or_default();
        if available < amount {
            return Err(CustodyError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        state.wallets.insert(from, available - amount);
        state.held = state.held.saturating_add(amount);
        debug!(from = %short_address(&from), amount = %amount, "[wh-02] custody received");
        Ok(())
    }

    async fn transfer_out(&self, to: Address, amount: U256) -> Result<(), CustodyError> {
        let mut state = self.state.lock();
        if let Some(reason) = state.fail_next_transfer.take() {
            warn!(to = %short_address(&to), reason = %reason, "[wh-02] injected transfer failure");
            return Err(CustodyError::Rejected(reason));
        }

        if state.held < amount {
            return Err(CustodyError::InsufficientCustody {
                held: state.held,
                requested: amount,
            });
        }

        state.held -= amount;
        let balance = state.wallets.entry(to).or_default();
        *balance = balance.saturating_add(amount);
        debug!(to = %short_address(&to), amount = %amount, "[wh-02] custody released");
        Ok(())
    }

    async fn custodied(&self) -> U256 {
        self.state.lock().held
    }
}
