use std::{
    collections::{
        HashMap,
        VecDeque,
    },
    sync::Arc,
};

use alloy::primitives::B256;
use tokio::sync::Mutex;

use crate::ports::ledger::{
    Ledger,
    LedgerError,
    TxStatus,
};

#[derive(Debug)]
struct Inner {
    /// Per-handle status scripts; the last entry repeats once drained.
    scripts: Mutex<HashMap<B256, VecDeque<TxStatus>>>,
    /// Script applied to handles without a dedicated entry.
    default_script: Mutex<VecDeque<TxStatus>>,
    /// Number of upcoming reads that fail with an RPC error.
    fail_next: Mutex<u32>,
}

/// In-memory `Ledger` with scripted receipt statuses.
///
/// Each read pops the next status from the handle's script (or the default
/// script); the final entry is sticky so the ledger keeps reporting it.
#[derive(Debug, Clone)]
pub struct MockLedger {
    inner: Arc<Inner>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                scripts: Mutex::new(HashMap::new()),
                default_script: Mutex::new(VecDeque::new()),
                fail_next: Mutex::new(0),
            }),
        }
    }

    /// Script the status sequence for one transaction hash.
    pub async fn script(&self, tx_hash: B256, statuses: Vec<TxStatus>) {
        self.inner
            .scripts
            .lock()
            .await
            .insert(tx_hash, statuses.into());
    }

    /// Script the status sequence for any handle without a dedicated script.
    /// Useful when the handle is not known until the wallet returns it.
    pub async fn script_default(&self, statuses: Vec<TxStatus>) {
        *self.inner.default_script.lock().await = statuses.into();
    }

    /// Make the next `count` reads fail with an RPC error.
    pub async fn fail_next(&self, count: u32) {
        *self.inner.fail_next.lock().await = count;
    }

    fn pop_or_last(script: &mut VecDeque<TxStatus>) -> TxStatus {
        if script.len() > 1 {
            script.pop_front().expect("checked non-empty")
        } else {
            script.front().cloned().unwrap_or(TxStatus::Pending)
        }
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for MockLedger {
    async fn transaction_status(&self, tx_hash: B256) -> Result<TxStatus, LedgerError> {
        {
            let mut fail_next = self.inner.fail_next.lock().await;
            if *fail_next > 0 {
                *fail_next -= 1;
                return Err(LedgerError::Rpc("scripted RPC failure".into()));
            }
        }

        let mut scripts = self.inner.scripts.lock().await;
        if let Some(script) = scripts.get_mut(&tx_hash) {
            return Ok(Self::pop_or_last(script));
        }
        let mut default_script = self.inner.default_script.lock().await;
        Ok(Self::pop_or_last(&mut default_script))
    }
}
