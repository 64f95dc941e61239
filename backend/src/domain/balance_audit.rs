//! Reconcile recorded balances against the points ledger.
//!
//! For every account with at least one ledger entry, the recorded lifetime
//! total (`points + pointsSpent`) must equal the earned total and the
//! available balance must equal earned minus spent. Accounts without any
//! entries cannot be checked and are only counted.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::ports::{RecordStore, RecordStoreError};
use super::{Error, LedgerTotals, PointsTransaction, User, UserId};

/// Which rule an account breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MismatchKind {
    /// `points + pointsSpent` differs from the earned total.
    LifetimeTotal,
    /// `points` differs from earned minus spent.
    AvailableBalance,
}

/// One account whose recorded figures disagree with its ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceMismatch {
    /// Account identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Recorded available points.
    pub recorded_points: u32,
    /// Recorded points spent.
    pub recorded_points_spent: u32,
    /// Sum of earned entries.
    pub ledger_earned: u64,
    /// Sum of spent entries.
    pub ledger_spent: u64,
    /// Broken rules, in a fixed order.
    pub issues: Vec<MismatchKind>,
}

/// Outcome of an audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAuditReport {
    /// Accounts with at least one ledger entry.
    pub audited: usize,
    /// Audited accounts that reconcile.
    pub consistent: usize,
    /// Accounts without ledger entries.
    pub unledgered: usize,
    /// Accounts that do not reconcile.
    pub mismatches: Vec<BalanceMismatch>,
}

impl BalanceAuditReport {
    /// Whether every audited account reconciles.
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Audit `users` against `transactions`.
///
/// # Examples
/// ```
/// use pergamino::domain::{SeedRecords, audit_balances};
///
/// let records = SeedRecords::bundled().expect("bundled fixture");
/// let report = audit_balances(records.users(), records.transactions());
/// assert_eq!(report.audited, 1);
/// assert_eq!(report.unledgered, 11);
/// ```
pub fn audit_balances(users: &[User], transactions: &[PointsTransaction]) -> BalanceAuditReport {
    let mut ledgers: HashMap<&UserId, Vec<&PointsTransaction>> = HashMap::new();
    for tx in transactions {
        ledgers.entry(&tx.user_id).or_default().push(tx);
    }

    let mut report = BalanceAuditReport {
        audited: 0,
        consistent: 0,
        unledgered: 0,
        mismatches: Vec::new(),
    };

    for user in users {
        let Some(entries) = ledgers.get(user.id()) else {
            report.unledgered = report.unledgered.saturating_add(1);
            continue;
        };
        report.audited = report.audited.saturating_add(1);

        let totals = LedgerTotals::from_transactions(entries.iter().copied());
        let mut issues = Vec::new();
        if user.total_points() != totals.earned {
            issues.push(MismatchKind::LifetimeTotal);
        }
        if i128::from(user.points()) != totals.net() {
            issues.push(MismatchKind::AvailableBalance);
        }

        if issues.is_empty() {
            report.consistent = report.consistent.saturating_add(1);
        } else {
            report.mismatches.push(BalanceMismatch {
                user_id: user.id().clone(),
                name: user.name().to_string(),
                recorded_points: user.points(),
                recorded_points_spent: user.points_spent(),
                ledger_earned: totals.earned,
                ledger_spent: totals.spent,
                issues,
            });
        }
    }

    report
}

/// Runs the audit against a record store.
#[derive(Clone)]
pub struct BalanceAuditService<R> {
    store: Arc<R>,
}

impl<R> BalanceAuditService<R> {
    /// Create a new service with the given store.
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }
}

fn map_store_error(error: RecordStoreError) -> Error {
    match error {
        RecordStoreError::Connection { message } => {
            Error::service_unavailable(format!("record store unavailable: {message}"))
        }
        RecordStoreError::Query { message } => {
            Error::internal(format!("record store error: {message}"))
        }
    }
}

impl<R> BalanceAuditService<R>
where
    R: RecordStore,
{
    /// Audit every account in the users collection.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub async fn run(&self) -> Result<BalanceAuditReport, Error> {
        let users = self.store.list_users().await.map_err(map_store_error)?;
        let transactions = self
            .store
            .list_transactions()
            .await
            .map_err(map_store_error)?;
        let report = audit_balances(&users, &transactions);
        if report.is_clean() {
            info!(audited = report.audited, "balance audit clean");
        } else {
            warn!(
                audited = report.audited,
                mismatches = report.mismatches.len(),
                "balance audit found mismatches"
            );
        }
        Ok(report)
    }
}
