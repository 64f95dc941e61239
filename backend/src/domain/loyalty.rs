//! Purchases and points ledger entries.
//!
//! Both record kinds are immutable once seeded. Amounts are integer cents so
//! totals never drift; the dollar rendering happens at the edge via
//! [`Money`]'s `Display`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Long date format used on every screen, e.g. "October 15, 2023".
pub const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// Render a date in the long form shown on the dashboard and purchase list.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pergamino::domain::format_long_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 14).expect("valid date");
/// assert_eq!(format_long_date(date), "February 14, 2024");
/// ```
pub fn format_long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

/// Currency amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Wrap an amount expressed in cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Amount in cents.
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, saturating on overflow.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0.div_euclid(100);
        let cents = self.0.rem_euclid(100);
        write!(f, "${dollars}.{cents:02}")
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(Self::cents).fold(0, u64::saturating_add))
    }
}

/// One line of a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PurchaseItem {
    /// Line identifier.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Units bought.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Money,
}

impl PurchaseItem {
    /// `quantity × unit_price`.
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// A completed purchase with its ordered line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Purchase {
    /// Purchase identifier.
    pub id: String,
    /// Owning account.
    pub user_id: UserId,
    /// Day of purchase.
    pub date: NaiveDate,
    /// Amount charged.
    pub amount: Money,
    /// Points awarded.
    pub points_earned: u32,
    /// Line items in receipt order.
    pub items: Vec<PurchaseItem>,
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Points awarded.
    Earned,
    /// Points redeemed.
    Spent,
}

impl TransactionKind {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Earned => "earned",
            Self::Spent => "spent",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a transaction kind is neither `earned` nor `spent`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction kind: {0}")]
pub struct UnknownTransactionKind(pub String);

impl FromStr for TransactionKind {
    type Err = UnknownTransactionKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "earned" => Ok(Self::Earned),
            "spent" => Ok(Self::Spent),
            other => Err(UnknownTransactionKind(other.to_owned())),
        }
    }
}

/// Points ledger entry. `points` is always positive; `kind` carries the sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PointsTransaction {
    /// Transaction identifier.
    pub id: String,
    /// Owning account.
    pub user_id: UserId,
    /// Day of the entry.
    pub date: NaiveDate,
    /// Magnitude of the change.
    pub points: u32,
    /// Earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Free-text description, e.g. "Purchase #p1".
    pub description: String,
}

impl PointsTransaction {
    /// Signed effect on the available balance.
    pub fn signed_points(&self) -> i64 {
        match self.kind {
            TransactionKind::Earned => i64::from(self.points),
            TransactionKind::Spent => -i64::from(self.points),
        }
    }
}

/// Earned and spent totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    /// Sum of `earned` entries.
    pub earned: u64,
    /// Sum of `spent` entries.
    pub spent: u64,
}

impl LedgerTotals {
    /// Fold a set of transactions into totals.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a PointsTransaction>) -> Self {
        transactions
            .into_iter()
            .fold(Self::default(), |mut totals, tx| {
                let points = u64::from(tx.points);
                match tx.kind {
                    TransactionKind::Earned => totals.earned = totals.earned.saturating_add(points),
                    TransactionKind::Spent => totals.spent = totals.spent.saturating_add(points),
                }
                totals
            })
    }

    /// `earned - spent`, signed.
    pub fn net(&self) -> i128 {
        i128::from(self.earned) - i128::from(self.spent)
    }
}
