//! Member dashboard and purchase history screen models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    Identity, LedgerTotals, PointsTransaction, Purchase, TransactionKind, format_long_date,
};

/// Shown when a member has no purchases.
pub const NO_PURCHASES: &str = "No purchase history yet";

/// Transaction list tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionTab {
    /// Every entry.
    #[default]
    All,
    /// Only `earned` entries.
    Earned,
    /// Only `spent` entries.
    Spent,
}

impl TransactionTab {
    /// Every tab in display order.
    pub const ALL: [Self; 3] = [Self::All, Self::Earned, Self::Spent];

    /// Tab caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Transactions",
            Self::Earned => "Earned",
            Self::Spent => "Spent",
        }
    }

    /// Placeholder shown when the tab is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::All => "No transactions yet",
            Self::Earned => "No earned points yet",
            Self::Spent => "No spent points yet",
        }
    }

    fn includes(self, kind: TransactionKind) -> bool {
        match self {
            Self::All => true,
            Self::Earned => kind == TransactionKind::Earned,
            Self::Spent => kind == TransactionKind::Spent,
        }
    }
}

impl fmt::Display for TransactionTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Earned => "earned",
            Self::Spent => "spent",
        })
    }
}

/// Raised for a tab name other than `all`, `earned` or `spent`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction tab: {0}")]
pub struct UnknownTransactionTab(pub String);

impl FromStr for TransactionTab {
    type Err = UnknownTransactionTab;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "earned" => Ok(Self::Earned),
            "spent" => Ok(Self::Spent),
            other => Err(UnknownTransactionTab(other.to_owned())),
        }
    }
}

/// Summary cards and usage bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointsOverview {
    /// "Available Points" card.
    pub available: u32,
    /// "Points Earned" card: sum of the member's earned entries.
    pub total_earned: u64,
    /// "Points Spent" card.
    pub points_spent: u32,
    /// `points_spent / max(total_earned, 1)` as a whole percent, capped at 100.
    pub usage_percent: u8,
    /// e.g. "50/231 points used".
    pub usage_label: String,
}

impl PointsOverview {
    /// Combine the identity's balances with the ledger totals.
    pub fn new(identity: &Identity, totals: LedgerTotals) -> Self {
        let spent = u64::from(identity.points_spent);
        let denominator = totals.earned.max(1);
        let percent = spent.saturating_mul(100).div_euclid(denominator).min(100);
        Self {
            available: identity.points,
            total_earned: totals.earned,
            points_spent: identity.points_spent,
            usage_percent: u8::try_from(percent).unwrap_or(100),
            usage_label: format!("{}/{} points used", identity.points_spent, totals.earned),
        }
    }
}

/// One line in the transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    /// Transaction identifier.
    pub id: String,
    /// Free-text description.
    pub description: String,
    /// Long-form date.
    pub date: String,
    /// `earned` or `spent`.
    #[schema(value_type = String)]
    pub kind: TransactionKind,
    /// Signed points label, e.g. "+33 pts".
    pub points: String,
}

impl From<&PointsTransaction> for TransactionEntry {
    fn from(tx: &PointsTransaction) -> Self {
        let sign = match tx.kind {
            TransactionKind::Earned => '+',
            TransactionKind::Spent => '-',
        };
        Self {
            id: tx.id.clone(),
            description: tx.description.clone(),
            date: format_long_date(tx.date),
            kind: tx.kind,
            points: format!("{sign}{} pts", tx.points),
        }
    }
}

/// The selected transaction tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionList {
    /// Active tab.
    pub tab: TransactionTab,
    /// Caption of the active tab.
    pub label: String,
    /// Entries, newest first.
    pub entries: Vec<TransactionEntry>,
    /// Set when `entries` is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Member dashboard screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// "Welcome, {name}".
    pub welcome: String,
    /// Summary cards.
    pub overview: PointsOverview,
    /// Transaction list for the chosen tab.
    pub transactions: TransactionList,
}

impl Dashboard {
    /// Build the dashboard from the identity and its ledger.
    ///
    /// # Examples
    /// ```
    /// use pergamino::domain::{Dashboard, Identity, TransactionTab, UserId};
    /// use pergamino::domain::{DisplayName, EmailAddress};
    ///
    /// let identity = Identity::new_member(
    ///     UserId::new("42").expect("id"),
    ///     EmailAddress::new("new@example.com").expect("email"),
    ///     DisplayName::new("New Member").expect("name"),
    /// );
    /// let dashboard = Dashboard::build(&identity, &[], TransactionTab::All);
    /// assert_eq!(dashboard.welcome, "Welcome, New Member");
    /// assert_eq!(
    ///     dashboard.transactions.empty_message.as_deref(),
    ///     Some("No transactions yet")
    /// );
    /// ```
    pub fn build(
        identity: &Identity,
        transactions: &[PointsTransaction],
        tab: TransactionTab,
    ) -> Self {
        let owned: Vec<&PointsTransaction> = transactions
            .iter()
            .filter(|tx| tx.user_id == identity.id)
            .collect();
        let totals = LedgerTotals::from_transactions(owned.iter().copied());

        let mut visible: Vec<&PointsTransaction> = owned
            .into_iter()
            .filter(|tx| tab.includes(tx.kind))
            .collect();
        visible.sort_by(|a, b| b.date.cmp(&a.date));
        let entries: Vec<TransactionEntry> = visible.into_iter().map(TransactionEntry::from).collect();
        let empty_message = entries
            .is_empty()
            .then(|| tab.empty_message().to_owned());

        Self {
            welcome: format!("Welcome, {}", identity.name),
            overview: PointsOverview::new(identity, totals),
            transactions: TransactionList {
                tab,
                label: tab.label().to_owned(),
                entries,
                empty_message,
            },
        }
    }
}

/// One purchase line as shown in the expanded purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    /// Line identifier.
    pub id: String,
    /// Product name.
    pub name: String,
    /// "Quantity: n".
    pub quantity: String,
    /// Unit price, e.g. "$12.50".
    pub price: String,
}

/// One purchase card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCard {
    /// Purchase identifier.
    pub id: String,
    /// "Purchase #p1".
    pub title: String,
    /// Long-form date.
    pub date: String,
    /// Total, e.g. "$32.50".
    pub amount: String,
    /// "+33 Points".
    pub points: String,
    /// Line items in receipt order.
    pub items: Vec<PurchaseLine>,
}

impl From<&Purchase> for PurchaseCard {
    fn from(purchase: &Purchase) -> Self {
        Self {
            id: purchase.id.clone(),
            title: format!("Purchase #{}", purchase.id),
            date: format_long_date(purchase.date),
            amount: purchase.amount.to_string(),
            points: format!("+{} Points", purchase.points_earned),
            items: purchase
                .items
                .iter()
                .map(|item| PurchaseLine {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    quantity: format!("Quantity: {}", item.quantity),
                    price: item.unit_price.to_string(),
                })
                .collect(),
        }
    }
}

/// Purchase history screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseHistory {
    /// Purchases in the order they were recorded.
    pub purchases: Vec<PurchaseCard>,
    /// Set when there are no purchases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl PurchaseHistory {
    /// Cards for the purchases owned by `identity`.
    pub fn build(identity: &Identity, purchases: &[Purchase]) -> Self {
        let purchases: Vec<PurchaseCard> = purchases
            .iter()
            .filter(|p| p.user_id == identity.id)
            .map(PurchaseCard::from)
            .collect();
        let empty_message = purchases.is_empty().then(|| NO_PURCHASES.to_owned());
        Self {
            purchases,
            empty_message,
        }
    }
}
