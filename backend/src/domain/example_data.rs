//! Bundled example records used to seed the in-memory store.
//!
//! The fixture is compiled into the binary so the console starts with the
//! same accounts, purchases and ledger entries on every run. An alternative
//! file can be loaded with [`SeedRecords::from_file`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::{PointsTransaction, Purchase, User, UserId, UserRole};

/// Current supported fixture version.
const SUPPORTED_VERSION: u32 = 1;

const BUNDLED_RECORDS: &str = include_str!("../../fixtures/records.json");

/// Errors raised while loading seed records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedDataError {
    /// The fixture file could not be read.
    #[error("failed to read seed file at '{path}': {message}")]
    Io {
        /// Path to the fixture.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// The JSON is malformed or a record failed validation.
    #[error("invalid seed JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
    /// The fixture version is not supported.
    #[error("unsupported seed version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Version found in the fixture.
        actual: u32,
    },
    /// Two accounts in one collection share an identifier.
    #[error("duplicate account id {id} in {collection}")]
    DuplicateId {
        /// Collection holding the duplicate.
        collection: &'static str,
        /// Repeated identifier.
        id: String,
    },
    /// An entry in the admins collection is not an admin.
    #[error("account {id} is listed as an administrator but has role {role}")]
    NotAnAdmin {
        /// Offending account.
        id: String,
        /// Role it carries.
        role: UserRole,
    },
    /// A purchase or transaction names an account that does not exist.
    #[error("{record} {record_id} references unknown user {user_id}")]
    UnknownOwner {
        /// Record kind (`purchase` or `transaction`).
        record: &'static str,
        /// Record identifier.
        record_id: String,
        /// Missing owner.
        user_id: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSeedRecords {
    version: u32,
    users: Vec<User>,
    #[serde(default)]
    admins: Vec<User>,
    #[serde(default)]
    purchases: Vec<Purchase>,
    #[serde(default)]
    transactions: Vec<PointsTransaction>,
}

/// Validated seed collections.
///
/// ## Invariants
/// - Account identifiers are unique within `users` and within `admins`.
/// - Every entry in `admins` has the admin role.
/// - Every purchase and transaction belongs to a known account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRecords {
    users: Vec<User>,
    admins: Vec<User>,
    purchases: Vec<Purchase>,
    transactions: Vec<PointsTransaction>,
}

impl SeedRecords {
    /// Records compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`SeedDataError`] if the bundled fixture fails validation.
    pub fn bundled() -> Result<Self, SeedDataError> {
        Self::from_json(BUNDLED_RECORDS)
    }

    /// Parse seed records from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SeedDataError`] if the JSON is malformed, the version is
    /// unsupported, or the collections break an invariant.
    pub fn from_json(json: &str) -> Result<Self, SeedDataError> {
        let raw: RawSeedRecords = serde_json::from_str(json).map_err(|e| SeedDataError::Parse {
            message: e.to_string(),
        })?;
        Self::from_raw(raw)
    }

    /// Load seed records from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SeedDataError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SeedDataError> {
        let contents = fs::read_to_string(path).map_err(|e| SeedDataError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRecords) -> Result<Self, SeedDataError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(SeedDataError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let user_ids = unique_ids("users", &raw.users)?;
        let admin_ids = unique_ids("admins", &raw.admins)?;
        if let Some(admin) = raw.admins.iter().find(|a| a.role() != UserRole::Admin) {
            return Err(SeedDataError::NotAnAdmin {
                id: admin.id().to_string(),
                role: admin.role(),
            });
        }

        let known = |id: &UserId| user_ids.contains(id) || admin_ids.contains(id);
        for purchase in &raw.purchases {
            if !known(&purchase.user_id) {
                return Err(SeedDataError::UnknownOwner {
                    record: "purchase",
                    record_id: purchase.id.clone(),
                    user_id: purchase.user_id.to_string(),
                });
            }
        }
        for tx in &raw.transactions {
            if !known(&tx.user_id) {
                return Err(SeedDataError::UnknownOwner {
                    record: "transaction",
                    record_id: tx.id.clone(),
                    user_id: tx.user_id.to_string(),
                });
            }
        }

        Ok(Self {
            users: raw.users,
            admins: raw.admins,
            purchases: raw.purchases,
            transactions: raw.transactions,
        })
    }

    /// Seeded accounts, including the demo administrator.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Seeded administrators.
    #[must_use]
    pub fn admins(&self) -> &[User] {
        &self.admins
    }

    /// Seeded purchases.
    #[must_use]
    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    /// Seeded ledger entries.
    #[must_use]
    pub fn transactions(&self) -> &[PointsTransaction] {
        &self.transactions
    }

    /// Split into owned collections: users, admins, purchases, transactions.
    #[must_use]
    pub fn into_parts(self) -> (Vec<User>, Vec<User>, Vec<Purchase>, Vec<PointsTransaction>) {
        (self.users, self.admins, self.purchases, self.transactions)
    }
}

fn unique_ids(collection: &'static str, accounts: &[User]) -> Result<HashSet<UserId>, SeedDataError> {
    let mut seen = HashSet::with_capacity(accounts.len());
    for account in accounts {
        if !seen.insert(account.id().clone()) {
            return Err(SeedDataError::DuplicateId {
                collection,
                id: account.id().to_string(),
            });
        }
    }
    Ok(seen)
}
