//! Loyalty account model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the account value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier contained whitespace.
    #[error("user id must not contain whitespace")]
    InvalidId,
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Display name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Role was neither `admin` nor `user`.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Stable account identifier.
///
/// Seeded accounts use short numeric identifiers (`"1"`, `"2"`); accounts
/// created at runtime receive a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact email. Only presence is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and validate an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Trim and validate a display name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Console administrator.
    Admin,
    /// Loyalty member.
    User,
}

impl UserRole {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Loyalty account.
///
/// ## Invariants
/// - `role` never changes after construction; there is no setter.
/// - `points` and `points_spent` are non-negative by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    email: EmailAddress,
    name: DisplayName,
    role: UserRole,
    points: u32,
    points_spent: u32,
    active: bool,
}

impl User {
    /// Build an active account with zero balances.
    pub fn new(id: UserId, email: EmailAddress, name: DisplayName, role: UserRole) -> Self {
        Self {
            id,
            email,
            name,
            role,
            points: 0,
            points_spent: 0,
            active: true,
        }
    }

    /// Set the available and spent balances.
    #[must_use]
    pub fn with_balances(mut self, points: u32, points_spent: u32) -> Self {
        self.points = points;
        self.points_spent = points_spent;
        self
    }

    /// Set the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Account role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Points available to redeem.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Points already redeemed.
    pub fn points_spent(&self) -> u32 {
        self.points_spent
    }

    /// Lifetime points: available plus spent.
    pub fn total_points(&self) -> u64 {
        u64::from(self.points) + u64::from(self.points_spent)
    }

    /// Whether the account is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// "Active" or "Inactive".
    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }

    /// Replace the contact details, keeping identity, role and balances.
    pub fn rename(&mut self, name: DisplayName, email: EmailAddress) {
        self.name = name;
        self.email = email;
    }

    /// Mark the account inactive.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: String,
    email: String,
    name: String,
    role: UserRole,
    #[serde(default)]
    points: u32,
    #[serde(default)]
    points_spent: u32,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.into(),
            email: value.email.into(),
            name: value.name.into(),
            role: value.role,
            points: value.points,
            points_spent: value.points_spent,
            active: value.active,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let user = User::new(
            UserId::new(value.id)?,
            EmailAddress::new(value.email)?,
            DisplayName::new(value.name)?,
            value.role,
        )
        .with_balances(value.points, value.points_spent)
        .with_active(value.active);
        Ok(user)
    }
}
