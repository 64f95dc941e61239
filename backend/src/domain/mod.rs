//! Domain primitives, services and ports.
//!
//! Purpose: define the loyalty console's types and rules independently of
//! HTTP and storage. Types validate on construction and document their
//! invariants and serialisation contracts in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: the single error payload mapped to HTTP responses.
//! - User, Identity, SessionContext: accounts and the visitor's session.
//! - Screen, evaluate: navigation surface and route guard.
//! - Dashboard, PurchaseHistory, user/admin tables: screen models.
//! - AccountService, LoyaltyService, BalanceAuditService: port implementations.

pub mod account_service;
pub mod auth;
pub mod balance_audit;
pub mod dashboard;
pub mod error;
pub mod example_data;
pub mod loyalty;
pub mod loyalty_service;
pub mod ports;
pub mod route_guard;
pub mod screens;
pub mod session;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AdminDraft, AdminUpdate, FormError, LoginCredentials, PASSWORD_MIN_LEN, PasswordChange,
    ProfileUpdate, Registration,
};
pub use self::balance_audit::{
    BalanceAuditReport, BalanceAuditService, BalanceMismatch, MismatchKind, audit_balances,
};
pub use self::dashboard::{
    Dashboard, NO_PURCHASES, PointsOverview, PurchaseCard, PurchaseHistory, PurchaseLine,
    TransactionEntry, TransactionList, TransactionTab, UnknownTransactionTab,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::example_data::{SeedDataError, SeedRecords};
pub use self::loyalty::{
    LONG_DATE_FORMAT, LedgerTotals, Money, PointsTransaction, Purchase, PurchaseItem,
    TransactionKind, UnknownTransactionKind, format_long_date,
};
pub use self::loyalty_service::LoyaltyService;
pub use self::route_guard::{Access, GuardState, Screen, evaluate};
pub use self::screens::{
    AdminScreen, AdminSummary, AuthScreen, MemberPanel, MemberScreen, ProfileForm, TabLink,
    UserDetail, admin_management_table, members, user_detail_href, user_management_table,
};
pub use self::session::{Identity, SessionContext, SessionStatus};
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, EmailAddress, User, UserId, UserRole, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pergamino::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
