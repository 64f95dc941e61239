//! Navigation surface and the guard that decides who may see each screen.
//!
//! The guard is a pure function of the session status and the requested
//! screen. `Checking` is its only transient state: it lasts while the
//! session is still loading and resolves once the persisted identity has
//! been read.

use std::fmt;

use serde::Serialize;

use super::{SessionStatus, UserRole};

/// Who may open a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone; signed-in visitors are sent to their default screen.
    Public,
    /// Any signed-in role.
    Authenticated,
    /// Administrators only.
    Admin,
}

/// Every navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/dashboard`
    Dashboard,
    /// `/dashboard/purchases`
    Purchases,
    /// `/profile`
    Profile,
    /// `/admin`, showing the user management tab.
    Admin,
    /// `/admin/users`
    AdminUsers,
    /// `/admin/admins`
    AdminAdmins,
}

impl Screen {
    /// Every screen, public ones first.
    pub const ALL: [Self; 8] = [
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Purchases,
        Self::Profile,
        Self::Admin,
        Self::AdminUsers,
        Self::AdminAdmins,
    ];

    /// Resolve a request path. Trailing slashes are ignored.
    ///
    /// # Examples
    /// ```
    /// use pergamino::domain::Screen;
    ///
    /// assert_eq!(Screen::from_path("/admin/users/"), Some(Screen::AdminUsers));
    /// assert_eq!(Screen::from_path("/settings"), None);
    /// ```
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalised = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|screen| screen.path() == normalised)
    }

    /// Canonical path.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Purchases => "/dashboard/purchases",
            Self::Profile => "/profile",
            Self::Admin => "/admin",
            Self::AdminUsers => "/admin/users",
            Self::AdminAdmins => "/admin/admins",
        }
    }

    /// Access level required.
    pub fn access(self) -> Access {
        match self {
            Self::Login | Self::Register => Access::Public,
            Self::Dashboard | Self::Purchases | Self::Profile => Access::Authenticated,
            Self::Admin | Self::AdminUsers | Self::AdminAdmins => Access::Admin,
        }
    }

    /// Landing screen for a role.
    pub fn default_for(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::User => Self::Dashboard,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Guard outcome for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// The session has not finished loading.
    Checking,
    /// No identity on a protected screen.
    Unauthenticated,
    /// Signed in with a role the screen does not admit, or signed in on a
    /// public screen.
    WrongRole {
        /// The visitor's landing screen.
        default: Screen,
    },
    /// Render the screen.
    Authorized,
}

impl GuardState {
    /// Where to send the visitor instead, if anywhere.
    pub fn redirect(self) -> Option<Screen> {
        match self {
            Self::Unauthenticated => Some(Screen::Login),
            Self::WrongRole { default } => Some(default),
            Self::Checking | Self::Authorized => None,
        }
    }
}

/// Decide whether the session may open `screen`.
///
/// # Examples
/// ```
/// use pergamino::domain::{GuardState, Screen, SessionStatus, evaluate};
///
/// let state = evaluate(&SessionStatus::Anonymous, Screen::Profile);
/// assert_eq!(state, GuardState::Unauthenticated);
/// assert_eq!(state.redirect(), Some(Screen::Login));
/// ```
pub fn evaluate(status: &SessionStatus, screen: Screen) -> GuardState {
    let role = match status {
        SessionStatus::Loading => return GuardState::Checking,
        SessionStatus::Anonymous => None,
        SessionStatus::Authenticated(identity) => Some(identity.role),
    };

    match (screen.access(), role) {
        (Access::Public, None) => GuardState::Authorized,
        (Access::Public, Some(role)) => GuardState::WrongRole {
            default: Screen::default_for(role),
        },
        (Access::Authenticated | Access::Admin, None) => GuardState::Unauthenticated,
        (Access::Authenticated, Some(_)) | (Access::Admin, Some(UserRole::Admin)) => {
            GuardState::Authorized
        }
        (Access::Admin, Some(role)) => GuardState::WrongRole {
            default: Screen::default_for(role),
        },
    }
}
