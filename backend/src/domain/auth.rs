//! Form primitives: login credentials, registration, profile and admin forms.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Validation messages are the ones shown to visitors.

use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress};

/// Minimum length accepted for a new password.
pub const PASSWORD_MIN_LEN: usize = 6;

const FILL_IN_ALL_FIELDS: &str = "Please fill in all fields";
const FILL_ALL_REQUIRED_FIELDS: &str = "Please fill all required fields.";

/// A form failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A required field was blank.
    #[error("{message}")]
    MissingField {
        /// First blank field, in camelCase wire form.
        field: &'static str,
        /// Message shown to the visitor.
        message: &'static str,
    },
    /// Password and confirmation differ.
    #[error("{message}")]
    PasswordMismatch {
        /// Message shown to the visitor.
        message: &'static str,
    },
    /// The new password is shorter than [`PASSWORD_MIN_LEN`].
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

impl FormError {
    /// Field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field, .. } => field,
            Self::PasswordMismatch { .. } => "confirmPassword",
            Self::PasswordTooShort { .. } => "newPassword",
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::PasswordMismatch { .. } => "password_mismatch",
            Self::PasswordTooShort { .. } => "password_too_short",
        }
    }
}

fn require<'a>(
    fields: &[(&'static str, &'a str)],
    message: &'static str,
) -> Result<(), FormError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(FormError::MissingField { field, message }),
        None => Ok(()),
    }
}

fn display_name(raw: &str, message: &'static str) -> Result<DisplayName, FormError> {
    DisplayName::new(raw).map_err(|_| FormError::MissingField {
        field: "name",
        message,
    })
}

fn email(raw: &str, message: &'static str) -> Result<EmailAddress, FormError> {
    EmailAddress::new(raw).map_err(|_| FormError::MissingField {
        field: "email",
        message,
    })
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use pergamino::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@pergamino.com ", "admin123")
///     .expect("both fields present");
/// assert_eq!(creds.email(), "admin@pergamino.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FormError> {
        require(&[("email", email)], FILL_IN_ALL_FIELDS)?;
        if password.is_empty() {
            return Err(FormError::MissingField {
                field: "password",
                message: FILL_IN_ALL_FIELDS,
            });
        }
        Ok(Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to look up the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate the sign-up form: every field present and both passwords equal.
    pub fn try_from_parts(
        name: &str,
        email_raw: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, FormError> {
        require(
            &[
                ("name", name),
                ("email", email_raw),
                ("password", password),
                ("confirmPassword", confirm_password),
            ],
            FILL_IN_ALL_FIELDS,
        )?;
        if password != confirm_password {
            return Err(FormError::PasswordMismatch {
                message: "Passwords do not match",
            });
        }
        Ok(Self {
            name: display_name(name, FILL_IN_ALL_FIELDS)?,
            email: email(email_raw, FILL_IN_ALL_FIELDS)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Display name for the new account.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email for the new account.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: DisplayName,
    email: EmailAddress,
}

impl ProfileUpdate {
    /// Validate a profile edit; both fields are required.
    pub fn try_from_parts(name: &str, email_raw: &str) -> Result<Self, FormError> {
        require(&[("name", name), ("email", email_raw)], FILL_ALL_REQUIRED_FIELDS)?;
        Ok(Self {
            name: display_name(name, FILL_ALL_REQUIRED_FIELDS)?,
            email: email(email_raw, FILL_ALL_REQUIRED_FIELDS)?,
        })
    }

    /// New display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// New email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Validated password change.
///
/// # Examples
/// ```
/// use pergamino::domain::{FormError, PasswordChange};
///
/// let err = PasswordChange::try_from_parts("", "abc", "abc").expect_err("too short");
/// assert_eq!(err, FormError::PasswordTooShort { min: 6 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current_password: Zeroizing<String>,
    new_password: Zeroizing<String>,
}

impl PasswordChange {
    /// Validate a password change: confirmation first, then length.
    pub fn try_from_parts(
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<Self, FormError> {
        if new_password != confirm_password {
            return Err(FormError::PasswordMismatch {
                message: "New passwords do not match.",
            });
        }
        if new_password.chars().count() < PASSWORD_MIN_LEN {
            return Err(FormError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self {
            current_password: Zeroizing::new(current_password.to_owned()),
            new_password: Zeroizing::new(new_password.to_owned()),
        })
    }

    /// Password the visitor claims is current. Not verified.
    pub fn current_password(&self) -> &str {
        self.current_password.as_str()
    }

    /// Replacement password.
    pub fn new_password(&self) -> &str {
        self.new_password.as_str()
    }
}

/// Validated "Add Admin" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDraft {
    name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl AdminDraft {
    /// Validate a new administrator; name, email and password are required.
    pub fn try_from_parts(name: &str, email_raw: &str, password: &str) -> Result<Self, FormError> {
        require(
            &[("name", name), ("email", email_raw), ("password", password)],
            FILL_ALL_REQUIRED_FIELDS,
        )?;
        Ok(Self {
            name: display_name(name, FILL_ALL_REQUIRED_FIELDS)?,
            email: email(email_raw, FILL_ALL_REQUIRED_FIELDS)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Administrator name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Administrator email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Initial password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated "Edit Admin" form. A blank password keeps the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUpdate {
    name: DisplayName,
    email: EmailAddress,
    password: Option<Zeroizing<String>>,
}

impl AdminUpdate {
    /// Validate an administrator edit; name and email are required.
    pub fn try_from_parts(name: &str, email_raw: &str, password: &str) -> Result<Self, FormError> {
        require(&[("name", name), ("email", email_raw)], FILL_ALL_REQUIRED_FIELDS)?;
        Ok(Self {
            name: display_name(name, FILL_ALL_REQUIRED_FIELDS)?,
            email: email(email_raw, FILL_ALL_REQUIRED_FIELDS)?,
            password: (!password.is_empty()).then(|| Zeroizing::new(password.to_owned())),
        })
    }

    /// New name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// New email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Replacement password, if one was entered.
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|value| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "admin123", "email")]
    #[case("   ", "admin123", "email")]
    #[case("admin@pergamino.com", "", "password")]
    fn login_requires_both_fields(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = LoginCredentials::try_from_parts(email, password).expect_err("blank field");
        assert_eq!(err.field(), field);
        assert_eq!(err.to_string(), "Please fill in all fields");
    }

    #[rstest]
    fn login_keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("user@pergamino.com", " user123 ")
            .expect("valid credentials");
        assert_eq!(creds.password(), " user123 ");
    }

    #[rstest]
    #[case("", "a@b.c", "secret", "secret", "name")]
    #[case("Ana", "a@b.c", "secret", "", "confirmPassword")]
    fn registration_reports_first_blank_field(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] field: &str,
    ) {
        let err = Registration::try_from_parts(name, email, password, confirm)
            .expect_err("blank field");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), "missing_field");
    }

    #[rstest]
    fn registration_rejects_mismatched_passwords() {
        let err = Registration::try_from_parts("Ana", "ana@example.com", "secret", "secreT")
            .expect_err("mismatch");
        assert_eq!(err.to_string(), "Passwords do not match");
        assert_eq!(err.code(), "password_mismatch");
    }

    #[rstest]
    fn registration_accepts_short_passwords() {
        let form = Registration::try_from_parts("Ana", "ana@example.com", "abc", "abc")
            .expect("no length rule at sign-up");
        assert_eq!(form.name().as_ref(), "Ana");
    }

    #[rstest]
    #[case("abcdef", "abcdeg", "New passwords do not match.")]
    #[case("abc", "abc", "Password must be at least 6 characters.")]
    #[case("ab", "abc", "New passwords do not match.")]
    fn password_change_checks_match_before_length(
        #[case] new: &str,
        #[case] confirm: &str,
        #[case] message: &str,
    ) {
        let err = PasswordChange::try_from_parts("old", new, confirm).expect_err("invalid");
        assert_eq!(err.to_string(), message);
    }

    #[rstest]
    fn admin_draft_requires_password() {
        let err = AdminDraft::try_from_parts("Barista Lead", "lead@pergamino.com", "")
            .expect_err("password required");
        assert_eq!(err.to_string(), "Please fill all required fields.");
        assert_eq!(err.field(), "password");
    }

    #[rstest]
    fn admin_update_treats_blank_password_as_unchanged() {
        let update = AdminUpdate::try_from_parts("Manager", "manager@pergamino.com", "")
            .expect("valid update");
        assert!(update.password().is_none());
    }
}
