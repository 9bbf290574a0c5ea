//! User records and their public serialized view.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum length of a username (`VARCHAR(50)`).
pub const USERNAME_MAX: usize = 50;
/// Maximum length of a first or last name (`VARCHAR(50)`).
pub const PERSON_NAME_MAX: usize = 50;
/// Maximum length of an email address (`VARCHAR(120)`).
pub const EMAIL_MAX: usize = 120;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    EmptyName,
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    MalformedEmail,
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::MalformedEmail => {
                write!(f, "email must contain a local part and a domain around '@'")
            }
            Self::EmptyPassword => write!(f, "password hash must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

fn exceeds(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// Unique login handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if exceeds(&value, USERNAME_MAX) {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(value))
    }
}

/// First or last name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if exceeds(&value, PERSON_NAME_MAX) {
            return Err(UserValidationError::NameTooLong {
                max: PERSON_NAME_MAX,
            });
        }
        Ok(Self(value))
    }
}

/// Unique contact address.
///
/// Only the shape `local@domain` is checked, split at the first `@`. The
/// `user_email_check` constraint applies the same rule to stored rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if exceeds(&value, EMAIL_MAX) {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(value)),
            _ => Err(UserValidationError::MalformedEmail),
        }
    }
}

/// Opaque password hash.
///
/// The value is never part of [`SerializedUser`] and is hidden from `Debug`
/// output so it cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-hashed password.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(value))
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

macro_rules! impl_string_field {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                /// Borrow the validated value.
                #[must_use]
                pub fn as_str(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.as_str()
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $name {
                type Error = UserValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )*
    };
}

impl_string_field!(Username, PersonName, EmailAddress, PasswordHash);

macro_rules! impl_display {
    ($($name:ident),* $(,)?) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(Username, PersonName, EmailAddress);

/// Values required to insert a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub email: EmailAddress,
    pub password: PasswordHash,
    pub is_active: bool,
}

impl NewUser {
    /// Build an active user draft.
    #[must_use]
    pub fn new(
        username: Username,
        firstname: PersonName,
        lastname: PersonName,
        email: EmailAddress,
        password: PasswordHash,
    ) -> Self {
        Self {
            username,
            firstname,
            lastname,
            email,
            password,
            is_active: true,
        }
    }

    /// Override the `is_active` flag.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Application user.
///
/// ## Invariants
/// - `username` and `email` are unique across all users; the store enforces
///   this on insert and update.
/// - Deleting a user deletes their posts, their comments on any post, and
///   every follower edge that names them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub email: EmailAddress,
    pub password: PasswordHash,
    pub is_active: bool,
}

impl User {
    /// Combine an assigned identifier with the inserted values.
    #[must_use]
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            username,
            firstname,
            lastname,
            email,
            password,
            is_active,
        } = new_user;
        Self {
            id,
            username,
            firstname,
            lastname,
            email,
            password,
            is_active,
        }
    }

    /// Produce the externally visible representation of the user.
    ///
    /// The password hash and `is_active` flag are deliberately omitted.
    ///
    /// # Examples
    /// ```
    /// use social_schema::domain::{
    ///     EmailAddress, NewUser, PasswordHash, PersonName, User, UserId, Username,
    /// };
    ///
    /// let user = User::from_new(
    ///     UserId::new(1),
    ///     NewUser::new(
    ///         Username::new("ada").unwrap(),
    ///         PersonName::new("Ada").unwrap(),
    ///         PersonName::new("Lovelace").unwrap(),
    ///         EmailAddress::new("ada@example.com").unwrap(),
    ///         PasswordHash::new("argon2$...").unwrap(),
    ///     ),
    /// );
    /// let json = serde_json::to_value(user.serialize()).unwrap();
    /// assert!(json.get("password").is_none());
    /// ```
    #[must_use]
    pub fn serialize(&self) -> SerializedUser {
        SerializedUser {
            id: self.id,
            username: self.username.as_str().to_owned(),
            firstname: self.firstname.as_str().to_owned(),
            lastname: self.lastname.as_str().to_owned(),
            email: self.email.as_str().to_owned(),
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(username) = &changes.username {
            self.username = username.clone();
        }
        if let Some(firstname) = &changes.firstname {
            self.firstname = firstname.clone();
        }
        if let Some(lastname) = &changes.lastname {
            self.lastname = lastname.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(password) = &changes.password {
            self.password = password.clone();
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }
}

/// Public view of a user, as handed to the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializedUser {
    pub id: UserId,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

/// Partial update of a user row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<Username>,
    pub firstname: Option<PersonName>,
    pub lastname: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub password: Option<PasswordHash>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// True when no column would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.firstname.is_none()
            && self.lastname.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.is_active.is_none()
    }
}
