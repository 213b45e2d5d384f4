use std::{fmt, result};

use log::{error, info, trace, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::auth::{Credentials, SignupForm};
use crate::backend::Storage;
use crate::maker::{saved_makers_key, SavedMaker};
use crate::outcome::{Navigation, Notice};
use crate::session::{AuthRequired, Session, SESSION_KEY};
use crate::time::Timestamp;
use crate::user::{UserRecord, Users};

const USERS_KEY: &str = "users";

/// One entry of a stored list or map, skipped (but kept on disk) if it
/// doesn't decode.
fn decode<T: DeserializeOwned>(what: &str, value: Value) -> Option<T> {
    serde_json::from_value(value)
        .map_err(|e| {
            warn!("skipping malformed {what}: {e}");
        })
        .ok()
}

fn encode<T: Serialize>(what: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        error!("couldn't encode {what}: {e}");
        Error::Internal
    })
}

fn has_id(entry: &Value, id: &str) -> bool {
    entry.get("id").and_then(Value::as_str) == Some(id)
}

/// Accounts, the current session and each user's saved makers, all kept as
/// JSON documents in one [`Storage`].
///
/// Passwords are stored and compared as plain text. This is a convenience
/// store for a demo site, not a credential system.
pub struct AccountStore<S> {
    storage: S,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    EmptyFields,
    UsernameTooShort,
    PasswordTooShort,
    PasswordMismatch,
    UnknownUserType,
    UsernameExists,
    MissingCredentials,
    UsernameNotFound,
    IncorrectPassword,
    Internal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    InvalidCredential,
    Internal,
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyFields
            | Self::UsernameTooShort
            | Self::PasswordTooShort
            | Self::PasswordMismatch
            | Self::UnknownUserType
            | Self::MissingCredentials => ErrorKind::Validation,
            Self::UsernameExists => ErrorKind::Conflict,
            Self::UsernameNotFound => ErrorKind::NotFound,
            Self::IncorrectPassword => ErrorKind::InvalidCredential,
            Self::Internal => ErrorKind::Internal,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyFields => "Please fill in all fields",
            Self::UsernameTooShort => "Username must be at least 3 characters",
            Self::PasswordTooShort => "Password must be at least 6 characters",
            Self::PasswordMismatch => "Passwords do not match",
            Self::UnknownUserType => "Please choose an account type",
            Self::UsernameExists => "Username already exists",
            Self::MissingCredentials => "Please enter username and password",
            Self::UsernameNotFound => "Username not found",
            Self::IncorrectPassword => "Incorrect password",
            Self::Internal => "Couldn't save your changes",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.message())
    }
}

impl std::error::Error for Error {}

#[derive(Debug)]
pub struct LoggedIn {
    pub session: Session,
    pub notice: Notice,
}

impl<S: Storage> AccountStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Missing and malformed documents both read as `None`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;

        serde_json::from_str(&raw)
            .map_err(|e| {
                warn!("ignoring malformed \"{key}\": {e}");
            })
            .ok()
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|e| {
            error!("couldn't encode \"{key}\": {e}");
            Error::Internal
        })?;

        self.storage.set(key, &json).map_err(|e| {
            error!("couldn't write \"{key}\": {e}");
            Error::Internal
        })
    }

    /// Records stay raw so one damaged account never costs the others.
    fn stored_users(&self) -> Map<String, Value> {
        self.load(USERS_KEY).unwrap_or_default()
    }

    pub fn users(&self) -> Users {
        self.stored_users()
            .into_iter()
            .filter_map(|(name, record)| {
                let record: UserRecord = decode(&format!("user \"{name}\""), record)?;
                Some((name, record))
            })
            .collect()
    }

    pub fn register_user(&mut self, form: &SignupForm) -> Result<Notice> {
        let signup = form.validate()?;
        let username = signup.user();

        let mut users = self.stored_users();
        if users.contains_key(username) {
            info!("signup rejected, \"{username}\" already exists");
            return Err(Error::UsernameExists);
        }

        let record = UserRecord {
            password: signup.pass().into(),
            user_type: signup.user_type(),
            created_at: Timestamp::now(),
        };
        users.insert(username.into(), encode("user record", &record)?);
        self.save(USERS_KEY, &users)?;

        info!("{username} signed up as {}", signup.user_type().as_str());
        Ok(Notice::registered())
    }

    /// Checks the password and replaces whatever session was there before.
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<LoggedIn> {
        let creds = Credentials::new(username, password)?;
        let username = creds.user();

        let user: UserRecord = self
            .stored_users()
            .remove(username)
            .and_then(|record| decode(&format!("user \"{username}\""), record))
            .ok_or_else(|| {
                info!("rejecting unknown user {username}");
                Error::UsernameNotFound
            })?;

        if user.password != creds.pass() {
            info!("wrong password for user {username}");
            return Err(Error::IncorrectPassword);
        }

        let session = Session::new(username.into(), user.user_type);
        self.save(SESSION_KEY, &session)?;

        info!("{username} login at {}", session.login_time);
        Ok(LoggedIn {
            session,
            notice: Notice::logged_in(),
        })
    }

    /// The stored session, if it parses. The user it names is not looked up.
    pub fn current_session(&self) -> Option<Session> {
        self.load(SESSION_KEY)
    }

    pub fn is_logged_in(&self) -> bool {
        self.storage.get(SESSION_KEY).is_some()
    }

    pub fn end_session(&mut self) -> Navigation {
        match self.storage.delete(SESSION_KEY) {
            Ok(()) => info!("logout"),
            Err(e) => error!("couldn't remove session: {e}"),
        }
        Navigation::RedirectToLogin
    }

    pub fn require_session(&self) -> result::Result<Session, AuthRequired> {
        self.current_session().ok_or_else(|| {
            trace!("no session, login required");
            AuthRequired
        })
    }

    pub fn profile_entry(&self) -> Navigation {
        if self.is_logged_in() {
            Navigation::RedirectToProfile
        } else {
            Navigation::RedirectToLogin
        }
    }
}

impl<S: Storage> AccountStore<S> {
    /// Entries stay raw so makers we can't decode are written back untouched.
    fn stored_makers(&self, username: &str) -> Vec<Value> {
        self.load(&saved_makers_key(username)).unwrap_or_default()
    }

    fn save_makers(&mut self, username: &str, makers: &[Value]) -> bool {
        self.save(&saved_makers_key(username), makers).is_ok()
    }

    pub fn saved_makers(&self, session: Option<&Session>) -> Vec<SavedMaker> {
        let Some(session) = session else {
            return vec![];
        };

        self.stored_makers(&session.username)
            .into_iter()
            .filter_map(|entry| decode("saved maker", entry))
            .collect()
    }

    /// False when there's no session or the maker is already saved.
    pub fn add_favorite(&mut self, session: Option<&Session>, maker: &SavedMaker) -> bool {
        let Some(session) = session else {
            trace!("not saving {}, no session", maker.id);
            return false;
        };
        let username = &session.username;

        let mut makers = self.stored_makers(username);
        if makers.iter().any(|m| has_id(m, &maker.id)) {
            trace!("{username} already saved {}", maker.id);
            return false;
        }

        let Ok(entry) = encode("saved maker", maker) else {
            return false;
        };
        makers.push(entry);

        let saved = self.save_makers(username, &makers);
        if saved {
            info!("{username} saved {}, {} saved", maker.id, makers.len());
        }
        saved
    }

    /// Writes the list back even when `maker_id` wasn't in it.
    pub fn remove_favorite(&mut self, session: Option<&Session>, maker_id: &str) -> bool {
        let Some(session) = session else {
            return false;
        };
        let username = &session.username;

        let mut makers = self.stored_makers(username);
        makers.retain(|m| !has_id(m, maker_id));

        let saved = self.save_makers(username, &makers);
        if saved {
            info!("{username} unsaved {maker_id}, {} saved", makers.len());
        }
        saved
    }

    pub fn is_favorite(&self, session: Option<&Session>, maker_id: &str) -> bool {
        let Some(session) = session else {
            return false;
        };

        self.stored_makers(&session.username)
            .iter()
            .any(|m| has_id(m, maker_id))
    }

    /// Returns whether the maker is saved afterwards.
    pub fn toggle_favorite(&mut self, session: Option<&Session>, maker: &SavedMaker) -> bool {
        if self.is_favorite(session, &maker.id) {
            !self.remove_favorite(session, &maker.id)
        } else {
            self.add_favorite(session, maker)
        }
    }
}
