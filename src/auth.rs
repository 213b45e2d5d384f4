use crate::store::{Error, Result};
use crate::user::UserType;

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// The signup form as typed. Nothing is trusted until [`SignupForm::validate`].
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub user_type: String,
}

/// A signup that passed every field check.
#[derive(Debug)]
pub struct Signup {
    user: String,
    pass: String,
    user_type: UserType,
}

/// A login attempt with both fields filled in.
#[derive(Debug)]
pub struct Credentials {
    user: String,
    pass: String,
}

impl SignupForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            user_type: user_type.into(),
        }
    }

    pub fn validate(&self) -> Result<Signup> {
        let user = self.username.trim();

        if user.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
            || self.user_type.is_empty()
        {
            return Err(Error::EmptyFields);
        }

        if user.chars().count() < MIN_USERNAME_LEN {
            return Err(Error::UsernameTooShort);
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::PasswordTooShort);
        }

        if self.password != self.confirm_password {
            return Err(Error::PasswordMismatch);
        }

        let user_type = self
            .user_type
            .parse()
            .map_err(|()| Error::UnknownUserType)?;

        Ok(Signup {
            user: user.into(),
            pass: self.password.clone(),
            user_type,
        })
    }
}

impl Signup {
    pub fn user(&self) -> &str { &self.user }
    pub fn pass(&self) -> &str { &self.pass }
    pub fn user_type(&self) -> UserType { self.user_type }
}

impl Credentials {
    pub fn new(user: &str, pass: &str) -> Result<Self> {
        let user = user.trim();

        if user.is_empty() || pass.is_empty() {
            return Err(Error::MissingCredentials);
        }

        Ok(Self {
            user: user.into(),
            pass: pass.into(),
        })
    }

    pub fn user(&self) -> &str { &self.user }
    pub fn pass(&self) -> &str { &self.pass }
}

#[cfg(test)]
mod test {
    use super::*;

    fn form(user: &str, pass: &str, confirm: &str, kind: &str) -> Result<Signup> {
        SignupForm::new(user, pass, confirm, kind).validate()
    }

    #[test]
    fn valid_signup() {
        let signup = form("  alice ", "secret1", "secret1", "student").unwrap();

        assert_eq!(signup.user(), "alice");
        assert_eq!(signup.pass(), "secret1");
        assert_eq!(signup.user_type(), UserType::Student);
    }

    #[test]
    fn empty_fields() {
        assert_eq!(form("", "secret1", "secret1", "student").unwrap_err(), Error::EmptyFields);
        assert_eq!(form("   ", "secret1", "secret1", "student").unwrap_err(), Error::EmptyFields);
        assert_eq!(form("alice", "", "secret1", "student").unwrap_err(), Error::EmptyFields);
        assert_eq!(form("alice", "secret1", "", "student").unwrap_err(), Error::EmptyFields);
        assert_eq!(form("alice", "secret1", "secret1", "").unwrap_err(), Error::EmptyFields);
    }

    #[test]
    fn checks_run_in_order() {
        // short username is reported before a short, mismatched password
        assert_eq!(form("al", "abc", "xyz", "student").unwrap_err(), Error::UsernameTooShort);
        assert_eq!(form("alice", "abc", "xyz", "student").unwrap_err(), Error::PasswordTooShort);
        assert_eq!(form("alice", "secret1", "secret2", "student").unwrap_err(), Error::PasswordMismatch);
        assert_eq!(form("alice", "secret1", "secret1", "admin").unwrap_err(), Error::UnknownUserType);
    }

    #[test]
    fn length_boundaries() {
        assert!(form("bob", "123456", "123456", "viewer").is_ok());
        assert_eq!(form("bo", "123456", "123456", "viewer").unwrap_err(), Error::UsernameTooShort);
        assert_eq!(form("bob", "12345", "12345", "viewer").unwrap_err(), Error::PasswordTooShort);
    }

    #[test]
    fn password_is_not_trimmed() {
        assert_eq!(
            form("alice", "secret1 ", "secret1", "student").unwrap_err(),
            Error::PasswordMismatch
        );
    }

    #[test]
    fn credentials() {
        let creds = Credentials::new(" alice", "secret1").unwrap();
        assert_eq!(creds.user(), "alice");
        assert_eq!(creds.pass(), "secret1");

        assert_eq!(Credentials::new("", "secret1").unwrap_err(), Error::MissingCredentials);
        assert_eq!(Credentials::new("alice", "").unwrap_err(), Error::MissingCredentials);
    }
}
