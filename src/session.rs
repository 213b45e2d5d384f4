use serde::{Deserialize, Serialize};

use crate::outcome::Navigation;
use crate::time::Timestamp;
use crate::user::UserType;

/// Key holding the logged-in user. Its presence alone means "logged in".
pub const SESSION_KEY: &str = "currentUser";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub user_type: UserType,
    pub login_time: Timestamp,
}

impl Session {
    pub fn new(username: String, user_type: UserType) -> Self {
        Self {
            username,
            user_type,
            login_time: Timestamp::now(),
        }
    }
}

/// A page needed a session and there wasn't one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthRequired;

impl AuthRequired {
    pub fn navigation(&self) -> Navigation {
        Navigation::RedirectToLogin
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn json_field_names() {
        let session = Session {
            username: "alice".into(),
            user_type: UserType::Student,
            login_time: Timestamp::default(),
        };

        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(
            json,
            r#"{"username":"alice","userType":"student","loginTime":"1970-01-01T00:00:00Z"}"#
        );
    }
}
