use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Everyone registered on this browser, keyed by username.
pub type Users = BTreeMap<String, UserRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    // plain text, this store makes no attempt at credential security
    pub password: String,
    pub user_type: UserType,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Faculty,
    Employer,
    Viewer,
}

impl UserType {
    pub const ALL: [UserType; 4] = [Self::Student, Self::Faculty, Self::Employer, Self::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Employer => "employer",
            Self::Viewer => "viewer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Faculty => "Faculty",
            Self::Employer => "Potential Employer",
            Self::Viewer => "Viewer",
        }
    }

    /// CSS colour of the badge shown next to the username.
    pub fn badge_color(&self) -> &'static str {
        match self {
            Self::Student => "#0070ff",
            Self::Faculty => "#d60000",
            Self::Employer => "#008000",
            Self::Viewer => "#666666",
        }
    }
}

impl FromStr for UserType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.display_name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_form_values() {
        assert_eq!("student".parse::<UserType>(), Ok(UserType::Student));
        assert_eq!("employer".parse::<UserType>(), Ok(UserType::Employer));
        assert_eq!("Student".parse::<UserType>(), Err(()));
        assert_eq!("".parse::<UserType>(), Err(()));
    }

    #[test]
    fn record_json_shape() {
        let record = UserRecord {
            password: "secret1".into(),
            user_type: UserType::Faculty,
            created_at: Timestamp::default(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["password"], "secret1");
        assert_eq!(json["userType"], "faculty");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn employer_badge() {
        assert_eq!(UserType::Employer.display_name(), "Potential Employer");
        assert_eq!(UserType::Employer.badge_color(), "#008000");
    }
}
