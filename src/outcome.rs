//! What the presentation layer is told after each account operation: a
//! message to show, and optionally where to go next and after how long.
//! Nothing here sleeps or navigates by itself.

use std::fmt;
use std::time::Duration;

use crate::store::Error;

const SIGNUP_PAUSE: Duration = Duration::from_millis(2000);
const LOGIN_PAUSE: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Switch the auth page from the signup form back to the login form.
    ShowLogin,
    RedirectToLogin,
    RedirectToProfile,
}

impl Navigation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShowLogin => "showLogin",
            Self::RedirectToLogin => "redirectToLogin",
            Self::RedirectToProfile => "redirectToProfile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUp {
    pub after: Duration,
    pub to: Navigation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub follow_up: Option<FollowUp>,
}

impl Notice {
    pub fn registered() -> Self {
        Self {
            severity: Severity::Success,
            message: "Account created successfully! Please login.".into(),
            follow_up: Some(FollowUp {
                after: SIGNUP_PAUSE,
                to: Navigation::ShowLogin,
            }),
        }
    }

    pub fn logged_in() -> Self {
        Self {
            severity: Severity::Success,
            message: "Login successful! Redirecting...".into(),
            follow_up: Some(FollowUp {
                after: LOGIN_PAUSE,
                to: Navigation::RedirectToProfile,
            }),
        }
    }
}

impl From<Error> for Notice {
    fn from(e: Error) -> Self {
        Self {
            severity: Severity::Error,
            message: e.to_string(),
            follow_up: None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "[{}] {}", self.severity, self.message)
    }
}
