/// Username and password as submitted to the login form.
///
/// Deliberately unvalidated: any mismatch is reported as bad credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Session token handed out on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Result of following an email verification link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailVerification {
    Verified,
    AlreadyVerified,
}

impl EmailVerification {
    pub fn message(&self) -> &'static str {
        match self {
            EmailVerification::Verified => "Email verified!",
            EmailVerification::AlreadyVerified => "Email already verified",
        }
    }
}

/// Outgoing email handed to the notification worker.
///
/// `origin` is the base URL of the request that triggered it, e.g.
/// `http://localhost:8000/`, and is used to build links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Verification {
        email: String,
        username: String,
        token: String,
        origin: String,
    },
    PasswordReset {
        email: String,
        token: String,
        origin: String,
    },
}

impl Notification {
    pub fn recipient(&self) -> &str {
        match self {
            Notification::Verification { email, .. } | Notification::PasswordReset { email, .. } => {
                email
            }
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Notification::Verification { token, .. } | Notification::PasswordReset { token, .. } => {
                token
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Verification { .. } => "verification",
            Notification::PasswordReset { .. } => "password reset",
        }
    }
}
