use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Owns the signing secret, the session lifetime and the clock every expiry
/// is measured against.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    session_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Authenticator {
    /// Session lifetime used when none is configured.
    pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 3600;

    /// Lifetime of tokens embedded in email links.
    pub const LINK_TOKEN_TTL_DAYS: i64 = 7;

    /// Create a new authenticator with HS256, default bcrypt cost, a one hour
    /// session lifetime and the system clock.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::from_parts(JwtHandler::new(jwt_secret), PasswordHasher::new())
    }

    /// Assemble an authenticator from preconfigured components.
    pub fn from_parts(jwt_handler: JwtHandler, password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            jwt_handler,
            session_ttl: Duration::seconds(Self::DEFAULT_SESSION_TTL_SECONDS),
            clock: Arc::new(SystemClock),
        }
    }

    /// Override the default session token lifetime.
    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    /// Replace the clock used for issuance and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a session token.
    ///
    /// Sets `exp` to now plus `expires_in`, or plus the configured session
    /// lifetime when no override is given. No `iat` is added.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_access_token(
        &self,
        claims: Claims,
        expires_in: Option<Duration>,
    ) -> Result<String, JwtError> {
        let expires_at = self.clock.now() + expires_in.unwrap_or(self.session_ttl);
        self.jwt_handler
            .encode(&claims.with_expiration(expires_at.timestamp()))
    }

    /// Issue a token for an emailed link (address verification, password reset).
    ///
    /// Always carries `iat` and expires seven days after issuance.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_link_token(&self, claims: Claims) -> Result<String, JwtError> {
        let now = self.clock.now();
        let expires_at = now + Duration::days(Self::LINK_TOKEN_TTL_DAYS);
        self.jwt_handler.encode(
            &claims
                .with_issued_at(now.timestamp())
                .with_expiration(expires_at.timestamp()),
        )
    }

    /// Validate and decode a token.
    ///
    /// Pure: no I/O. Tokens without `exp`, or whose `exp` is not in the future
    /// according to this authenticator's clock, are rejected.
    ///
    /// # Errors
    /// * `InvalidToken` / `DecodingFailed` - Bad signature or structure
    /// * `MissingClaim` - No `exp` claim
    /// * `TokenExpired` - `exp` has passed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.exp.is_none() {
            return Err(JwtError::MissingClaim("exp".to_string()));
        }
        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::clock::ManualClock;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn manual_authenticator() -> (Authenticator, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        ));
        let authenticator = Authenticator::from_parts(
            JwtHandler::new(SECRET),
            PasswordHasher::with_cost(4).unwrap(),
        )
        .with_clock(clock.clone());
        (authenticator, clock)
    }

    #[test]
    fn test_hash_and_verify_password() {
        let (authenticator, _) = manual_authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash).unwrap());
        assert!(!authenticator.verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_access_token_uses_session_ttl_by_default() {
        let (authenticator, clock) = manual_authenticator();
        let authenticator = authenticator.with_session_ttl(Duration::seconds(120));

        let token = authenticator
            .issue_access_token(Claims::for_subject("alice"), None)
            .unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.exp, Some(clock.now().timestamp() + 120));
        assert_eq!(claims.iat, None);
    }

    #[test]
    fn test_access_token_honours_override() {
        let (authenticator, clock) = manual_authenticator();

        let token = authenticator
            .issue_access_token(Claims::for_subject("alice"), Some(Duration::seconds(30)))
            .unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.exp, Some(clock.now().timestamp() + 30));
    }

    #[test]
    fn test_access_token_expires_after_ttl() {
        let (authenticator, clock) = manual_authenticator();

        let token = authenticator
            .issue_access_token(Claims::for_subject("alice"), Some(Duration::seconds(60)))
            .unwrap();

        assert!(authenticator.validate_token(&token).is_ok());

        clock.advance(Duration::seconds(59));
        assert!(authenticator.validate_token(&token).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::TokenExpired)
        );

        clock.advance(Duration::seconds(1));
        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_link_token_lasts_seven_days() {
        let (authenticator, clock) = manual_authenticator();
        let issued_at = clock.now().timestamp();

        let token = authenticator
            .issue_link_token(Claims::for_subject("alice@example.com"))
            .unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.sub.as_deref(), Some("alice@example.com"));
        assert_eq!(claims.iat, Some(issued_at));
        assert_eq!(claims.exp, Some(issued_at + 7 * 24 * 60 * 60));

        clock.advance(Duration::days(7) - Duration::seconds(1));
        assert!(authenticator.validate_token(&token).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_validate_token_with_other_secret() {
        let (authenticator, _) = manual_authenticator();
        let other = Authenticator::new(b"another_secret_key_of_32_bytes_min!");

        let token = other
            .issue_access_token(Claims::for_subject("alice"), None)
            .unwrap();

        assert!(matches!(
            authenticator.validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_validate_token_requires_exp() {
        let handler = JwtHandler::new(SECRET);
        let (authenticator, _) = manual_authenticator();

        let token = handler.encode(&Claims::for_subject("alice")).unwrap();

        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::MissingClaim("exp".to_string()))
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let (authenticator, _) = manual_authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
