//! Built-in demo credential rules.

use secrecy::{ExposeSecret, SecretString};

use forkful_core::{Email, User, UserId};

use super::{AuthError, AuthGrant, Authenticator, Registration};

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "password";
const DEMO_TOKEN: &str = "demo-jwt-token";
const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;

/// Accepts the demo account, or any well-formed email with a long-enough
/// password. Nothing is stored server-side.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoAuthenticator;

impl DemoAuthenticator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn grant(user: User) -> AuthGrant {
        AuthGrant {
            user,
            access_token: SecretString::from(DEMO_TOKEN.to_owned()),
            refresh_token: None,
        }
    }
}

/// Ids for ad-hoc demo users come from the clock.
fn fresh_user_id() -> UserId {
    UserId::new(chrono::Utc::now().timestamp_millis())
}

impl Authenticator for DemoAuthenticator {
    async fn login(&self, email: &str, password: &SecretString) -> Result<AuthGrant, AuthError> {
        let password = password.expose_secret();

        if email.trim() == DEMO_EMAIL && password == DEMO_PASSWORD {
            let email = Email::parse(DEMO_EMAIL).map_err(|_| AuthError::InvalidCredentials)?;
            return Ok(Self::grant(User {
                id: UserId::new(1),
                name: "Demo User".to_string(),
                email,
            }));
        }

        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Self::grant(User {
            id: fresh_user_id(),
            name: email.local_part().to_string(),
            email,
        }))
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, AuthError> {
        let name = registration.name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(AuthError::InvalidRegistration("name too short".to_string()));
        }
        let email = Email::parse(&registration.email)
            .map_err(|e| AuthError::InvalidRegistration(e.to_string()))?;
        if registration.password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidRegistration(
                "password too short".to_string(),
            ));
        }

        Ok(Self::grant(User {
            id: fresh_user_id(),
            name: name.to_string(),
            email,
        }))
    }
}
