use std::sync::Arc;

use metrics::counter;
use stockroom_config::ValidationPolicy;
use stockroom_core::rules::{self, ValidationError};
use stockroom_core::{PasswordHasher, RepositoryError, ServiceError};
use stockroom_models::{LoginRequest, NewUser, RegisterRequest, User};
use tracing::{info, instrument, warn};

use crate::repository::{UserRepository, constraints};

/// Registration fields after validation and normalization.
struct Registration<'a> {
    username: Option<String>,
    email: String,
    password: &'a str,
    full_name: String,
}

enum Identifier {
    Email(String),
    Username(String),
}

impl Identifier {
    fn invalid_credentials(&self) -> ServiceError {
        match self {
            Identifier::Email(_) => ServiceError::bad_request("Invalid email or password"),
            Identifier::Username(_) => ServiceError::bad_request("Invalid username or password"),
        }
    }
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    policy: ValidationPolicy,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        policy: ValidationPolicy,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    #[instrument(skip(self))]
    pub async fn register(&self, request: RegisterRequest) -> Result<User, ServiceError> {
        let registration = self.validate_registration(&request)?;

        if let Some(username) = &registration.username
            && self.users.exists_by_username(username).await?
        {
            return Err(ServiceError::bad_request("Username already exists"));
        }
        if self.users.exists_by_email(&registration.email).await? {
            return Err(ServiceError::bad_request("Email already exists"));
        }

        let password_hash = self.hasher.hash(registration.password)?;

        let user = self
            .users
            .insert(NewUser {
                username: registration.username,
                email: registration.email,
                password_hash,
                full_name: registration.full_name,
            })
            .await
            .map_err(duplicate_user)?;

        counter!("auth_registrations_total").increment(1);
        info!(user_id = user.id, email = %user.email, "User registered");

        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn login(&self, request: LoginRequest) -> Result<User, ServiceError> {
        let identifier = match (
            rules::present(request.email.as_deref()),
            rules::present(request.username.as_deref()),
        ) {
            (Some(email), _) => {
                Identifier::Email(rules::printable(email, "Email")?.to_lowercase())
            }
            (None, Some(username)) => {
                Identifier::Username(rules::printable(username, "Username")?.to_string())
            }
            (None, None) => return Err(ServiceError::bad_request("Email is required")),
        };
        let password = non_empty_password(request.password.as_deref())?;

        let user = match &identifier {
            Identifier::Email(email) => self.users.find_by_email(email).await?,
            Identifier::Username(username) => self.users.find_by_username(username).await?,
        };

        let Some(user) = user else {
            counter!("auth_login_failures_total").increment(1);
            warn!("Login attempt for unknown account");
            return Err(identifier.invalid_credentials());
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            counter!("auth_login_failures_total").increment(1);
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(identifier.invalid_credentials());
        }

        info!(user_id = user.id, "User logged in");
        Ok(user)
    }

    fn validate_registration<'a>(
        &self,
        request: &'a RegisterRequest,
    ) -> Result<Registration<'a>, ValidationError> {
        let username = rules::present(request.username.as_deref());
        if username.is_none() && self.policy.require_username {
            return Err(ValidationError::new("Username is required"));
        }
        let email = rules::required(request.email.as_deref(), "Email is required")?;
        let password = non_empty_password(request.password.as_deref())?;
        let full_name = rules::required(request.full_name.as_deref(), "Full name is required")?;

        let username = username
            .map(|u| rules::username(u, &self.policy))
            .transpose()?;
        let email = rules::email(email)?;
        rules::password(password, &self.policy)?;
        let full_name = rules::full_name(full_name)?;

        Ok(Registration {
            username,
            email,
            password,
            full_name,
        })
    }
}

fn non_empty_password(value: Option<&str>) -> Result<&str, ValidationError> {
    value
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ValidationError::new("Password is required"))
}

/// Maps a unique violation that raced past the pre-checks to the same
/// message the pre-check would have produced.
fn duplicate_user(err: RepositoryError) -> ServiceError {
    match &err {
        RepositoryError::Conflict { constraint } if constraint == constraints::USERS_USERNAME => {
            ServiceError::bad_request("Username already exists")
        }
        RepositoryError::Conflict { constraint } if constraint == constraints::USERS_EMAIL => {
            ServiceError::bad_request("Email already exists")
        }
        _ => err.into(),
    }
}
