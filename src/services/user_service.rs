use std::sync::Arc;

use tracing::{error, info};

use crate::auth::{JwtKeys, PasswordHasher};
use crate::db::{ScheduleRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Credentials, LoginResponse, User};

/// Sign-up, login and profile lookup.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    schedules: Arc<dyn ScheduleRepository>,
    keys: Arc<JwtKeys>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        schedules: Arc<dyn ScheduleRepository>,
        keys: Arc<JwtKeys>,
        hasher: PasswordHasher,
    ) -> Self {
        Self { users, schedules, keys, hasher }
    }

    /// Creates the user and then its schedule. The two writes are not atomic.
    pub async fn sign_up(&self, req: Credentials) -> Result<User, AppError> {
        let hashed = self.hasher.hash(&req.password).await?;

        let user = match self.users.insert_user(&req.email, &hashed).await {
            Ok(user) => user,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(AppError::EmailTaken);
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = self.schedules.insert_schedule(user.id).await {
            error!("user {} created without a schedule", user.id);
            return Err(e.into());
        }

        info!("signed up user {}", user.id);
        Ok(user)
    }

    pub async fn login(&self, req: Credentials) -> Result<LoginResponse, AppError> {
        let user = self
            .users
            .find_user_by_email(&req.email)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        if !self.hasher.verify(&req.password, &user.password).await? {
            return Err(AppError::PasswordMismatch);
        }

        let token = self.keys.issue(user.id)?;
        info!("user {} logged in", user.id);
        Ok(LoginResponse { token })
    }

    pub async fn me(&self, user_id: i64) -> Result<User, AppError> {
        self.users
            .find_user(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}
