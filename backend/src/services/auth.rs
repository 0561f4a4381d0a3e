//! Authentication service for login and token management
//!
//! Users and role memberships are provisioned by an external admin process;
//! this service only verifies credentials and reads role memberships.

use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::types::Role;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

/// JWT claims structure for access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// JWT claims structure for refresh tokens
#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User info from database
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    is_active: bool,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            refresh_token_expiry: config.jwt.refresh_token_expiry,
        }
    }

    /// Verify credentials and issue a token pair.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, is_active FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let roles = self.load_roles(user.id).await?;
        self.issue_tokens(&user, &roles)
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthTokens> {
        let claims = decode::<RefreshClaims>(
            refresh_token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, is_active FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InvalidToken);
        }

        let roles = self.load_roles(user.id).await?;
        self.issue_tokens(&user, &roles)
    }

    /// Role memberships for a user, unknown role strings dropped.
    async fn load_roles(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|r| {
                let role = Role::from_str(r);
                if role.is_none() {
                    tracing::warn!("Unknown role '{}' for user {}", r, user_id);
                }
                role
            })
            .collect())
    }

    fn issue_tokens(&self, user: &UserRow, roles: &[Role]) -> AppResult<AuthTokens> {
        let now = Utc::now();

        let access_claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        let refresh_claims = RefreshClaims {
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.refresh_token_expiry)).timestamp(),
        };

        let key = EncodingKey::from_secret(self.jwt_secret.as_bytes());
        let access_token = encode(&Header::default(), &access_claims, &key)
            .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))?;
        let refresh_token = encode(&Header::default(), &refresh_claims, &key)
            .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }
}
