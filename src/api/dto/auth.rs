//! DTOs for registration, login and profile endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{AuthResponse, UserInfo};
use crate::domain::entities::Role;

/// Allowed username characters.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Username is required"))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Username may only contain letters, digits, '_', '.' and '-'"
    ))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponseDto {
    pub token: String,
    pub username: String,
    pub role: Role,
}

impl From<AuthResponse> for AuthResponseDto {
    fn from(r: AuthResponse) -> Self {
        Self {
            token: r.token,
            username: r.username,
            role: r.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl From<UserInfo> for UserInfoResponse {
    fn from(u: UserInfo) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            role: u.role,
        }
    }
}
