pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{issue_token, verify_token, AuthError, Claims, TokenKeys};

/// Represents the payload for a new account signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username for the new account.
    /// Must be at least 4 characters long and unique across all users.
    #[validate(length(min = 4, message = "Username must have at least 4 characters"))]
    pub username: String,
    /// Email address for the new account. Required and unique; the format is
    /// not validated server-side.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password for the new account. Stored only as a salted hash.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response structure after a successful login.
/// Contains the user's id and a bearer token valid for 2 days.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The unique identifier of the authenticated user.
    pub id: Uuid,
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
}
