use crate::{
    auth::{
        hash_password, issue_token, verify_password, AuthResponse, LoginRequest, SignupRequest,
        TokenKeys,
    },
    error::AppError,
    store,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account with a hashed password and returns a success
/// message. No token is issued at signup; the client logs in afterwards.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    // Hash password
    let password_hash = hash_password(&signup_data.password)?;

    // Insert new user; duplicate username/email is rejected inside
    store::users::create(
        &pool,
        &signup_data.username,
        &signup_data.email,
        &password_hash,
    )
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Signup successful"
    })))
}

/// Login user
///
/// Authenticates a user and returns their id together with a bearer token
/// valid for 2 days. Unknown username and wrong password are reported
/// identically so the response leaks nothing about which field was wrong.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    keys: web::Data<TokenKeys>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user = store::users::find_by_username(&pool, &login_data.username).await?;

    let user = match user {
        Some(user) => user,
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    if verify_password(&login_data.password, &user.password_hash)? {
        let token = issue_token(&keys, &user.username)?;
        Ok(HttpResponse::Ok().json(AuthResponse { id: user.id, token }))
    } else {
        Err(AppError::Unauthorized("Invalid credentials".into()))
    }
}
