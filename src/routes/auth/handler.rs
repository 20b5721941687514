use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Utc};

use crate::{
    AppState,
    common::Json,
    error::AppError,
    mailer::Mailer,
    utils::{generate_otp, generate_token, message_to_api_response, success_to_api_response,
            verify_password},
};

use super::model::{LoginRequest, LoginResponse, RegisterRequest, User, VerifyOtpRequest};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let otp = generate_otp();
    let otp_expiry = Utc::now() + Duration::seconds(state.config.otp_ttl().as_secs() as i64);

    let email = req.email.clone();
    let user = User::create(&state.pool, req, &otp, otp_expiry).await?;

    Mailer::new(state.http.clone(), &state.config)
        .send(&email, "Verify your account", &format!("Your OTP is: {otp}"))
        .await?;

    tracing::info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, success_to_api_response(user)))
}

#[axum::debug_handler]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    User::verify_otp(&state.pool, &req.email, &req.otp).await?;

    Ok((
        StatusCode::OK,
        message_to_api_response("OTP verified successfully. Account activated."),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    // 未知邮箱与密码错误必须返回同一响应，避免探测已注册用户
    let invalid = || AppError::BadRequest("Invalid email or password".to_string());

    let user = User::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = generate_token(&user.id, user.role, &state.config)
        .map_err(|_| AppError::Internal("Failed to generate token".to_string()))?;

    Ok((
        StatusCode::OK,
        success_to_api_response(LoginResponse { token, user }),
    ))
}

#[axum::debug_handler]
pub async fn get_profile(Extension(user): Extension<User>) -> impl IntoResponse {
    (StatusCode::OK, success_to_api_response(user))
}

#[axum::debug_handler]
pub async fn admin_access(Extension(_user): Extension<User>) -> impl IntoResponse {
    (StatusCode::OK, message_to_api_response("Welcome, Admin!"))
}
