use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    AppState,
    error::AppError,
    routes::auth::model::{User, UserRole},
    utils::verify_token,
};

/// 校验 Bearer token 并把完整用户记录挂到请求上，供后续 handler 使用
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = bearer.ok_or_else(|| {
        AppError::Unauthorized("Unauthorized: No token provided".to_string())
    })?;

    let claims = verify_token(bearer.token(), &state.config)
        .map_err(|_| AppError::Unauthorized("Unauthorized: Invalid token".to_string()))?;

    // token 里的用户可能已被删除，必须回表确认
    let user = User::find_by_id(&state.pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized: Invalid token".to_string()))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// 角色检查本体，纯谓词，便于单测
pub fn authorize(user: &User, allowed: &[UserRole]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Forbidden: Insufficient permissions".to_string(),
        ))
    }
}

pub async fn require_admin(request: Request<Body>, next: Next) -> Result<Response, AppError> {
    role_gate(request, next, &[UserRole::Admin, UserRole::SuperAdmin]).await
}

pub async fn require_super_admin(request: Request<Body>, next: Next) -> Result<Response, AppError> {
    role_gate(request, next, &[UserRole::SuperAdmin]).await
}

async fn role_gate(
    request: Request<Body>,
    next: Next,
    allowed: &[UserRole],
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or_else(|| AppError::Unauthorized("Unauthorized: No token provided".to_string()))?;

    authorize(user, allowed)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::auth::model::test_user;

    #[test]
    fn authorize_allows_listed_roles() {
        let admin = test_user("u1", UserRole::Admin);
        assert!(authorize(&admin, &[UserRole::Admin, UserRole::SuperAdmin]).is_ok());
    }

    #[test]
    fn authorize_rejects_unlisted_roles() {
        let user = test_user("u1", UserRole::User);
        let err = authorize(&user, &[UserRole::SuperAdmin]).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }
}
