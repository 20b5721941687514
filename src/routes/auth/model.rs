use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::utils::hash_password;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
    SuperAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Student,
    Faculty,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    // 凭证与验证码字段绝不允许出现在任何响应里
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub user_type: UserType,
    pub year: Option<i32>,
    pub branch: Option<String>,
    pub section: Option<String>,
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    #[serde(skip_serializing)]
    pub otp_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    #[serde(rename = "type")]
    pub user_type: Option<UserType>,
    pub name: Option<String>,
    pub year: Option<i32>,
    pub branch: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

const USER_COLUMNS: &str =
    "id, email, name, password_hash, role, user_type, year, branch, section, otp, otp_expiry, created_at";

impl User {
    pub async fn create(
        pool: &PgPool,
        req: RegisterRequest,
        otp: &str,
        otp_expiry: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        if Self::find_by_email(pool, &req.email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password(&req.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, name, password_hash, role, user_type, year, branch, section, otp, otp_expiry)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&req.email)
        .bind(&req.name)
        .bind(password_hash)
        .bind(req.role.unwrap_or(UserRole::User))
        .bind(req.user_type.unwrap_or(UserType::Student))
        .bind(req.year)
        .bind(&req.branch)
        .bind(&req.section)
        .bind(otp)
        .bind(otp_expiry)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(user)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// 验证码一次性消费：匹配且未过期才会清空，整个判定在一条 UPDATE 内完成
    pub async fn verify_otp(pool: &PgPool, email: &str, otp: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET otp = NULL, otp_expiry = NULL
            WHERE email = $1 AND otp = $2 AND otp_expiry > NOW()
            "#,
        )
        .bind(email)
        .bind(otp)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return match Self::find_by_email(pool, email).await? {
                None => Err(AppError::NotFound("User not found".to_string())),
                Some(_) => Err(AppError::BadRequest("Invalid or expired OTP".to_string())),
            };
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_user(id: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@campus.local"),
        name: None,
        password_hash: "$2b$10$not-a-real-hash".to_string(),
        role,
        user_type: UserType::Student,
        year: None,
        branch: None,
        section: None,
        otp: None,
        otp_expiry: None,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serialization_never_exposes_credentials() {
        let mut user = test_user("u1", UserRole::User);
        user.otp = Some("123456".to_string());
        user.otp_expiry = Some(Utc::now());

        let value = serde_json::to_value(&user).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("password_hash"));
        assert!(!obj.contains_key("otp"));
        assert!(!obj.contains_key("otp_expiry"));
        assert_eq!(obj["email"], "u1@campus.local");
    }

    #[test]
    fn roles_serialize_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(UserRole::SuperAdmin).unwrap(),
            "SUPER_ADMIN"
        );
        assert_eq!(serde_json::to_value(UserType::Student).unwrap(), "STUDENT");
    }
}
