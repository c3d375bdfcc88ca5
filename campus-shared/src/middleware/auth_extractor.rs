use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};

use crate::errors::{AppError, ErrorCode};
use crate::types::auth::{AuthUser, Claims, UserRole};

const DEV_JWT_SECRET: &str = "development-secret-change-in-production";

/// Shared HS256 secret, read from `JWT_SECRET`.
pub fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string())
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let claims = validate_jwt(token, &jwt_secret())?;

        if claims.is_expired() {
            return Err(AppError::new(ErrorCode::TokenExpired, "token has expired"));
        }
        if claims.sub.trim().is_empty() {
            return Err(AppError::new(ErrorCode::TokenInvalid, "token has no subject"));
        }

        Ok(AuthUser::from(claims))
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::new(ErrorCode::Unauthorized, "missing authorization header"))?
        .to_str()
        .map_err(|_| AppError::new(ErrorCode::Unauthorized, "invalid authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::new(ErrorCode::Unauthorized, "authorization header must use Bearer scheme"))
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::new(ErrorCode::TokenExpired, "token has expired")
        }
        _ => AppError::new(ErrorCode::TokenInvalid, format!("invalid token: {e}")),
    })?;

    Ok(token_data.claims)
}

/// Require Admin role
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            return Err(AppError::new(ErrorCode::Forbidden, "admin access required"));
        }
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(jwt_secret().as_bytes()),
        )
        .unwrap()
    }

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/likes");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn valid_token_yields_student() {
        let claims = Claims::new("58000001", UserRole::Student, 3600);
        let mut parts = parts_with(Some(&format!("Bearer {}", token_for(&claims))));

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.id, "58000001");
        assert_eq!(user.role, UserRole::Student);
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let mut parts = parts_with(None);
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::Unauthorized));

        let mut parts = parts_with(Some("Basic abc"));
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::Unauthorized));
    }

    #[tokio::test]
    async fn tampered_token_is_invalid() {
        let claims = Claims::new("58000001", UserRole::Student, 3600);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();
        let mut parts = parts_with(Some(&format!("Bearer {token}")));

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::TokenInvalid));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let claims = Claims::new("58000001", UserRole::Student, -3600);
        let mut parts = parts_with(Some(&format!("Bearer {}", token_for(&claims))));

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::TokenExpired));
    }

    #[tokio::test]
    async fn admin_extractor_checks_role() {
        let student = Claims::new("58000001", UserRole::Student, 3600);
        let mut parts = parts_with(Some(&format!("Bearer {}", token_for(&student))));
        let err = AdminUser::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert_eq!(err.code(), Some(ErrorCode::Forbidden));

        let admin = Claims::new("admin01", UserRole::Admin, 3600);
        let mut parts = parts_with(Some(&format!("Bearer {}", token_for(&admin))));
        let AdminUser(user) = AdminUser::from_request_parts(&mut parts, &()).await.ok().unwrap();
        assert_eq!(user.id, "admin01");
    }
}
