use crate::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// The header carrying the authenticated user's id.
///
/// Authentication itself is delegated: the identity service in front of this
/// server validates the session token and installs this header on every
/// request it forwards. The server never sees credentials.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated user's id.
///
/// Every user-scoped handler takes a `CurrentUser`; requests without a valid
/// id are rejected with 401 before any handler logic runs.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(format!("Missing {USER_ID_HEADER} header"))
            })?;

        let user_id = Uuid::parse_str(value).map_err(|_| {
            AppError::Unauthorized(format!("Malformed {USER_ID_HEADER} header"))
        })?;

        Ok(CurrentUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CurrentUser, AppError> {
        let (mut parts, _body) = request.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_a_valid_user_id() {
        let user_id = Uuid::new_v4();
        let request = Request::builder()
            .header(USER_ID_HEADER, user_id.to_string())
            .body(())
            .unwrap();

        let current = extract(request).await.unwrap();
        assert_eq!(current.0, user_id);
    }

    #[tokio::test]
    async fn rejects_a_missing_header() {
        let request = Request::builder().body(()).unwrap();
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn rejects_a_malformed_id() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
