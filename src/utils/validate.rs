//! Extractors that deserialize and then run `validator` checks.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| AppError::from(e))?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct RedeemBody {
        #[validate(range(min = 1, message = "amount must be positive"))]
        amount: i64,
        #[validate(length(max = 10))]
        note: Option<String>,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct PageQuery {
        #[validate(range(min = 1))]
        page: Option<u32>,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/redeem")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let result =
            ValidatedJson::<RedeemBody>::from_request(json_request(r#"{"amount": 5}"#), &()).await;
        let ValidatedJson(body) = result.unwrap();
        assert_eq!(body.amount, 5);
        assert!(body.note.is_none());
    }

    #[tokio::test]
    async fn test_json_validation_errors() {
        let result = ValidatedJson::<RedeemBody>::from_request(
            json_request(r#"{"amount": 0, "note": "far too long a note"}"#),
            &(),
        )
        .await;

        match result {
            Err(AppError::ValidationErrors { errors }) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["amount", "note"]);
                assert_eq!(errors[0].message, "amount must be positive");
            }
            other => panic!("expected ValidationErrors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result =
            ValidatedJson::<RedeemBody>::from_request(json_request(r#"{"amount": "#), &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/redeem")
            .body(Body::from(r#"{"amount": 5}"#))
            .unwrap();
        let result = ValidatedJson::<RedeemBody>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    async fn query(uri: &str) -> AppResult<ValidatedQuery<PageQuery>> {
        let (mut parts, _) = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
            .into_parts();
        ValidatedQuery::<PageQuery>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_query_validation() {
        assert_eq!(query("/items?page=3").await.unwrap().0.page, Some(3));
        assert!(query("/items").await.unwrap().0.page.is_none());
        assert!(matches!(
            query("/items?page=0").await,
            Err(AppError::ValidationErrors { .. })
        ));
        assert!(matches!(
            query("/items?page=abc").await,
            Err(AppError::BadRequest { .. })
        ));
    }
}
