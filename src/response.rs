use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

/// Pagination details attached to collection responses.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Meta {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Envelope every endpoint answers with, success or not.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn paginated(data: T, meta: Meta) -> Self {
        Self {
            success: true,
            message: "ok".into(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Payload of delete endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Uuid,
}

/// Successful creation, answered with 201.
pub struct Created<T>(pub ApiResponse<T>);

impl<T: Serialize> Created<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self(ApiResponse::ok(data, message))
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn ok_envelope_has_null_meta() {
        let body = serde_json::to_value(ApiResponse::ok(json!({"id": 1}), "fetched")).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "message": "fetched", "data": {"id": 1}, "meta": null})
        );
    }

    #[test]
    fn paginated_envelope_carries_meta() {
        let meta = Meta { total: 42, limit: 10, offset: 20 };
        let body = serde_json::to_value(ApiResponse::paginated(vec![1, 2, 3], meta)).unwrap();
        assert_eq!(body["meta"], json!({"total": 42, "limit": 10, "offset": 20}));
        assert_eq!(body["data"], json!([1, 2, 3]));
    }

    #[test]
    fn failure_envelope_has_no_data() {
        let body = serde_json::to_value(ApiResponse::failure("nope")).unwrap();
        assert_eq!(body["success"], Value::Bool(false));
        assert_eq!(body["data"], Value::Null);
    }

    #[test]
    fn created_answers_201() {
        let res = Created::new("x", "created").into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
    }
}
