use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tracing::warn;
use uuid::Uuid;

/// Header the gateway sets once it has identified the caller.
pub const CALLER_HEADER: &str = "x-user-id";

/// Caller identity forwarded by the gateway; `None` for anonymous requests.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Option<Uuid>);

impl Caller {
    pub fn required(self) -> Result<Uuid, (StatusCode, String)> {
        self.0
            .ok_or((StatusCode::UNAUTHORIZED, format!("{CALLER_HEADER} header required")))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(CALLER_HEADER) else {
            return Ok(Caller(None));
        };

        let id = value
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or_else(|| {
                warn!("malformed caller header");
                (StatusCode::BAD_REQUEST, format!("invalid {CALLER_HEADER} header"))
            })?;

        Ok(Caller(Some(id)))
    }
}
