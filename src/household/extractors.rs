use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

/// The household scope of a request. Issued by the auth layer upstream of
/// this service; here it arrives as the `X-Household-Id` header.
pub struct HouseholdId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for HouseholdId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-household-id")
            .and_then(|h| h.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "missing X-Household-Id header".into(),
            ))?;

        let id = raw.parse::<Uuid>().map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                "X-Household-Id is not a valid UUID".into(),
            )
        })?;

        Ok(HouseholdId(id))
    }
}
