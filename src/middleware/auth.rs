//! Permission-gated extractors.
//!
//! Each extractor runs the full authorization pipeline, from bearer header
//! extraction through signature verification to the permission check, before
//! the handler body and hands the decoded payload to the handler. Using them
//! in a handler's signature makes the required permission part of the route's
//! contract; a request failing any step never reaches validation or
//! persistence.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::{bearer_token, Claims};
use crate::error::ApiError;
use crate::state::AppState;

async fn authorize(
    parts: &Parts,
    state: &AppState,
    permission: &str,
) -> Result<Claims, ApiError> {
    let token = bearer_token(&parts.headers)?;
    let claims = state.verifier.verify(&token).await?;
    claims.require_permission(permission)?;
    Ok(claims)
}

macro_rules! permission_extractor {
    ($(#[$meta:meta])* $name:ident => $permission:literal) => {
        $(#[$meta])*
        pub struct $name(pub Claims);

        #[async_trait]
        impl FromRequestParts<AppState> for $name {
            type Rejection = ApiError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let claims = authorize(parts, state, $permission).await?;
                Ok($name(claims))
            }
        }
    };
}

permission_extractor!(
    /// Requires the `read:persons` permission.
    ReadPersons => "read:persons"
);
permission_extractor!(
    /// Requires the `create:persons` permission.
    CreatePersons => "create:persons"
);
permission_extractor!(
    /// Requires the `edit:persons` permission.
    EditPersons => "edit:persons"
);
permission_extractor!(
    /// Requires the `delete:persons` permission.
    DeletePersons => "delete:persons"
);
permission_extractor!(
    /// Requires the `read:games` permission.
    ReadGames => "read:games"
);
permission_extractor!(
    /// Requires the `create:games` permission.
    CreateGames => "create:games"
);
permission_extractor!(
    /// Requires the `edit:games` permission.
    EditGames => "edit:games"
);
permission_extractor!(
    /// Requires the `delete:games` permission.
    DeleteGames => "delete:games"
);
