// HTTP routes

pub mod auth;
pub mod health;
pub mod offer_details;
pub mod offers;
pub mod orders;
pub mod profiles;
pub mod reviews;
pub mod stats;

pub use auth::*;
pub use health::*;
pub use offer_details::*;
pub use offers::*;
pub use orders::*;
pub use profiles::*;
pub use reviews::*;
pub use stats::*;

use sqlx::PgPool;

use crate::common::auth::{AuthUser, Principal};
use crate::common::{ApiError, ApiResult};
use crate::domains::profiles::models::Profile;

/// Resolve the authenticated user into a role-carrying principal.
///
/// No credentials fail with `Authentication`. A user without a profile
/// resolves to a role-less principal, which every role predicate denies.
pub(crate) async fn require_principal(
    auth: Option<&AuthUser>,
    pool: &PgPool,
) -> ApiResult<Principal> {
    let user = auth.ok_or(ApiError::Authentication)?;
    let role = Profile::role_of(user.user_id, pool).await?;
    Ok(Principal {
        user_id: user.user_id,
        role,
        is_staff: user.is_staff,
    })
}
