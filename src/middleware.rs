use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{database::AppState, error::AppError, handler::found, session};

/// Account id of the signed-in visitor, inserted by [`require_login`]
#[derive(Clone, Debug)]
pub struct CurrentAccount(pub String);

/// Middleware gating member-only routes behind a session
///
/// Visitors without a valid session, or whose session names an account that
/// no longer exists, are redirected to `/login`. Otherwise the account id is
/// made available to the handler as a [`CurrentAccount`] extension.
pub async fn require_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(account_id) = session::account_id(&jar) else {
        return Err(found("/login"));
    };

    match state.accounts.get(&account_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!(%account_id, "session names an unknown account");
            return Err(found("/login"));
        }
        Err(e) => return Err(AppError::from(e).into_response()),
    }

    request.extensions_mut().insert(CurrentAccount(account_id));
    Ok(next.run(request).await)
}
