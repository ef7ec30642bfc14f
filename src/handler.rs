//! HTTP request handlers for TinyApp
//!
//! This module implements the request-handling contract:
//! - Registering accounts, logging in and out
//! - Listing, creating, editing and deleting short URLs
//! - Redirecting short codes to their long URLs
//!
//! Handlers that sit behind [`require_login`](crate::middleware::require_login)
//! receive the signed-in account as a [`CurrentAccount`] extension.

use std::collections::BTreeMap;

use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Form, Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::instrument;

use crate::{
    auth,
    database::AppState,
    error::AppError,
    ids,
    middleware::CurrentAccount,
    model::{Account, CredentialsForm, LongUrlForm, UrlRecord},
    session,
    view::{UrlsIndex, UrlsLogin, UrlsNew, UrlsRegister, UrlsShow},
};

/// Builds a `302 Found` redirect.
///
/// Axum's `Redirect` only offers 303/307/308; browsers and the `/u/` contract
/// expect a plain 302.
pub fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

fn render(template: impl Template) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// `GET /`
pub async fn root() -> Response {
    found("/urls")
}

/// `GET /hello`
pub async fn hello() -> Html<&'static str> {
    Html("<html><body>Hello <b>World</b></body></html>\n")
}

/// `GET /urls.json` dumps the URL store keyed by short code
pub async fn urls_json(State(state): State<AppState>) -> Result<Json<BTreeMap<String, UrlRecord>>, AppError> {
    let urls = state
        .urls
        .scan()?
        .into_iter()
        .map(|record| (record.short_code.clone(), record))
        .collect();

    Ok(Json(urls))
}

/// `GET /urls` lists every record, oldest first, to every visitor
pub async fn list_urls(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Html<String>, AppError> {
    let mut urls = state.urls.scan()?;
    urls.sort_by_key(|record| record.created_at);

    render(UrlsIndex {
        urls,
        account_id: session::account_id(&jar),
    })
}

/// `POST /urls` stores a new short URL and redirects to its detail page
///
/// The owner is whoever the session names; anonymous submissions are kept
/// without an owner and therefore cannot be edited later.
#[instrument(name = "Web: Create URL", skip(state, jar, form))]
pub async fn create_url(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LongUrlForm>,
) -> Result<Response, AppError> {
    let owner = session::account_id(&jar);
    let short_code = ids::allocate(|candidate| state.urls.get(candidate).map(|r| r.is_some()))?;

    let record = UrlRecord::new(short_code.clone(), form.long_url, owner);
    state.urls.put(&short_code, &record)?;
    tracing::info!(%short_code, owner = ?record.owner_account_id, "short URL created");

    Ok(found(format!("/urls/{short_code}")))
}

/// `GET /urls/new`
pub async fn new_url_form(
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
) -> Result<Html<String>, AppError> {
    render(UrlsNew {
        account_id: Some(account_id),
    })
}

/// `GET /urls/{short_code}`
pub async fn show_url(
    State(state): State<AppState>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Path(short_code): Path<String>,
) -> Result<Html<String>, AppError> {
    let url = state.urls.get(&short_code)?.ok_or(AppError::NotFound)?;
    let can_edit = url.is_owned_by(&account_id);

    render(UrlsShow {
        url,
        account_id: Some(account_id),
        can_edit,
    })
}

/// Fetches a record the signed-in account is allowed to change.
fn owned_record(state: &AppState, short_code: &str, account_id: &str) -> Result<UrlRecord, AppError> {
    let record = state.urls.get(short_code)?.ok_or(AppError::NotFound)?;
    if !record.is_owned_by(account_id) {
        tracing::warn!(%short_code, %account_id, "refusing to modify a record owned by someone else");
        return Err(AppError::Forbidden);
    }
    Ok(record)
}

/// `POST /urls/{short_code}` replaces the long URL
#[instrument(name = "Web: Update URL", skip(state, form))]
pub async fn update_url(
    State(state): State<AppState>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Path(short_code): Path<String>,
    Form(form): Form<LongUrlForm>,
) -> Result<Response, AppError> {
    let mut record = owned_record(&state, &short_code, &account_id)?;
    record.long_url = form.long_url;
    state.urls.put(&short_code, &record)?;
    tracing::info!("short URL updated");

    Ok(found("/urls"))
}

/// `POST /urls/{short_code}/delete`
#[instrument(name = "Web: Delete URL", skip(state))]
pub async fn delete_url(
    State(state): State<AppState>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Path(short_code): Path<String>,
) -> Result<Response, AppError> {
    owned_record(&state, &short_code, &account_id)?;
    state.urls.delete(&short_code)?;
    tracing::info!("short URL deleted");

    Ok(found("/urls"))
}

/// `GET /u/{short_code}` sends the visitor to the long URL
///
/// Unknown codes, records with an empty long URL and long URLs that cannot
/// be sent as a `Location` header all resolve to [`AppError::NotFound`].
pub async fn redirect_url(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Response, AppError> {
    let location = state
        .urls
        .get(&short_code)?
        .map(|record| record.long_url)
        .filter(|long_url| !long_url.is_empty())
        .and_then(|long_url| match HeaderValue::try_from(long_url) {
            Ok(location) => Some(location),
            Err(_) => {
                tracing::warn!(%short_code, "long URL is not a valid Location header");
                None
            }
        })
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// `GET /login`
pub async fn login_page(jar: SignedCookieJar) -> Result<Html<String>, AppError> {
    render(UrlsLogin {
        account_id: session::account_id(&jar),
    })
}

/// `POST /login` signs in the first account matching email and password
#[instrument(name = "Web: Login POST", skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = state.accounts.scan()?;
    let account = auth::find_by_credentials(accounts, form.email, form.password)
        .await?
        .ok_or(AppError::Auth("incorrect email or password"))?;

    tracing::info!(account_id = %account.id, "login succeeded");
    Ok((session::sign_in(jar, &account.id), found("/urls")))
}

/// `POST /logout`
pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    (session::sign_out(jar), found("/urls"))
}

/// `GET /register`
pub async fn register_page(jar: SignedCookieJar) -> Result<Html<String>, AppError> {
    render(UrlsRegister {
        account_id: session::account_id(&jar),
    })
}

/// `POST /register` creates an account and signs it in
///
/// Empty fields and already registered emails are rejected before an
/// account id is allocated.
#[instrument(name = "Web: Register POST", skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    if form.email.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation("email and password must not be empty"));
    }

    if state.accounts.scan()?.iter().any(|account| account.email == form.email) {
        return Err(AppError::Auth("this email is already in use"));
    }

    let password_hash = auth::hash_password_blocking(form.password).await?;
    let id = ids::allocate(|candidate| state.accounts.get(candidate).map(|a| a.is_some()))?;
    let account = Account {
        id,
        email: form.email,
        password_hash,
    };
    state.accounts.put(&account.id, &account)?;

    tracing::info!(account_id = %account.id, "account registered");
    Ok((session::sign_in(jar, &account.id), found("/urls")))
}
