//! Route definitions for TinyApp
//!
//! This module configures all HTTP routes and maps them to their respective handlers.

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::database::AppState;
use crate::handler::{
    create_url, delete_url, hello, list_urls, login, login_page, logout, new_url_form, redirect_url,
    register, register_page, root, show_url, update_url, urls_json,
};
use crate::middleware::require_login;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// Public:
/// - `GET /` - Redirects to the listing
/// - `GET /hello` - Static greeting
/// - `GET /urls.json` - Dumps the URL store
/// - `GET /urls`, `POST /urls` - Lists records, creates a record
/// - `GET /u/{short_code}` - Redirects to the long URL
/// - `GET|POST /login`, `POST /logout`, `GET|POST /register` - Accounts
///
/// Behind [`require_login`]:
/// - `GET /urls/new` - Creation form
/// - `GET /urls/{short_code}`, `POST /urls/{short_code}` - Detail page, edit
/// - `POST /urls/{short_code}/delete` - Delete
///
/// # Example Usage
///
/// ```no_run
/// # use axum_extra::extract::cookie::Key;
/// # use tinyapp::database::AppState;
/// # use tinyapp::route::create_app;
/// let state = AppState::in_memory(Key::generate()).unwrap();
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let member_routes = Router::new()
        .route("/urls/new", get(new_url_form))
        .route("/urls/{short_code}", get(show_url).post(update_url))
        .route("/urls/{short_code}/delete", post(delete_url))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login));

    Router::new()
        .route("/", get(root))
        .route("/hello", get(hello))
        .route("/urls.json", get(urls_json))
        .route("/urls", get(list_urls).post(create_url))
        .route("/u/{short_code}", get(redirect_url))
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/register", get(register_page).post(register))
        .merge(member_routes)
        .with_state(state)
}
