//! Route table and OpenAPI document.

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::server::{
    controller::{
        auth, author, book, category, chapter, favorite, health, log, reading_list,
        reading_progress, reading_session, review, search, upload, user,
    },
    middleware::request_log::request_log,
    startup::cors_layer,
    state::AppState,
};

/// Largest accepted upload body; the EPUB and PDF limit plus multipart framing.
const UPLOAD_BODY_LIMIT: usize = 51 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "Libris API", description = "Book reading platform"),
    paths(
        health::health,
        auth::register,
        auth::login,
        auth::refresh_token,
        auth::me,
        auth::forgot_password,
        auth::reset_password,
        auth::change_password,
        user::get_me,
        user::update_me,
        user::get_users,
        user::get_user,
        user::create_user,
        user::update_user,
        user::delete_user,
        author::get_authors,
        author::get_author,
        author::create_author,
        author::update_author,
        author::delete_author,
        category::get_categories,
        category::get_category,
        category::get_category_by_slug,
        category::create_category,
        category::update_category,
        category::delete_category,
        book::get_books,
        book::get_book,
        book::create_book,
        book::update_book,
        book::delete_book,
        chapter::get_book_chapters,
        chapter::get_chapter,
        chapter::create_chapter,
        chapter::update_chapter,
        chapter::delete_chapter,
        review::create_review,
        review::get_book_reviews,
        review::get_book_rating,
        review::get_review,
        review::update_review,
        review::delete_review,
        favorite::get_favorites,
        favorite::add_favorite,
        favorite::remove_favorite,
        favorite::get_favorite_status,
        favorite::toggle_favorite,
        favorite::get_favorite_count,
        reading_list::create_reading_list,
        reading_list::get_my_reading_lists,
        reading_list::get_reading_list,
        reading_list::update_reading_list,
        reading_list::delete_reading_list,
        reading_list::add_reading_list_book,
        reading_list::remove_reading_list_book,
        reading_list::reorder_reading_list,
        reading_progress::get_my_progress,
        reading_progress::get_completed,
        reading_progress::get_currently_reading,
        reading_progress::get_stats,
        reading_progress::upsert_progress,
        reading_progress::get_progress,
        reading_progress::update_progress,
        reading_progress::delete_progress,
        reading_session::start_session,
        reading_session::end_session,
        reading_session::get_my_sessions,
        search::search_books,
        search::search_authors,
        search::search_categories,
        search::search_all,
        upload::upload_cover,
        upload::upload_pdf,
        upload::upload_epub,
        upload::delete_upload,
        log::get_logs,
    ),
    modifiers(&BearerAuth),
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds the complete application router.
///
/// Everything except `/health` lives under `/api/v1`. The OpenAPI document is only
/// served when docs are enabled in configuration.
///
/// # Arguments
/// - `state` - Shared application state, also captured by the request log layer
///
/// # Returns
/// - `Router` - Router with request logging, tracing and CORS applied
pub fn router(state: AppState) -> Router {
    let mut api = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(catalog_routes())
        .merge(reader_routes())
        .merge(search_routes())
        .merge(upload_routes())
        .route("/admin/logs/{kind}", get(log::get_logs));

    if state.config.show_docs {
        api = api.route(
            "/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(from_fn_with_state(state.clone(), request_log))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh-token", post(auth::refresh_token))
        .route("/auth/me", get(auth::me))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/auth/change-password", post(auth::change_password))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(user::get_me).put(user::update_me))
        .route("/users", get(user::get_users).post(user::create_user))
        .route(
            "/users/{user_id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/authors",
            get(author::get_authors).post(author::create_author),
        )
        .route(
            "/authors/{author_id}",
            get(author::get_author)
                .put(author::update_author)
                .delete(author::delete_author),
        )
        .route(
            "/categories",
            get(category::get_categories).post(category::create_category),
        )
        .route(
            "/categories/slug/{slug}",
            get(category::get_category_by_slug),
        )
        .route(
            "/categories/{category_id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route("/books", get(book::get_books).post(book::create_book))
        .route(
            "/books/{book_id}",
            get(book::get_book)
                .put(book::update_book)
                .delete(book::delete_book),
        )
        .route(
            "/books/{book_id}/chapters",
            get(chapter::get_book_chapters).post(chapter::create_chapter),
        )
        .route(
            "/chapters/{chapter_id}",
            get(chapter::get_chapter)
                .put(chapter::update_chapter)
                .delete(chapter::delete_chapter),
        )
        .route(
            "/books/{book_id}/reviews",
            get(review::get_book_reviews).post(review::create_review),
        )
        .route("/books/{book_id}/rating", get(review::get_book_rating))
        .route(
            "/reviews/{review_id}",
            get(review::get_review)
                .put(review::update_review)
                .delete(review::delete_review),
        )
}

fn reader_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(favorite::get_favorites))
        .route(
            "/favorites/{book_id}",
            post(favorite::add_favorite).delete(favorite::remove_favorite),
        )
        .route(
            "/favorites/{book_id}/status",
            get(favorite::get_favorite_status),
        )
        .route(
            "/favorites/{book_id}/toggle",
            post(favorite::toggle_favorite),
        )
        .route(
            "/favorites/{book_id}/count",
            get(favorite::get_favorite_count),
        )
        .route(
            "/reading-lists",
            get(reading_list::get_my_reading_lists).post(reading_list::create_reading_list),
        )
        .route(
            "/reading-lists/{list_id}",
            get(reading_list::get_reading_list)
                .put(reading_list::update_reading_list)
                .delete(reading_list::delete_reading_list),
        )
        .route(
            "/reading-lists/{list_id}/books",
            post(reading_list::add_reading_list_book),
        )
        .route(
            "/reading-lists/{list_id}/books/{book_id}",
            delete(reading_list::remove_reading_list_book),
        )
        .route(
            "/reading-lists/{list_id}/reorder",
            put(reading_list::reorder_reading_list),
        )
        .route(
            "/reading-progress",
            get(reading_progress::get_my_progress).post(reading_progress::upsert_progress),
        )
        .route(
            "/reading-progress/completed",
            get(reading_progress::get_completed),
        )
        .route(
            "/reading-progress/currently-reading",
            get(reading_progress::get_currently_reading),
        )
        .route("/reading-progress/stats", get(reading_progress::get_stats))
        .route(
            "/reading-progress/{book_id}",
            get(reading_progress::get_progress)
                .put(reading_progress::update_progress)
                .delete(reading_progress::delete_progress),
        )
        .route(
            "/reading-sessions",
            get(reading_session::get_my_sessions),
        )
        .route(
            "/reading-sessions/start",
            post(reading_session::start_session),
        )
        .route(
            "/reading-sessions/{session_id}/end",
            put(reading_session::end_session),
        )
}

fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search_all))
        .route("/search/books", get(search::search_books))
        .route("/search/authors", get(search::search_authors))
        .route("/search/categories", get(search::search_categories))
}

fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", delete(upload::delete_upload))
        .route("/upload/cover", post(upload::upload_cover))
        .route("/upload/pdf", post(upload::upload_pdf))
        .route("/upload/epub", post(upload::upload_epub))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
