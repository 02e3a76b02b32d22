//! OpenAPI documentation and the administrative console

use axum::{response::Redirect, routing::get, Router};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "Library book catalog REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        auth::me,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookPayload,
            crate::models::principal::Principal,
            crate::models::principal::Role,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BasicAuthScheme),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

struct BasicAuthScheme;

impl Modify for BasicAuthScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

/// Console router: interactive API console under `{console}/ui` and the
/// document itself at `{console}/openapi.json`
pub fn create_console_router(console_path: &str) -> Router {
    let ui_path = format!("{}/ui", console_path);
    let landing = format!("{}/", ui_path);

    Router::new()
        .route(
            console_path,
            get(move || async move { Redirect::temporary(&landing) }),
        )
        .merge(
            SwaggerUi::new(ui_path)
                .url(format!("{}/openapi.json", console_path), ApiDoc::openapi()),
        )
}
