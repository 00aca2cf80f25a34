use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::sign_in,
        handlers::user::get_user,
        handlers::draw::draw_winners,
    ),
    components(
        schemas(
            DrawWinnersRequest,
            DrawWinnersResponse,
            Participant,
            SessionUser,
            ApiError,
        )
    ),
    tags(
        (name = "auth", description = "Mock sign-in API"),
        (name = "user", description = "Farcaster user lookup API"),
        (name = "draw", description = "Giveaway draw API"),
    ),
    info(
        title = "Giveaway Backend API",
        version = "1.0.0",
        description = "Farcaster giveaway draw REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
