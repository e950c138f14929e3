use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::endpoints::{feed, github, health, live_feed};

pub const OPENAPI_PATH: &str = "/openapi/v1.json";
pub const DOCS_PATH: &str = "/docs";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "C# LDM table feed",
        description = "Meeting notes recorded from GitHub push webhooks"
    ),
    paths(feed::index::handler, github::index::handler, health::index::handler),
    tags(
        (name = "Feed", description = "Stored meeting notes"),
        (name = "Webhooks", description = "GitHub webhook deliveries"),
        (name = "System", description = "Health checks")
    )
)]
pub struct TableFeedApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "C# LDM live feed",
        description = "RSS feed built from the csharplang repository on every request"
    ),
    paths(live_feed::index::handler, health::index::handler),
    tags(
        (name = "Feed", description = "RSS 2.0 feed"),
        (name = "System", description = "Health checks")
    )
)]
pub struct LiveFeedApiDoc;

/// Swagger UI at `/docs`, reading the document served at `/openapi/v1.json`.
pub fn api_docs<A: OpenApi>() -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, A::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_feed_document_lists_routes() {
        let doc = TableFeedApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["/feed", "/github", "/health"]);
    }

    #[test]
    fn test_live_feed_document_lists_routes() {
        let doc = LiveFeedApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["/feed", "/health"]);
    }
}
