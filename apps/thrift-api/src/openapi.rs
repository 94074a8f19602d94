//! OpenAPI documentation configuration

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for the Thrift API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Thrift API",
        version = "0.1.0",
        description = "Secondhand marketplace: listings, categories and accounts",
        license(name = "MIT")
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    nest(
        (path = "/auth", api = domain_users::ApiDoc)
    ),
    modifiers(&CatalogPaths, &BearerAuth)
)]
pub struct ApiDoc;

/// Catalog routes are mounted at the API root, so their document is merged
/// as-is rather than nested under a prefix.
struct CatalogPaths;

impl Modify for CatalogPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_products::ApiDoc::openapi());
    }
}

/// Registers the `bearer_auth` scheme referenced by the write endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                Http::builder()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_contains_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/products",
            "/products/{id}",
            "/categories",
            "/auth/register",
            "/auth/login",
            "/auth/profile",
        ] {
            assert!(
                paths.contains(&expected),
                "missing {} in {:?}",
                expected,
                paths
            );
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_catalog_schemas_are_merged() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.schemas.contains_key("Product"));
        assert!(components.schemas.contains_key("ErrorResponse"));
    }
}
