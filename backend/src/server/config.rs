//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use org_registry::settings::ServerSettings;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) api_version: String,
    pub(crate) docs_route: String,
}

impl ServerConfig {
    /// Construct a configuration serving API version `1` with docs at `docs`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            api_version: "1".to_owned(),
            docs_route: "docs".to_owned(),
        }
    }

    /// Adopt the version and docs route from loaded settings.
    #[must_use]
    pub fn with_settings(self, settings: &ServerSettings) -> Self {
        self.with_api_version(settings.api_version())
            .with_docs_route(settings.docs_route())
    }

    /// Serve the API under `/api/v{version}`.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Serve Swagger UI under `/api/v{version}/{route}/`.
    #[must_use]
    pub fn with_docs_route(mut self, route: impl Into<String>) -> Self {
        self.docs_route = route.into().trim_matches('/').to_owned();
        self
    }

    /// Prefix shared by every versioned route.
    pub(crate) fn api_prefix(&self) -> String {
        format!("/api/v{}", self.api_version)
    }

    /// Swagger UI mount pattern.
    pub(crate) fn docs_pattern(&self) -> String {
        format!("{}/{}/{{_:.*}}", self.api_prefix(), self.docs_route)
    }

    /// Location of the served OpenAPI document.
    pub(crate) fn openapi_url(&self) -> String {
        format!("{}/{}/openapi.json", self.api_prefix(), self.docs_route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 3000))
    }

    #[rstest]
    fn defaults_mount_docs_under_v1() {
        let config = ServerConfig::new(addr());
        assert_eq!(config.docs_pattern(), "/api/v1/docs/{_:.*}");
        assert_eq!(config.openapi_url(), "/api/v1/docs/openapi.json");
    }

    #[rstest]
    #[case("/swagger/", "/api/v2/swagger/openapi.json")]
    #[case("swagger", "/api/v2/swagger/openapi.json")]
    fn docs_route_is_trimmed(#[case] route: &str, #[case] expected: &str) {
        let config = ServerConfig::new(addr())
            .with_api_version("2")
            .with_docs_route(route);
        assert_eq!(config.openapi_url(), expected);
    }
}
