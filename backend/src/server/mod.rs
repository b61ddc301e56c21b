//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa_swagger_ui::SwaggerUi;

use org_registry::Trace;
use org_registry::doc::openapi_for_version;
use org_registry::inbound::http::api_scope;
use org_registry::inbound::http::health::{HealthState, live, ready};
use org_registry::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        config,
    } = deps;

    let docs = SwaggerUi::new(config.docs_pattern()).url(
        config.openapi_url(),
        openapi_for_version(&config.api_version),
    );

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(docs)
        .service(api_scope(&config.api_version))
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server from prepared state and configuration.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener. The health state
/// is marked ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            config: config.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
