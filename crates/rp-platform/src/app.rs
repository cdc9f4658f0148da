//! Application assembly
//!
//! Builds the full axum router from configuration and shared services.
//! Rate limiting covers the role and status APIs only.

use axum::{http::HeaderValue, middleware, Router};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use rp_config::{AppConfig, HttpConfig};

use crate::feature::{FeatureFlags, InMemoryFeatureFlags};
use crate::role::{roles_router, ExpirationPeriod, RoleStore, RolesState};
use crate::shared::clock::Clock;
use crate::shared::error::{PlatformError, Result};
use crate::shared::health_api::{health_router, healthz_router, HealthState};
use crate::shared::rate_limit::{rate_limit, RateLimitState};
use crate::shared::status_api::{status_router, StatusState};

/// Long-lived services shared by every handler
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<RoleStore>,
    pub flags: Arc<dyn FeatureFlags>,
}

impl AppServices {
    pub fn new(store: Arc<RoleStore>, flags: Arc<dyn FeatureFlags>) -> Self {
        Self { store, flags }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = RoleStore::new(expiration_from_config(config)?);
        let flags = InMemoryFeatureFlags::from_config(&config.features);
        Ok(Self::new(Arc::new(store), Arc::new(flags)))
    }

    /// Like [`from_config`](Self::from_config) with a caller-supplied clock
    pub fn from_config_with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let store = RoleStore::with_clock(expiration_from_config(config)?, clock);
        let flags = InMemoryFeatureFlags::from_config(&config.features);
        Ok(Self::new(Arc::new(store), Arc::new(flags)))
    }
}

fn expiration_from_config(config: &AppConfig) -> Result<ExpirationPeriod> {
    let months = config.roles.expiration_period_months;
    ExpirationPeriod::from_months(months).ok_or_else(|| {
        PlatformError::configuration(format!("expiration period must be positive, got {} months", months))
    })
}

fn cors_layer(http: &HttpConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if http.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = http
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Build the complete HTTP application
pub fn build_app(config: &AppConfig, services: &AppServices, health: HealthState) -> Router {
    let roles_state = RolesState {
        store: services.store.clone(),
        flags: services.flags.clone(),
    };
    let status_state = StatusState {
        store: services.store.clone(),
        flags: services.flags.clone(),
    };

    let mut api = OpenApiRouter::new()
        .merge(roles_router(roles_state))
        .merge(status_router(status_state));

    // Probes and docs are merged after the limiter so they never see 429.
    if config.rate_limit.enabled {
        if let Some(limiter) = RateLimitState::per_minute(config.rate_limit.requests_per_minute) {
            api = api.layer(middleware::from_fn_with_state(limiter, rate_limit));
        }
    }

    let (router, mut openapi) = OpenApiRouter::new()
        .merge(api)
        .merge(healthz_router())
        .split_for_parts();

    openapi.info.title = "Roleboard API".to_string();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi.info.description = Some("Job role postings with expiration and approval".to_string());

    Router::new()
        .merge(router)
        .nest("/health", health_router(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", openapi))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.http))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_from_default_config() {
        let services = AppServices::from_config(&AppConfig::default()).unwrap();
        assert_eq!(services.store.expiration().months(), 3);
        assert!(services.flags.is_enabled(crate::feature::names::ENABLE_ROLE_POSTING));
    }

    #[test]
    fn test_zero_expiration_is_a_configuration_error() {
        let mut config = AppConfig::default();
        config.roles.expiration_period_months = 0;
        assert!(matches!(
            AppServices::from_config(&config),
            Err(PlatformError::Configuration { .. })
        ));
    }
}
