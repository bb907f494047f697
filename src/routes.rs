use crate::api::attendance;
use crate::error::ApiError;
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::anyhow;

pub type Limiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer-IP limiter for the attendance endpoint; every call drives a portal login.
pub fn attendance_limiter(requests_per_min: u32) -> anyhow::Result<Limiter> {
    let burst = requests_per_min.max(1);
    let per_ms = 60_000 / burst as u64;

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit of {requests_per_min} requests per minute"))
}

pub fn configure(cfg: &mut web::ServiceConfig, limiter: Limiter) {
    // body errors share the {"error": ...} shape
    cfg.app_data(
        web::JsonConfig::default().error_handler(|_, _| ApiError::invalid_request().into()),
    )
    .app_data(
        web::FormConfig::default().error_handler(|_, _| ApiError::invalid_request().into()),
    );

    cfg.service(
        web::scope("/attendance")
            // /attendance
            .service(
                web::resource("")
                    .wrap(Governor::new(&limiter))
                    .route(web::post().to(attendance::get_attendance)),
            )
            // /attendance/options
            .service(
                web::resource("/options").route(web::get().to(attendance::attendance_options)),
            ),
    );
}
