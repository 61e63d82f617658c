use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::{Clock, Result};
use crate::modules::identity::CurrentUser;
use crate::modules::reports::models::ReportOverview;
use crate::modules::reports::services::{OverviewService, Renderer, ReportDispatcher};

/// Shared, read-only state behind the report routes
pub struct ReportsState {
    pub dispatcher: ReportDispatcher,
    pub overview: OverviewService,
    pub renderer: Arc<dyn Renderer>,
    pub clock: Arc<dyn Clock>,
}

/// GET /reports
///
/// Landing page with opened-order counts. Same gate as the detail pages.
pub async fn report_index(
    state: web::Data<ReportsState>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    state.dispatcher.gate().enforce(&user)?;

    let overview = state.overview.overview(state.clock.today()).await?;
    state
        .renderer
        .render(ReportOverview::TEMPLATE, overview.into_context()?)
}

/// GET|POST /reports/{report_id}
///
/// `report_id` is a report token (`YEAR_OVER_YEAR`) or its numeric code.
/// Unknown ids and non-admin principals both get 404.
pub async fn report_details(
    state: web::Data<ReportsState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let report_id = path.into_inner();

    let result = state
        .dispatcher
        .dispatch(&report_id, &user, state.clock.today())
        .await?;

    let template = result.template;
    state.renderer.render(template, result.into_context()?)
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("", web::get().to(report_index))
            .route("/{report_id}", web::get().to(report_details))
            .route("/{report_id}", web::post().to(report_details)),
    );
}
