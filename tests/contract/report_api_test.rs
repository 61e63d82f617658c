// Contract tests for the /reports HTTP surface
//
// Full middleware + controller stack over in-memory collaborators, with the
// clock pinned to 2024-03-20.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, web, App};
use serde_json::Value;
use std::sync::Arc;

use helpers::*;
use reportdesk::core::FixedClock;
use reportdesk::middleware::PrincipalAuth;
use reportdesk::reports::controllers::{configure, ReportsState};
use reportdesk::reports::services::{
    AccessGate, DateRangePolicy, JsonRenderer, OverviewService, ReportDispatcher, ReportRegistry,
};

fn state(repo: Arc<InMemoryReportRepository>) -> web::Data<ReportsState> {
    let registry = ReportRegistry::standard(repo.clone(), 3).expect("complete registry");

    web::Data::new(ReportsState {
        dispatcher: ReportDispatcher::new(
            Arc::new(registry),
            AccessGate::admin_only(),
            DateRangePolicy::default(),
        ),
        overview: OverviewService::new(repo),
        renderer: Arc::new(JsonRenderer),
        clock: Arc::new(FixedClock(date(2024, 3, 20))),
    })
}

macro_rules! report_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(state($repo))
                .wrap(PrincipalAuth::new(Arc::new(StaticIdentityProvider)))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_admin_gets_report_template_and_context() {
    let app = report_app!(Arc::new(InMemoryReportRepository::new()));

    let req = test::TestRequest::get()
        .uri("/reports/ORDER_SERVICE_TYPES")
        .insert_header(("X-API-Key", ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["template"], "reports.report-service-types");
    assert_eq!(body["context"]["title"], "Service Types");
    assert_eq!(body["context"]["startDate"], "2024-03-01");
    assert_eq!(body["context"]["finishDate"], "2024-03-20");
}

#[actix_web::test]
async fn test_numeric_code_and_post_reach_same_report() {
    let app = report_app!(Arc::new(InMemoryReportRepository::new()));

    let by_token = test::TestRequest::get()
        .uri("/reports/YEAR_OVER_YEAR")
        .insert_header(("X-API-Key", ADMIN_KEY))
        .to_request();
    let by_token: Value = test::call_and_read_body_json(&app, by_token).await;

    let by_code = test::TestRequest::post()
        .uri(&format!("/reports/{}", 2))
        .insert_header(("X-API-Key", ADMIN_KEY))
        .to_request();
    let by_code: Value = test::call_and_read_body_json(&app, by_code).await;

    assert_eq!(by_token["template"], "reports.year-over-year");
    assert_eq!(by_token, by_code);
    assert!(by_token["context"]["years"].is_array());
}

#[actix_web::test]
async fn test_non_admin_and_unknown_id_are_indistinguishable() {
    let repo = Arc::new(InMemoryReportRepository::new());
    let app = report_app!(repo.clone());

    let hidden = test::TestRequest::get()
        .uri("/reports/SALES_REP_ORDERS")
        .insert_header(("X-API-Key", STAFF_KEY))
        .to_request();
    let hidden = test::call_service(&app, hidden).await;
    assert_eq!(hidden.status(), 404);
    let hidden_body = test::read_body(hidden).await;

    let unknown = test::TestRequest::get()
        .uri("/reports/NO_SUCH_REPORT")
        .insert_header(("X-API-Key", ADMIN_KEY))
        .to_request();
    let unknown = test::call_service(&app, unknown).await;
    assert_eq!(unknown.status(), 404);
    let unknown_body = test::read_body(unknown).await;

    assert_eq!(hidden_body, unknown_body);
    assert!(repo.calls().is_empty());
}

#[actix_web::test]
async fn test_missing_or_invalid_key_is_unauthorized() {
    let app = report_app!(Arc::new(InMemoryReportRepository::new()));

    let req = test::TestRequest::get().uri("/reports/1").to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), 401);

    let req = test::TestRequest::get()
        .uri("/reports/1")
        .insert_header(("X-API-Key", "key-admin.wrong"))
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), 401);
}

#[actix_web::test]
async fn test_overview_counts_opened_orders() {
    let repo = Arc::new(InMemoryReportRepository::new().with_opened_orders(7));
    let app = report_app!(repo.clone());

    let req = test::TestRequest::get()
        .uri("/reports")
        .insert_header(("X-API-Key", ADMIN_KEY))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["template"], "reports.main-report");
    assert_eq!(body["context"]["title"], "Reports");
    assert_eq!(body["context"]["ordersOpenedThisWeek"], 7);
    assert_eq!(body["context"]["ordersOpenedThisMonth"], 7);
    assert_eq!(body["context"]["ordersOpenedThisYear"], 7);

    assert_eq!(
        repo.calls(),
        vec![
            "opened_orders(2024-03-18)",
            "opened_orders(2024-03-01)",
            "opened_orders(2024-01-01)",
        ]
    );
}

#[actix_web::test]
async fn test_overview_is_hidden_from_non_admin() {
    let app = report_app!(Arc::new(InMemoryReportRepository::new()));

    let req = test::TestRequest::get()
        .uri("/reports")
        .insert_header(("X-API-Key", STAFF_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_data_source_failure_is_server_error() {
    let app = report_app!(Arc::new(InMemoryReportRepository::failing("timeout")));

    let req = test::TestRequest::get()
        .uri("/reports/REGISTERED_AGENT_BY_STATE")
        .insert_header(("X-API-Key", ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
}
