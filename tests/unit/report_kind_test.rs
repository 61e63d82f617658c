// Report catalogue completeness

use reportdesk::reports::models::ReportKind;
use reportdesk::reports::services::ReportRegistry;
use std::sync::Arc;

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::InMemoryReportRepository;

#[test]
fn test_every_kind_has_a_handler_in_the_standard_table() {
    let registry = ReportRegistry::standard(Arc::new(InMemoryReportRepository::new()), 3)
        .expect("standard table covers every report kind");

    assert_eq!(registry.len(), ReportKind::ALL.len());
    for kind in ReportKind::ALL {
        assert!(registry.resolve(kind.token()).is_ok(), "{} unresolved", kind);
        assert!(
            registry.resolve(&kind.code().to_string()).is_ok(),
            "code {} unresolved",
            kind.code()
        );
    }
}

#[test]
fn test_range_requirement_per_kind() {
    let registry = ReportRegistry::standard(Arc::new(InMemoryReportRepository::new()), 3).unwrap();

    let unranged = [
        ReportKind::WeeklyNewOrders,
        ReportKind::YearOverYear,
        ReportKind::OrderStatuses,
    ];

    for kind in ReportKind::ALL {
        let (_, handler) = registry.resolve(kind.token()).unwrap();
        assert_eq!(
            handler.requires_range(),
            !unranged.contains(&kind),
            "{} range requirement",
            kind
        );
    }
}

#[test]
fn test_titles_and_templates() {
    assert_eq!(ReportKind::YearOverYear.title(), "Year Over Year");
    assert_eq!(ReportKind::OrderServiceTypes.title(), "Service Types");
    assert_eq!(ReportKind::OrderStatuses.template(), "reports.report-order-statuses");
    assert_eq!(
        ReportKind::RegisteredAgentPaymentStatus.template(),
        "reports.registered-agent-payment-status"
    );
}
