use serde::{Serialize, Serializer};
use std::fmt;

/// Every report the service can produce.
///
/// The external identifier is either the upper-snake token or the numeric
/// code; both are stable and must not be reused for a different report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
    WeeklyNewOrders,
    YearOverYear,
    SalesRepOrders,
    OrdersPaymentStatus,
    RegisteredAgentByState,
    OrderStatuses,
    RegisteredAgentPaymentStatus,
    OrderServiceTypes,
}

/// Static presentation metadata for one report kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDescriptor {
    pub token: &'static str,
    pub code: u16,
    pub title: &'static str,
    pub template: &'static str,
    /// Key under which the dataset is handed to the template, if it has one
    pub data_key: Option<&'static str>,
}

impl ReportKind {
    pub const ALL: [ReportKind; 8] = [
        ReportKind::WeeklyNewOrders,
        ReportKind::YearOverYear,
        ReportKind::SalesRepOrders,
        ReportKind::OrdersPaymentStatus,
        ReportKind::RegisteredAgentByState,
        ReportKind::OrderStatuses,
        ReportKind::RegisteredAgentPaymentStatus,
        ReportKind::OrderServiceTypes,
    ];

    pub fn descriptor(self) -> &'static ReportDescriptor {
        match self {
            ReportKind::WeeklyNewOrders => &ReportDescriptor {
                token: "WEEKLY_NEW_ORDERS",
                code: 1,
                title: "Weekly New Orders",
                template: "reports.weekly-new-orders",
                data_key: None,
            },
            ReportKind::YearOverYear => &ReportDescriptor {
                token: "YEAR_OVER_YEAR",
                code: 2,
                title: "Year Over Year",
                template: "reports.year-over-year",
                data_key: Some("yearOverYearData"),
            },
            ReportKind::SalesRepOrders => &ReportDescriptor {
                token: "SALES_REP_ORDERS",
                code: 3,
                title: "Sales Rep Orders",
                template: "reports.sales-rep-orders",
                data_key: Some("salesRepOrdersData"),
            },
            ReportKind::OrdersPaymentStatus => &ReportDescriptor {
                token: "ORDERS_PAYMENT_STATUS",
                code: 4,
                title: "Orders Payment Status",
                template: "reports.orders-payment-status",
                data_key: Some("ordersPaymentStatusData"),
            },
            ReportKind::RegisteredAgentByState => &ReportDescriptor {
                token: "REGISTERED_AGENT_BY_STATE",
                code: 5,
                title: "Registered Agent By State",
                template: "reports.registered-agent-by-state",
                data_key: Some("registeredAgentByStateData"),
            },
            ReportKind::OrderStatuses => &ReportDescriptor {
                token: "ORDER_STATUSES",
                code: 6,
                title: "Order Statuses",
                template: "reports.report-order-statuses",
                data_key: None,
            },
            ReportKind::RegisteredAgentPaymentStatus => &ReportDescriptor {
                token: "REGISTERED_AGENT_PAYMENT_STATUS",
                code: 7,
                title: "Registered Agent Payment Status",
                template: "reports.registered-agent-payment-status",
                data_key: Some("registeredAgentPaymentStatusData"),
            },
            ReportKind::OrderServiceTypes => &ReportDescriptor {
                token: "ORDER_SERVICE_TYPES",
                code: 8,
                title: "Service Types",
                template: "reports.report-service-types",
                data_key: Some("orderServiceTypesData"),
            },
        }
    }

    pub fn token(self) -> &'static str {
        self.descriptor().token
    }

    pub fn code(self) -> u16 {
        self.descriptor().code
    }

    pub fn title(self) -> &'static str {
        self.descriptor().title
    }

    pub fn template(self) -> &'static str {
        self.descriptor().template
    }

    /// Parse an external identifier: exact token or numeric code.
    /// Returns `None` for anything else, including tokens in the wrong case.
    pub fn parse(identifier: &str) -> Option<Self> {
        let identifier = identifier.trim();

        if let Ok(code) = identifier.parse::<u16>() {
            // One spelling per code: no sign, no leading zeros
            if code.to_string() != identifier {
                return None;
            }
            return Self::ALL.into_iter().find(|kind| kind.code() == code);
        }

        Self::ALL.into_iter().find(|kind| kind.token() == identifier)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Serialize for ReportKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}
