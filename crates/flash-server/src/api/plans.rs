use axum::{Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct PlanItem {
    tier: &'static str,
    price: &'static str,
    features: &'static [&'static str],
}

const PLANS: &[PlanItem] = &[
    PlanItem {
        tier: "Professional",
        price: "N40,000 / month",
        features: &["3 keywords", "10k mentions", "2 users", "Basic KPIs"],
    },
    PlanItem {
        tier: "Agency",
        price: "N80,000 / month",
        features: &[
            "10 keywords",
            "50k mentions",
            "10 users",
            "Advanced KPIs",
            "Alerts",
            "PDF Reports",
        ],
    },
    PlanItem {
        tier: "Enterprise",
        price: "N120,000 / month",
        features: &[
            "Unlimited keywords and mentions",
            "API access",
            "Dedicated support",
            "Custom audits",
        ],
    },
];

pub(super) async fn list_plans(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<&'static [PlanItem]>> {
    Json(ApiResponse {
        data: PLANS,
        meta: ResponseMeta::new(req_id.0),
    })
}
