//! Request/response shapes shared across route modules.

use serde::{Deserialize, Serialize};

/// Query string carrying the month key, e.g. `?mes=2024-05`.
#[derive(Deserialize)]
pub struct MonthQuery {
    pub mes: String,
}

/// Fixed-status acknowledgement body, e.g. `{"status":"ok"}`.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub const OK: StatusResponse = StatusResponse { status: "ok" };
    pub const CLOSED: StatusResponse = StatusResponse { status: "fechado" };
    pub const REOPENED: StatusResponse = StatusResponse { status: "reaberto" };
}
