//! Data transfer objects for web responses.

use serde::Serialize;

use crate::domain::{TicketRecord, TransportMode};
use crate::verify::VerificationResult;

/// Response for ticket verification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    /// Whether the ticket is good to travel
    pub is_valid: bool,

    /// Human-readable verdict
    pub message: String,

    /// The reference code that was checked
    pub reference_code: String,

    /// Transport mode of the located ticket
    pub resolved_type: Option<TransportMode>,

    /// The ticket, present only when valid
    pub record: Option<TicketRecord>,

    /// Broken rules, in evaluation order
    pub violations: Vec<String>,
}

impl VerificationResponse {
    pub fn from_result(result: VerificationResult) -> Self {
        let violations = result.violation_messages();
        Self {
            is_valid: result.is_valid,
            message: result.message.to_string(),
            reference_code: result.reference_code,
            resolved_type: result.resolved_type,
            record: result.record,
            violations,
        }
    }
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
