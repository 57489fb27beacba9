//! Verification verdicts.

use crate::domain::{ReferenceCode, TicketRecord, TransportMode};

use super::rules::{Validation, Violation};

pub const MSG_VALID: &str = "Ticket is valid and ready for travel";
pub const MSG_INVALID: &str = "Ticket validation failed";
pub const MSG_NOT_FOUND: &str = "Ticket not found";
pub const MSG_SYSTEM_ERROR: &str = "Verification failed due to system error";
pub const MSG_CONFLICT: &str = "Ticket reference matches more than one ticket";

/// The structured answer to "is this ticket good to travel?".
///
/// `record` is only echoed back for valid tickets; an invalid ticket is
/// reported through its violations instead.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub message: &'static str,
    pub reference_code: String,
    pub resolved_type: Option<TransportMode>,
    pub record: Option<TicketRecord>,
    pub violations: Vec<Violation>,
}

impl VerificationResult {
    fn rejected(code: &ReferenceCode, message: &'static str) -> Self {
        Self {
            is_valid: false,
            message,
            reference_code: code.to_string(),
            resolved_type: None,
            record: None,
            violations: Vec::new(),
        }
    }

    /// No source holds the ticket.
    pub fn not_found(code: &ReferenceCode) -> Self {
        Self::rejected(code, MSG_NOT_FOUND)
    }

    /// A source could not be queried, so absence cannot be confirmed.
    pub fn system_error(code: &ReferenceCode) -> Self {
        Self::rejected(code, MSG_SYSTEM_ERROR)
    }

    /// Several sources hold a ticket with this reference.
    pub fn conflict(code: &ReferenceCode) -> Self {
        Self::rejected(code, MSG_CONFLICT)
    }

    /// A located ticket, judged by the validation rules.
    pub fn validated(
        code: &ReferenceCode,
        mode: TransportMode,
        record: TicketRecord,
        validation: Validation,
    ) -> Self {
        let is_valid = validation.is_valid();
        Self {
            is_valid,
            message: if is_valid { MSG_VALID } else { MSG_INVALID },
            reference_code: code.to_string(),
            resolved_type: Some(mode),
            record: is_valid.then_some(record),
            violations: validation.violations,
        }
    }

    /// Violation messages in rule order.
    pub fn violation_messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;

    fn code() -> ReferenceCode {
        ReferenceCode::parse("PNR7").unwrap()
    }

    #[test]
    fn valid_ticket_is_echoed() {
        let result = VerificationResult::validated(
            &code(),
            TransportMode::Bus,
            fixtures::bus("PNR7"),
            Validation::default(),
        );
        assert!(result.is_valid);
        assert_eq!(result.message, MSG_VALID);
        assert_eq!(result.resolved_type, Some(TransportMode::Bus));
        assert!(result.record.is_some());
        assert!(result.violations.is_empty());
    }

    #[test]
    fn invalid_ticket_is_not_echoed() {
        let result = VerificationResult::validated(
            &code(),
            TransportMode::Train,
            fixtures::train("PNR7"),
            Validation {
                violations: vec![Violation::InvalidPrice],
            },
        );
        assert!(!result.is_valid);
        assert_eq!(result.message, MSG_INVALID);
        assert_eq!(result.resolved_type, Some(TransportMode::Train));
        assert!(result.record.is_none());
        assert_eq!(result.violation_messages(), vec!["Valid ticket price is required"]);
    }

    #[test]
    fn rejections_carry_no_type() {
        for (result, message) in [
            (VerificationResult::not_found(&code()), MSG_NOT_FOUND),
            (VerificationResult::system_error(&code()), MSG_SYSTEM_ERROR),
            (VerificationResult::conflict(&code()), MSG_CONFLICT),
        ] {
            assert!(!result.is_valid);
            assert_eq!(result.message, message);
            assert_eq!(result.reference_code, "PNR7");
            assert_eq!(result.resolved_type, None);
            assert!(result.record.is_none());
        }
    }
}
