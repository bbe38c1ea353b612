//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_ports;
mod authorization_service;
mod decision_log_service;
mod tender_ports;
mod tender_service;

#[cfg(test)]
mod test_support;

pub use audit_ports::{AuditAction, AuditEvent, AuditRepository};
pub use authorization_ports::{ProfileRepository, SessionProvider};
pub use authorization_service::Authorizer;
pub use decision_log_service::DecisionLogService;
pub use tender_ports::{
    ChecklistOutcome, CommittedTransition, DecisionLogRepository, NotificationEvent, Notifier,
    TENDER_LIST_LIMIT_MAX, TenderListQuery, TenderRepository, TransitionOutcome,
    TransitionTenderInput,
};
pub use tender_service::TenderService;
