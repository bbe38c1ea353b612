//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_notifier;
mod in_memory_audit_repository;
mod in_memory_profile_repository;
mod in_memory_tender_repository;
mod postgres_audit_repository;
mod postgres_profile_repository;
mod postgres_tender_repository;
mod smtp_notifier;
mod webhook_notifier;

pub use console_notifier::ConsoleNotifier;
pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_profile_repository::InMemoryProfileRepository;
pub use in_memory_tender_repository::InMemoryTenderRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_profile_repository::PostgresProfileRepository;
pub use postgres_tender_repository::PostgresTenderRepository;
pub use smtp_notifier::{SmtpNotifier, SmtpNotifierConfig};
pub use webhook_notifier::WebhookNotifier;
