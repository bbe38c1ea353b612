use bouwdesk_domain::{Decision, TenderStatus};

use super::*;

impl TenderService {
    /// Publishes one event in the background.
    ///
    /// The commit has already happened, so delivery never delays the caller
    /// and failures are only logged.
    pub(super) fn dispatch_notification(&self, event: NotificationEvent, payload: Value) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(error) = notifier.notify(event, payload).await {
                warn!(%error, event = event.as_str(), "tender notification failed");
            }
        });
    }
}

pub(super) fn status_payload(tender: &Tender, from: TenderStatus, actor: &Profile) -> Value {
    json!({
        "tender_id": tender.id().to_string(),
        "title": tender.details().title,
        "buyer": tender.details().buyer,
        "from": from.as_str(),
        "to": tender.status().as_str(),
        "changed_by": actor.display_name(),
        "changed_at": tender.updated_at(),
    })
}

pub(super) fn decision_payload(tender: &Tender, from: TenderStatus, decision: &Decision) -> Value {
    json!({
        "tender_id": tender.id().to_string(),
        "title": tender.details().title,
        "buyer": tender.details().buyer,
        "from": from.as_str(),
        "to": tender.status().as_str(),
        "decision": {
            "id": decision.id().to_string(),
            "type": decision.decision_type().as_str(),
            "reason": decision.reason(),
            "decided_by": decision.decided_by().display_name,
            "decided_at": decision.decided_at(),
            "summary": decision.summary(),
        },
    })
}
