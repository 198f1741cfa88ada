use std::sync::Arc;

use aeris_domain::audit::AuditRecord;

use crate::repository::AuditSink;

/// Writes one audit record per booking attempt. A sink failure is logged and
/// swallowed: audit problems must never roll back an outcome already decided
/// and communicated to the caller.
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
}

impl AuditRecorder {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    pub async fn record(&self, record: AuditRecord) {
        if let Err(e) = self.sink.append(&record).await {
            tracing::error!(
                flight_id = %record.flight_id,
                outcome = %record.outcome,
                "failed to append audit record: {}",
                e
            );
        }
    }
}
