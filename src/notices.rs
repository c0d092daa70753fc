//! Admin notices
//!
//! Rendering of the operator-facing warning raised when the periodic
//! schema check fails to upload. The host application supplies the sink
//! and decides presentation.

use crate::schema::synchronizer::SchemaCheckOutcome;

/// A rendered operator-facing warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNotice {
    pub heading: String,
    pub body: String,
}

/// Receiver for rendered admin notices
pub trait AdminNoticeSink: Send + Sync {
    fn notify(&self, notice: &AdminNotice);
}

/// Render a notice for a schema check outcome. The gate is purely the
/// literal substring "Error" in the outcome's message, whichever arm the
/// message came from.
pub fn notice_for(outcome: &SchemaCheckOutcome) -> Option<AdminNotice> {
    match outcome.message() {
        Some(message) if message.contains("Error") => Some(AdminNotice {
            heading: "Solr Bridge Error".to_string(),
            body: format!(
                "Error posting schema.xml to the search backend, which will \
                 prevent content from being indexed. You can try submitting \
                 the schema directly from the search admin section. If this \
                 problem persists, open a support ticket with your hosting \
                 provider. ({})",
                message
            ),
        }),
        _ => None,
    }
}

/// Render and deliver a notice, if the outcome warrants one.
pub fn dispatch(outcome: &SchemaCheckOutcome, sink: &dyn AdminNoticeSink) {
    if let Some(notice) = notice_for(outcome) {
        sink.notify(&notice);
    }
}
