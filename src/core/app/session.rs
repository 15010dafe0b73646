use std::sync::Arc;

use crate::core::completion::CompletionBackend;

/// Everything needed to talk to the completion API for this window.
pub struct SessionContext {
    pub backend: Arc<dyn CompletionBackend>,
    pub model: String,
    pub assistant_name: String,
    next_request_id: u64,
    pending_request: Option<u64>,
}

impl SessionContext {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        model: impl Into<String>,
        assistant_name: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            model: model.into(),
            assistant_name: assistant_name.into(),
            next_request_id: 1,
            pending_request: None,
        }
    }

    pub(crate) fn begin_request(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_request = Some(id);
        id
    }

    pub fn is_current_request(&self, request_id: u64) -> bool {
        self.pending_request == Some(request_id)
    }

    pub fn pending_request(&self) -> Option<u64> {
        self.pending_request
    }

    pub(crate) fn finish_request(&mut self) {
        self.pending_request = None;
    }
}
