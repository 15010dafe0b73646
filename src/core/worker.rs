use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::completion::{CompletionBackend, CompletionRequest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkerMessage {
    Reply(String),
    Failed(String),
}

pub struct CompletionParams {
    pub backend: Arc<dyn CompletionBackend>,
    pub request: CompletionRequest,
    pub request_id: u64,
}

/// Runs completion calls off the UI task and hands results back over a channel.
///
/// Each call is a single spawned task that sends exactly one message tagged
/// with its request id. The task never sees application state; it works on the
/// transcript snapshot in its params.
#[derive(Clone)]
pub struct CompletionWorker {
    tx: mpsc::UnboundedSender<(WorkerMessage, u64)>,
}

impl CompletionWorker {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(WorkerMessage, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_request(&self, params: CompletionParams) -> tokio::task::JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let CompletionParams {
                backend,
                request,
                request_id,
            } = params;

            debug!(request_id, "completion worker started");
            let message = match backend.complete(request).await {
                Ok(reply) => WorkerMessage::Reply(reply),
                Err(err) => {
                    warn!(request_id, error = %err, "completion failed");
                    WorkerMessage::Failed(err.to_string())
                }
            };

            // The receiver is gone once the window has closed.
            let _ = tx.send((message, request_id));
        })
    }

    #[cfg(test)]
    pub fn send_for_test(&self, message: WorkerMessage, request_id: u64) {
        let _ = self.tx.send((message, request_id));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::completion::CompletionError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend that answers from a script and records every request it saw.
    pub struct ScriptedBackend {
        replies: Mutex<Vec<Result<String, String>>>,
        pub seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedBackend {
        pub fn new(replies: Vec<Result<String, String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
            self.seen.lock().unwrap().push(request);
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(CompletionError::EmptyResponse);
            }
            replies
                .remove(0)
                .map_err(|body| CompletionError::Status { status: 500, body })
        }
    }
}
