//! Scripted Gemini transport for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use storyloom_core::MediaBlob;
use storyloom_error::{GeminiError, GeminiErrorKind, HttpError, StoryloomError, StoryloomResult};
use storyloom_models::{
    GeminiTransport, GenerateContentRequest, GenerateContentResponse, PredictLongRunningRequest,
    TransportFactory, VideoOperation,
};

/// A scripted failure.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// A Gemini error with the given kind
    Gemini(GeminiErrorKind),
    /// A plain HTTP failure with a status
    Http { status: u16, message: String },
}

impl MockFailure {
    fn into_error(self) -> StoryloomError {
        match self {
            MockFailure::Gemini(kind) => GeminiError::new(kind).into(),
            MockFailure::Http { status, message } => HttpError::with_status(status, message).into(),
        }
    }
}

type Scripted<T> = Mutex<VecDeque<Result<T, MockFailure>>>;

/// Every call the transport received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    GenerateContent {
        model: String,
        request: GenerateContentRequest,
    },
    StartVideo {
        model: String,
        request: PredictLongRunningRequest,
    },
    PollVideo {
        name: String,
    },
    Download {
        url: String,
    },
}

/// Mock Gemini transport.
///
/// Replies are consumed in order per endpoint. Submitting a video job and
/// polling it share one queue of operations. An exhausted queue fails the
/// call.
#[derive(Default)]
pub struct MockTransport {
    content: Scripted<GenerateContentResponse>,
    operations: Scripted<VideoOperation>,
    downloads: Scripted<MediaBlob>,
    calls: Mutex<Vec<TransportCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `generateContent` response.
    pub fn with_content(self, response: GenerateContentResponse) -> Self {
        self.content.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a `generateContent` failure.
    pub fn with_content_failure(self, failure: MockFailure) -> Self {
        self.content.lock().unwrap().push_back(Err(failure));
        self
    }

    /// Queue an operation state for submit or poll.
    pub fn with_operation(self, operation: VideoOperation) -> Self {
        self.operations.lock().unwrap().push_back(Ok(operation));
        self
    }

    /// Queue a submit or poll failure.
    pub fn with_operation_failure(self, failure: MockFailure) -> Self {
        self.operations.lock().unwrap().push_back(Err(failure));
        self
    }

    /// Queue a download result.
    pub fn with_download(self, blob: MediaBlob) -> Self {
        self.downloads.lock().unwrap().push_back(Ok(blob));
        self
    }

    /// Queue a download failure.
    pub fn with_download_failure(self, failure: MockFailure) -> Self {
        self.downloads.lock().unwrap().push_back(Err(failure));
        self
    }

    /// All calls received so far.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of operation polls received so far.
    pub fn poll_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, TransportCall::PollVideo { .. }))
            .count()
    }

    fn record(&self, call: TransportCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next<T>(queue: &Scripted<T>, endpoint: &str) -> StoryloomResult<T> {
        match queue.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(failure)) => Err(failure.into_error()),
            None => Err(GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                "Mock {} sequence exhausted",
                endpoint
            )))
            .into()),
        }
    }
}

#[async_trait]
impl GeminiTransport for MockTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> StoryloomResult<GenerateContentResponse> {
        self.record(TransportCall::GenerateContent {
            model: model.to_string(),
            request: request.clone(),
        });
        Self::next(&self.content, "generateContent")
    }

    async fn start_video_generation(
        &self,
        model: &str,
        request: &PredictLongRunningRequest,
    ) -> StoryloomResult<VideoOperation> {
        self.record(TransportCall::StartVideo {
            model: model.to_string(),
            request: request.clone(),
        });
        Self::next(&self.operations, "predictLongRunning")
    }

    async fn poll_video_operation(&self, operation_name: &str) -> StoryloomResult<VideoOperation> {
        self.record(TransportCall::PollVideo {
            name: operation_name.to_string(),
        });
        Self::next(&self.operations, "operation poll")
    }

    async fn download(&self, url: &str) -> StoryloomResult<MediaBlob> {
        self.record(TransportCall::Download {
            url: url.to_string(),
        });
        Self::next(&self.downloads, "download")
    }
}

/// Factory handing out one shared [`MockTransport`] and recording the keys
/// it was asked to connect with.
pub struct MockTransportFactory {
    transport: Arc<MockTransport>,
    connects: Mutex<Vec<String>>,
}

impl MockTransportFactory {
    pub fn new(transport: MockTransport) -> Self {
        Self {
            transport: Arc::new(transport),
            connects: Mutex::new(Vec::new()),
        }
    }

    /// The shared transport.
    pub fn transport(&self) -> &MockTransport {
        &self.transport
    }

    /// API keys passed to `connect`, in order.
    pub fn connected_keys(&self) -> Vec<String> {
        self.connects.lock().unwrap().clone()
    }

    /// Number of `connect` calls.
    pub fn connect_count(&self) -> usize {
        self.connects.lock().unwrap().len()
    }
}

impl TransportFactory for MockTransportFactory {
    fn connect(&self, api_key: &str) -> StoryloomResult<Arc<dyn GeminiTransport>> {
        self.connects.lock().unwrap().push(api_key.to_string());
        Ok(self.transport.clone())
    }
}
