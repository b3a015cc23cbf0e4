//! Execution contexts that host the fitting engine.
//!
//! The dispatcher talks to an engine only through encoded messages, so the host
//! is swappable:
//!
//! - [`WorkerThread`]: one long-lived background thread, FIFO, created once
//! - [`InlineExecutor`]: fits synchronously inside `post`, for tests and for
//!   callers that have no use for a second thread

use std::collections::VecDeque;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;

use crate::dispatch::{DispatchError, Message};
use crate::domain::{FitRequest, FitResponse};
use crate::fit::{FitOptions, fit_with_options};

const WORKER_THREAD_NAME: &str = "bezier-fit-worker";

/// Handle to the context that runs fits on behalf of a dispatcher.
pub trait FitExecutor {
    /// Hand one encoded request to the engine. Must not block on the fit itself.
    fn post(&mut self, message: Message) -> Result<(), DispatchError>;

    /// Next response if one is already available.
    fn try_recv(&mut self) -> Option<Message>;

    /// Wait for the next response. `None` means no further response can arrive.
    fn recv(&mut self) -> Option<Message>;
}

/// Decode a request, fit it, and encode the response.
pub fn handle_message(message: &[f64], opts: &FitOptions) -> Result<Message, DispatchError> {
    let request = FitRequest::decode(message)?;
    let fit = fit_with_options(&request.points, opts);
    tracing::trace!(
        id = request.id,
        points = request.points.len(),
        iterations = fit.iterations,
        degenerate = fit.degenerate,
        "fit complete"
    );
    Ok(FitResponse {
        id: request.id,
        control_points: fit.control_points,
    }
    .encode())
}

/// A single persistent background thread running the engine.
///
/// Requests are processed strictly one at a time in arrival order, so responses
/// come back in submission order. Dropping the handle closes the request
/// channel and joins the thread after it finishes the request in hand.
pub struct WorkerThread {
    requests: Option<mpsc::UnboundedSender<Message>>,
    responses: mpsc::UnboundedReceiver<Message>,
    handle: Option<JoinHandle<()>>,
}

impl WorkerThread {
    pub fn spawn(opts: FitOptions) -> Result<Self, DispatchError> {
        let (request_tx, request_rx) = mpsc::unbounded_channel::<Message>();
        let (response_tx, response_rx) = mpsc::unbounded_channel::<Message>();

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker_loop(request_rx, response_tx, opts))?;

        tracing::debug!("started {WORKER_THREAD_NAME}");
        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        })
    }
}

fn worker_loop(
    mut requests: mpsc::UnboundedReceiver<Message>,
    responses: mpsc::UnboundedSender<Message>,
    opts: FitOptions,
) {
    while let Some(message) = requests.blocking_recv() {
        match handle_message(&message, &opts) {
            Ok(response) => {
                if responses.send(response).is_err() {
                    tracing::debug!("response channel closed; stopping {WORKER_THREAD_NAME}");
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "dropping undecodable fit request");
            }
        }
    }
}

impl FitExecutor for WorkerThread {
    fn post(&mut self, message: Message) -> Result<(), DispatchError> {
        let tx = self.requests.as_ref().ok_or(DispatchError::Disconnected)?;
        tx.send(message).map_err(|_| DispatchError::Disconnected)
    }

    fn try_recv(&mut self) -> Option<Message> {
        self.responses.try_recv().ok()
    }

    /// # Panics
    /// Panics if called from inside an async runtime; the wait is a plain
    /// blocking wait on the calling thread.
    fn recv(&mut self) -> Option<Message> {
        self.responses.blocking_recv()
    }
}

impl Drop for WorkerThread {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("{WORKER_THREAD_NAME} panicked");
            }
        }
    }
}

/// Synchronous stand-in: fits during `post` and queues the response.
#[derive(Debug, Default)]
pub struct InlineExecutor {
    opts: FitOptions,
    outbox: VecDeque<Message>,
}

impl InlineExecutor {
    pub fn new(opts: FitOptions) -> Self {
        Self {
            opts,
            outbox: VecDeque::new(),
        }
    }
}

impl FitExecutor for InlineExecutor {
    fn post(&mut self, message: Message) -> Result<(), DispatchError> {
        match handle_message(&message, &self.opts) {
            Ok(response) => self.outbox.push_back(response),
            Err(e) => tracing::warn!(error = %e, "dropping undecodable fit request"),
        }
        Ok(())
    }

    fn try_recv(&mut self) -> Option<Message> {
        self.outbox.pop_front()
    }

    fn recv(&mut self) -> Option<Message> {
        self.outbox.pop_front()
    }
}
