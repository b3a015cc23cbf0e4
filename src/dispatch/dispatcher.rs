//! Request dispatcher: correlates fit requests with their responses.
//!
//! The dispatcher lives on the caller's thread. It owns the id counter and the
//! table of pending completion handlers; the executor it was built with does the
//! actual fitting somewhere else. Handlers only ever run inside [`Dispatcher::poll`],
//! [`Dispatcher::run_until_idle`] or [`Dispatcher::fit_blocking`], i.e. on the
//! caller's thread, so the table needs no locking.
//!
//! Known limitation: if the executor dies or stalls, its pending handlers are
//! never invoked and stay in the table for the dispatcher's lifetime.

use std::collections::HashMap;

use tokio::sync::oneshot;

use crate::dispatch::{FitExecutor, Message, encode_request};
use crate::domain::{ControlPoints, FitResponse, Point, RequestId};

type Handler = Box<dyn FnOnce(ControlPoints)>;

pub struct Dispatcher<E: FitExecutor> {
    executor: E,
    next_id: RequestId,
    pending: HashMap<RequestId, Handler>,
}

impl<E: FitExecutor> Dispatcher<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            next_id: 0,
            pending: HashMap::new(),
        }
    }

    /// Queue a fit and register `on_result` for its answer.
    ///
    /// Returns immediately with the request id. `on_result` runs exactly once,
    /// later, when the matching response is delivered. Responses are delivered in
    /// submission order; superseding an older request is up to the caller (compare
    /// the returned ids).
    pub fn submit<F>(&mut self, points: &[Point], on_result: F) -> RequestId
    where
        F: FnOnce(ControlPoints) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(id, Box::new(on_result));

        if let Err(e) = self.executor.post(encode_request(id, points)) {
            tracing::warn!(id, error = %e, "fit request not delivered; it stays pending");
        } else {
            tracing::debug!(id, points = points.len(), "submitted fit request");
        }
        id
    }

    /// Deliver every response that is already available. Never blocks.
    ///
    /// Returns the number of handlers invoked.
    pub fn poll(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(message) = self.executor.try_recv() {
            if self.deliver(message) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Block until no request is pending or the executor can send nothing more.
    ///
    /// Returns the number of handlers invoked. There is no timeout: a stalled
    /// executor blocks this call.
    pub fn run_until_idle(&mut self) -> usize {
        let mut delivered = 0;
        while !self.pending.is_empty() {
            match self.executor.recv() {
                Some(message) => {
                    if self.deliver(message) {
                        delivered += 1;
                    }
                }
                None => {
                    tracing::warn!(
                        stranded = self.pending.len(),
                        "fit executor closed with requests still pending"
                    );
                    break;
                }
            }
        }
        delivered
    }

    /// Submit `points` and wait for their control points.
    ///
    /// Responses for earlier submissions that arrive first are delivered to their
    /// own handlers on the way. Returns `None` if the executor goes away first.
    pub fn fit_blocking(&mut self, points: &[Point]) -> Option<ControlPoints> {
        let (tx, mut rx) = oneshot::channel();
        let id = self.submit(points, move |control_points| {
            let _ = tx.send(control_points);
        });

        loop {
            match rx.try_recv() {
                Ok(control_points) => return Some(control_points),
                Err(oneshot::error::TryRecvError::Closed) => return None,
                Err(oneshot::error::TryRecvError::Empty) => {}
            }

            let Some(message) = self.executor.recv() else {
                tracing::warn!(id, "fit executor closed before answering");
                return None;
            };
            self.deliver(message);
        }
    }

    /// Number of requests still waiting for a response.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Id the next `submit` will use.
    pub fn next_id(&self) -> RequestId {
        self.next_id
    }

    #[cfg(test)]
    fn executor(&self) -> &E {
        &self.executor
    }

    #[cfg(test)]
    fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Route one response to its handler. Unknown ids and malformed messages
    /// are dropped.
    fn deliver(&mut self, message: Message) -> bool {
        let response = match FitResponse::decode(&message) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "discarding malformed fit response");
                return false;
            }
        };

        let Some(handler) = self.pending.remove(&response.id) else {
            tracing::debug!(id = response.id, "discarding response with no pending request");
            return false;
        };

        tracing::trace!(id = response.id, "delivering fit result");
        handler(response.control_points);
        true
    }
}

/// Fit `points` and hand the control points to `callback` once they arrive.
///
/// Consumer-facing entry point; the callback runs during a later
/// [`Dispatcher::poll`] or [`Dispatcher::run_until_idle`].
pub fn fit_bezier_curve<E, F>(dispatcher: &mut Dispatcher<E>, points: &[Point], callback: F)
where
    E: FitExecutor,
    F: FnOnce(ControlPoints) + 'static,
{
    dispatcher.submit(points, callback);
}
