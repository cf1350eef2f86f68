//! Submission coordinator: one reconcile-and-submit cycle at a time
//!
//! A cycle is split in three so the cart stays editable while the request
//! is on the wire:
//!
//! 1. [`prepare`](SubmissionCoordinator::prepare) snapshots the cart and
//!    computes the diff (synchronous)
//! 2. [`send`](SubmissionCoordinator::send) calls the boundary once (async,
//!    borrows no cart)
//! 3. [`complete`](SubmissionCoordinator::complete) applies the result
//!
//! [`submit`](SubmissionCoordinator::submit) runs all three back to back.

use super::boundary::{Ack, OrderMutationBoundary};
use super::generation::GenerationClock;
use crate::cart::{Cart, CartState};
use crate::error::{OrderError, Result, SubmissionError};
use crate::reconcile::{reconcile, InstructionStats, MutationInstruction, PersistedOrderItem};
use crate::storage::CartStorage;
use crate::OrderId;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A diff captured from a cart snapshot, ready to send
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    generation: u64,
    /// Correlates log lines of one submission
    pub request_id: Uuid,
    pub order_id: OrderId,
    snapshot: CartState,
    revision: u64,
    pub instructions: Vec<MutationInstruction>,
}

impl PreparedSubmission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cart contents the instructions were computed from
    pub fn snapshot(&self) -> &CartState {
        &self.snapshot
    }

    pub fn stats(&self) -> InstructionStats {
        InstructionStats::from_instructions(&self.instructions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Cart already matches the persisted order; nothing was sent
    NoChanges,
    /// Server accepted the changes; the submitted lines left the cart
    Committed(Ack),
    /// The request was cancelled or replaced before its result arrived;
    /// the result was ignored
    Superseded,
}

/// Drives submissions with a single-flight guard.
///
/// `prepare`, `complete` and `cancel` work with any `B`, so a host that
/// performs the transport itself can drive the cycle by hand;
/// `send` and `submit` need `B: OrderMutationBoundary`.
pub struct SubmissionCoordinator<B> {
    boundary: B,
    generations: GenerationClock,
    /// Generation of the outstanding request, 0 when idle
    in_flight: AtomicU64,
}

impl<B> SubmissionCoordinator<B> {
    pub fn new(boundary: B) -> Self {
        Self {
            boundary,
            generations: GenerationClock::new(),
            in_flight: AtomicU64::new(0),
        }
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) != 0
    }

    /// Snapshot `cart` and diff it against `persisted`.
    ///
    /// Returns `None` when there is nothing to send; no state changes in
    /// that case. Fails with [`OrderError::SubmissionInFlight`] while
    /// another submission is outstanding.
    pub fn prepare<S: CartStorage>(
        &self,
        cart: &Cart<S>,
        order_id: OrderId,
        persisted: &[PersistedOrderItem],
    ) -> Result<Option<PreparedSubmission>> {
        if self.is_in_flight() {
            return Err(OrderError::SubmissionInFlight);
        }

        let snapshot = cart.state().clone();
        let instructions = reconcile(&snapshot.configured_items(), persisted);
        if instructions.is_empty() {
            debug!(order_id, "cart matches persisted order, nothing to submit");
            return Ok(None);
        }

        let generation = self.generations.next();
        self.in_flight.store(generation, Ordering::SeqCst);

        let prepared = PreparedSubmission {
            generation,
            request_id: Uuid::new_v4(),
            order_id,
            snapshot,
            revision: cart.revision(),
            instructions,
        };

        info!(
            request_id = %prepared.request_id,
            order_id,
            generation,
            changes = %prepared.stats(),
            "submitting order changes"
        );
        Ok(Some(prepared))
    }

    /// Apply the boundary's result.
    ///
    /// Success removes the snapshot's lines from `cart`. Failure leaves the
    /// cart untouched and returns the boundary error unchanged. A result
    /// for a generation that is no longer in flight is dropped.
    pub fn complete<S: CartStorage>(
        &self,
        prepared: PreparedSubmission,
        result: std::result::Result<Ack, SubmissionError>,
        cart: &mut Cart<S>,
    ) -> Result<SubmitOutcome> {
        if !self.claim(&prepared) {
            return Ok(SubmitOutcome::Superseded);
        }

        match result {
            Ok(ack) => {
                cart.settle_submitted(&prepared.snapshot, prepared.revision);
                info!(
                    request_id = %prepared.request_id,
                    order_id = ack.order_id,
                    items = ack.items.len(),
                    "order changes committed"
                );
                Ok(SubmitOutcome::Committed(ack))
            }
            Err(err) => {
                warn!(request_id = %prepared.request_id, error = %err, "order submission failed");
                Err(err.into())
            }
        }
    }

    /// Apply a success response whose body could not be read.
    ///
    /// The server committed the changes, so the cart settles and the flight
    /// ends exactly as on success; `error` is then returned so the host can
    /// refetch the order. A superseded result is dropped as in `complete`.
    pub fn complete_without_ack<S: CartStorage>(
        &self,
        prepared: PreparedSubmission,
        error: OrderError,
        cart: &mut Cart<S>,
    ) -> Result<SubmitOutcome> {
        if !self.claim(&prepared) {
            return Ok(SubmitOutcome::Superseded);
        }

        cart.settle_submitted(&prepared.snapshot, prepared.revision);
        warn!(
            request_id = %prepared.request_id,
            order_id = prepared.order_id,
            error = %error,
            "order changes committed but response was unreadable"
        );
        Err(error)
    }

    /// End the flight if `prepared` still owns it
    fn claim(&self, prepared: &PreparedSubmission) -> bool {
        let claimed = self
            .in_flight
            .compare_exchange(prepared.generation, 0, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if !claimed {
            warn!(
                request_id = %prepared.request_id,
                generation = prepared.generation,
                "ignoring result of superseded submission"
            );
        }
        claimed
    }

    /// Abandon the outstanding submission, if any. Its result will be
    /// ignored. Returns whether something was cancelled.
    pub fn cancel(&self) -> bool {
        let generation = self.in_flight.swap(0, Ordering::SeqCst);
        if generation != 0 {
            info!(generation, "submission cancelled");
        }
        generation != 0
    }
}

/// Transport-driven half of the cycle
impl<B: OrderMutationBoundary> SubmissionCoordinator<B> {
    /// Call the boundary once. No retries.
    pub async fn send(&self, prepared: &PreparedSubmission) -> std::result::Result<Ack, SubmissionError> {
        self.boundary
            .manage_order_items(prepared.order_id, &prepared.instructions)
            .await
    }

    /// Run a full cycle: prepare, send, complete
    pub async fn submit<S: CartStorage>(
        &self,
        cart: &mut Cart<S>,
        order_id: OrderId,
        persisted: &[PersistedOrderItem],
    ) -> Result<SubmitOutcome> {
        let prepared = match self.prepare(cart, order_id, persisted)? {
            Some(prepared) => prepared,
            None => return Ok(SubmitOutcome::NoChanges),
        };

        let result = self.send(&prepared).await;
        self.complete(prepared, result, cart)
    }
}
