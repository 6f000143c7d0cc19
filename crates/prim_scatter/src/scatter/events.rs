//! Event types and sinks for observing duplication batches.
//!
//! This module defines [`DuplicationEvent`] and a set of sinks to emit, collect, or forward
//! events while running [`crate::scatter::duplicate::duplicate_prims_with_events`] or
//! [`crate::scatter::tool::ScatterTool::run_with_events`].
use crate::scatter::duplicate::DuplicationReport;
use crate::scatter::mode::DuplicationMode;
use crate::scene::PrimPath;

/// Describes events emitted while duplicating prims.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum DuplicationEvent {
    /// Emitted when a batch starts.
    BatchStarted {
        /// Mode used for the batch.
        mode: DuplicationMode,
        /// Parent path of the new prims.
        target_path: PrimPath,
        /// Number of transforms in the batch.
        item_count: usize,
    },

    /// Emitted after the grouping container was created.
    GroupCreated {
        /// Path of the container.
        path: PrimPath,
    },

    /// Emitted after a duplicate was created and moved into place.
    PrimCreated {
        /// Index of the transform in generation order.
        index: usize,
        /// Source prim that was duplicated.
        source: PrimPath,
        /// Path of the new prim.
        path: PrimPath,
    },

    /// Emitted when an item produced no prim.
    ItemSkipped {
        /// Index of the transform in generation order.
        index: usize,
        /// Human-readable reason.
        reason: String,
    },

    /// Emitted after a point-instancer was created.
    PointInstancerCreated {
        /// Path of the instancer prim.
        path: PrimPath,
        /// Number of instances it carries.
        instance_count: usize,
    },

    /// Emitted when the batch completes.
    BatchFinished {
        /// Summary of the batch.
        report: DuplicationReport,
    },

    /// Emitted once when the batch aborts.
    Failed {
        /// Index of the failing item, if the failure belongs to one.
        index: Option<usize>,
        /// Human-readable error message.
        message: String,
    },
}

/// A generic event sink that accepts [`DuplicationEvent`]s.
pub trait DuplicationSink {
    fn send(&mut self, event: DuplicationEvent);
}

/// A no-op event sink.
impl DuplicationSink for () {
    #[inline]
    fn send(&mut self, _event: DuplicationEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(DuplicationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(DuplicationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> DuplicationSink for FnSink<F>
where
    F: FnMut(DuplicationEvent),
{
    #[inline]
    fn send(&mut self, event: DuplicationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<DuplicationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<DuplicationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[DuplicationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl DuplicationSink for VecSink {
    #[inline]
    fn send(&mut self, event: DuplicationEvent) {
        self.events.push(event);
    }
}
