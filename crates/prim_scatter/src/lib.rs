#![forbid(unsafe_code)]
//! prim_scatter: Seeded grid scattering and undoable prim duplication for scene-graph editors.
//!
//! Modules:
//! - sampling: centered 3D grid generation with jitter and random variant ids
//! - scene: prim paths and the host capabilities (commands, undo groups, selection)
//! - scatter: duplication into copies, references or a point-instancer, events, selection tool
//!
//! For examples and docs, see README and docs.rs.
pub mod error;
pub mod sampling;
pub mod scatter;
pub mod scene;

#[cfg(test)]
pub(crate) mod testing;

/// Convenient re-exports for common types. Import with `use prim_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::sampling::{
        scatter, Axis, AxisSpec, GenerationRequest, Scatter, ScatterItem, ScatterResult,
        Transform,
    };
    pub use crate::scatter::{
        duplicate_prims, duplicate_prims_with_events, DuplicationEvent, DuplicationMode,
        DuplicationReport, DuplicationRequest, DuplicationSink, FnSink, ScatterSettings,
        ScatterTool, VecSink,
    };
    pub use crate::scene::{
        CommandError, CommandExecutor, HostCommand, PrimPath, SelectionSource, UndoGroup,
        UndoTransactions,
    };
}
