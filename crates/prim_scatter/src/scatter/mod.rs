//! Duplication pipeline: turning a scatter into prims in the host scene.
pub mod duplicate;
pub mod events;
pub mod mode;
pub mod tool;

pub use duplicate::{
    duplicate_prims, duplicate_prims_with_events, DuplicationReport, DuplicationRequest,
};
pub use events::{DuplicationEvent, DuplicationSink, FnSink, VecSink};
pub use mode::{DuplicationMode, UnrecognizedMode};
pub use tool::{ScatterSettings, ScatterTool};
