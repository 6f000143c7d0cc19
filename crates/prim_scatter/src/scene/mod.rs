//! Scene-graph vocabulary shared with the host: prim paths and host capability traits.
pub mod host;
pub mod path;

pub use host::{
    CommandError, CommandExecutor, HostCommand, SelectionSource, UndoGroup, UndoTransactions,
};
pub use path::PrimPath;
