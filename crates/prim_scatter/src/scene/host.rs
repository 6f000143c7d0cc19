//! Capabilities the host application provides: command execution, undo grouping and selection.
//!
//! The crate never touches scene storage itself. Every mutation is expressed as a
//! [`HostCommand`] and handed to a [`CommandExecutor`]; batches are wrapped in an
//! [`UndoGroup`] so the host can revert them with a single undo.
use std::ops::{Deref, DerefMut};

use crate::scene::PrimPath;

/// Error reported by the host for a failed command.
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// The closed set of scene-graph edits issued by the duplication pipeline.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum HostCommand {
    /// Create an empty grouping prim (a scope) at `path`.
    CreateGroup { path: PrimPath },
    /// Clone the subtree at `from` to `to`.
    DuplicateCopy { from: PrimPath, to: PrimPath },
    /// Create a prim at `to` that references the subtree at `from`.
    DuplicateReference { from: PrimPath, to: PrimPath },
    /// Set the translation of the prim at `path`, leaving rotation and scale alone.
    SetTranslation {
        path: PrimPath,
        translation: mint::Vector3<f64>,
    },
    /// Create one point-instancer prim at `path` with one instance per transform.
    CreatePointInstancer {
        path: PrimPath,
        transforms: Vec<mint::ColumnMatrix4<f64>>,
        /// Per-instance index into `prototypes`.
        proto_indices: Vec<usize>,
        prototypes: Vec<PrimPath>,
    },
}

impl HostCommand {
    /// Stable label used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::CreateGroup { .. } => "CreateGroup",
            HostCommand::DuplicateCopy { .. } => "DuplicateCopy",
            HostCommand::DuplicateReference { .. } => "DuplicateReference",
            HostCommand::SetTranslation { .. } => "SetTranslation",
            HostCommand::CreatePointInstancer { .. } => "CreatePointInstancer",
        }
    }

    /// The prim path the command creates or edits.
    pub fn target(&self) -> &PrimPath {
        match self {
            HostCommand::CreateGroup { path }
            | HostCommand::SetTranslation { path, .. }
            | HostCommand::CreatePointInstancer { path, .. } => path,
            HostCommand::DuplicateCopy { to, .. } | HostCommand::DuplicateReference { to, .. } => {
                to
            }
        }
    }
}

/// Executes scene-graph commands on behalf of the crate.
pub trait CommandExecutor {
    fn execute(&mut self, command: &HostCommand) -> Result<(), CommandError>;
}

/// Groups executed commands into one undoable unit.
pub trait UndoTransactions {
    fn begin_group(&mut self);
    fn end_group(&mut self);
}

/// Reports the prims currently selected in the host.
pub trait SelectionSource {
    fn selected_prim_paths(&self) -> Vec<PrimPath>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &mut T {
    fn execute(&mut self, command: &HostCommand) -> Result<(), CommandError> {
        (**self).execute(command)
    }
}

impl<T: UndoTransactions + ?Sized> UndoTransactions for &mut T {
    fn begin_group(&mut self) {
        (**self).begin_group();
    }

    fn end_group(&mut self) {
        (**self).end_group();
    }
}

/// Scoped undo group: begins on construction and ends when dropped, on every exit path.
pub struct UndoGroup<'a, H: UndoTransactions + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: UndoTransactions + ?Sized> UndoGroup<'a, H> {
    pub fn begin(host: &'a mut H) -> Self {
        host.begin_group();
        Self { host }
    }
}

impl<H: UndoTransactions + ?Sized> Deref for UndoGroup<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: UndoTransactions + ?Sized> DerefMut for UndoGroup<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: UndoTransactions + ?Sized> Drop for UndoGroup<'_, H> {
    fn drop(&mut self) {
        self.host.end_group();
    }
}
