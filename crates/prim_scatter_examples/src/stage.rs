//! In-memory stage implementing every host capability, with grouped undo.
use std::collections::BTreeMap;

use glam::DVec3;
use prim_scatter::prelude::{
    CommandError, CommandExecutor, HostCommand, PrimPath, SelectionSource, UndoTransactions,
};
use thiserror::Error;
use tracing::debug;

/// Errors raised by [`MemoryStage`] while executing commands.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("prim '{0}' already exists")]
    PrimExists(PrimPath),
    #[error("prim '{0}' does not exist")]
    MissingPrim(PrimPath),
    #[error("parent of '{0}' does not exist")]
    MissingParent(PrimPath),
    #[error("unsupported command '{0}'")]
    Unsupported(&'static str),
}

/// A prim stored in the stage.
#[derive(Clone, Debug, PartialEq)]
pub struct Prim {
    pub type_name: String,
    pub translation: DVec3,
    /// Source of a referencing prim.
    pub reference: Option<PrimPath>,
    /// Prototype per instance, for point-instancers.
    pub proto_indices: Vec<usize>,
    pub prototypes: Vec<PrimPath>,
}

impl Prim {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            translation: DVec3::ZERO,
            reference: None,
            proto_indices: Vec::new(),
            prototypes: Vec::new(),
        }
    }
}

type Prims = BTreeMap<PrimPath, Prim>;

/// Flat path-keyed stage with a selection and an undo stack.
///
/// Each command executed outside a group is its own undo step; everything executed between the
/// outermost `begin_group`/`end_group` pair is one step.
#[derive(Default)]
pub struct MemoryStage {
    prims: Prims,
    selection: Vec<PrimPath>,
    undo_stack: Vec<Prims>,
    open_groups: usize,
    group_start: Option<Prims>,
}

impl MemoryStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a prim directly, bypassing commands and undo.
    pub fn define(&mut self, path: &str, type_name: &str) -> anyhow::Result<PrimPath> {
        let path: PrimPath = path.parse()?;
        self.prims.insert(path.clone(), Prim::new(type_name));
        Ok(path)
    }

    pub fn select(&mut self, paths: &[PrimPath]) {
        self.selection = paths.to_vec();
    }

    pub fn get(&self, path: &PrimPath) -> Option<&Prim> {
        self.prims.get(path)
    }

    pub fn children(&self, parent: &PrimPath) -> Vec<(&PrimPath, &Prim)> {
        self.prims
            .iter()
            .filter(|(p, _)| p.parent().as_ref() == Some(parent))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PrimPath, &Prim)> {
        self.prims.iter()
    }

    pub fn len(&self) -> usize {
        self.prims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prims.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Reverts the most recent undo step. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.prims = previous;
                true
            }
            None => false,
        }
    }

    fn check_free(&self, path: &PrimPath) -> Result<(), StageError> {
        if self.prims.contains_key(path) {
            return Err(StageError::PrimExists(path.clone()));
        }
        match path.parent() {
            Some(parent) if !parent.is_root() && !self.prims.contains_key(&parent) => {
                Err(StageError::MissingParent(path.clone()))
            }
            _ => Ok(()),
        }
    }

    fn source(&self, path: &PrimPath) -> Result<&Prim, StageError> {
        self.prims
            .get(path)
            .ok_or_else(|| StageError::MissingPrim(path.clone()))
    }

    fn apply(&mut self, command: &HostCommand) -> Result<(), CommandError> {
        match command {
            HostCommand::CreateGroup { path } => {
                self.check_free(path)?;
                self.prims.insert(path.clone(), Prim::new("Scope"));
            }
            HostCommand::DuplicateCopy { from, to } => {
                self.source(from)?;
                self.check_free(to)?;
                let copied: Vec<(PrimPath, Prim)> = self
                    .prims
                    .iter()
                    .filter(|(p, _)| p.has_prefix(from))
                    .map(|(p, prim)| {
                        let rebased = format!("{}{}", to, &p.as_str()[from.as_str().len()..]);
                        rebased.parse().map(|path| (path, prim.clone()))
                    })
                    .collect::<prim_scatter::error::Result<_>>()?;
                self.prims.extend(copied);
            }
            HostCommand::DuplicateReference { from, to } => {
                let mut prim = Prim::new(self.source(from)?.type_name.clone());
                self.check_free(to)?;
                prim.reference = Some(from.clone());
                self.prims.insert(to.clone(), prim);
            }
            HostCommand::SetTranslation { path, translation } => {
                let prim = self
                    .prims
                    .get_mut(path)
                    .ok_or_else(|| StageError::MissingPrim(path.clone()))?;
                prim.translation = DVec3::from(*translation);
            }
            HostCommand::CreatePointInstancer {
                path,
                transforms,
                proto_indices,
                prototypes,
            } => {
                self.check_free(path)?;
                debug!(
                    "Point-instancer '{}' with {} instances.",
                    path,
                    transforms.len()
                );
                let mut prim = Prim::new("PointInstancer");
                prim.proto_indices = proto_indices.clone();
                prim.prototypes = prototypes.clone();
                self.prims.insert(path.clone(), prim);
            }
            other => return Err(StageError::Unsupported(other.name()).into()),
        }
        Ok(())
    }
}

impl CommandExecutor for MemoryStage {
    fn execute(&mut self, command: &HostCommand) -> Result<(), CommandError> {
        let before = (self.open_groups == 0).then(|| self.prims.clone());
        self.apply(command)?;
        if let Some(before) = before {
            self.undo_stack.push(before);
        }
        Ok(())
    }
}

impl UndoTransactions for MemoryStage {
    fn begin_group(&mut self) {
        if self.open_groups == 0 {
            self.group_start = Some(self.prims.clone());
        }
        self.open_groups += 1;
    }

    fn end_group(&mut self) {
        self.open_groups = self.open_groups.saturating_sub(1);
        if self.open_groups == 0 {
            if let Some(start) = self.group_start.take() {
                self.undo_stack.push(start);
            }
        }
    }
}

impl SelectionSource for MemoryStage {
    fn selected_prim_paths(&self) -> Vec<PrimPath> {
        self.selection.clone()
    }
}
