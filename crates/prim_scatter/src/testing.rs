//! Recording host used by unit tests.
use crate::scene::{
    CommandError, CommandExecutor, HostCommand, PrimPath, SelectionSource, UndoTransactions,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Begin,
    End,
    Command(HostCommand),
}

/// Logs every host call in order and can fail a chosen command.
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub calls: Vec<Call>,
    pub selection: Vec<PrimPath>,
    /// Zero-based position of the command that should fail.
    pub fail_at: Option<usize>,
    executed: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(command_position: usize) -> Self {
        Self {
            fail_at: Some(command_position),
            ..Default::default()
        }
    }

    pub fn with_selection(mut self, paths: &[&str]) -> Self {
        self.selection = paths.iter().map(|p| path(p)).collect();
        self
    }

    pub fn commands(&self) -> Vec<&HostCommand> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Command(cmd) => Some(cmd),
                _ => None,
            })
            .collect()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands().iter().map(|cmd| cmd.name()).collect()
    }

    pub fn group_calls(&self) -> (usize, usize) {
        let begun = self.calls.iter().filter(|c| **c == Call::Begin).count();
        let ended = self.calls.iter().filter(|c| **c == Call::End).count();
        (begun, ended)
    }
}

impl CommandExecutor for RecordingHost {
    fn execute(&mut self, command: &HostCommand) -> Result<(), CommandError> {
        let position = self.executed;
        self.executed += 1;
        if self.fail_at == Some(position) {
            return Err(format!("{} rejected", command.name()).into());
        }
        self.calls.push(Call::Command(command.clone()));
        Ok(())
    }
}

impl UndoTransactions for RecordingHost {
    fn begin_group(&mut self) {
        self.calls.push(Call::Begin);
    }

    fn end_group(&mut self) {
        self.calls.push(Call::End);
    }
}

impl SelectionSource for RecordingHost {
    fn selected_prim_paths(&self) -> Vec<PrimPath> {
        self.selection.clone()
    }
}

pub(crate) fn path(s: &str) -> PrimPath {
    s.parse().expect("valid prim path")
}
