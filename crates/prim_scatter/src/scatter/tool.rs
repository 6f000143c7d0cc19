//! Selection-driven scatter: duplicate whatever the user selected into a fresh arrangement.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::sampling::{scatter, Axis, AxisSpec, GenerationRequest, ScatterResult};
use crate::scatter::duplicate::{
    duplicate_prims_with_events, DuplicationReport, DuplicationRequest,
};
use crate::scatter::events::DuplicationSink;
use crate::scatter::mode::DuplicationMode;
use crate::scene::{CommandExecutor, PrimPath, SelectionSource, UndoTransactions};

pub const DEFAULT_TARGET_PATH: &str = "/World/Scatter";

/// User-facing scatter settings, as edited in the host panel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterSettings {
    pub axes: [AxisSpec; 3],
    pub seed: Option<u64>,
    pub target_path: PrimPath,
    pub mode: DuplicationMode,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            axes: [AxisSpec::default(); 3],
            seed: None,
            target_path: PrimPath::try_new(DEFAULT_TARGET_PATH)
                .unwrap_or_else(|_| PrimPath::root()),
            mode: DuplicationMode::Copy,
        }
    }
}

impl ScatterSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: Axis, spec: AxisSpec) -> Self {
        self.axes[axis.index()] = spec;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_target_path(mut self, target_path: PrimPath) -> Self {
        self.target_path = target_path;
        self
    }

    pub fn with_mode(mut self, mode: DuplicationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Generation request for `id_count` source prims.
    pub fn generation_request(&self, id_count: usize) -> GenerationRequest {
        GenerationRequest {
            axes: self.axes,
            id_count,
            seed: self.seed,
        }
    }
}

/// Runs a full scatter against a host: selection, generation, duplication.
#[derive(Clone, Debug, Default)]
pub struct ScatterTool {
    pub settings: ScatterSettings,
}

impl ScatterTool {
    pub fn new(settings: ScatterSettings) -> Self {
        Self { settings }
    }

    /// Generates transforms for the given sources without touching the scene.
    pub fn preview(&self, sources: &[PrimPath]) -> Result<ScatterResult> {
        if sources.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one source prim is required".into(),
            ));
        }
        Ok(scatter(&self.settings.generation_request(sources.len()))?.collect())
    }

    /// Scatters the host's current selection.
    pub fn run<H>(&self, host: &mut H) -> Result<DuplicationReport>
    where
        H: SelectionSource + CommandExecutor + UndoTransactions + ?Sized,
    {
        self.run_with_events(host, &mut ())
    }

    pub fn run_with_events<H>(
        &self,
        host: &mut H,
        sink: &mut dyn DuplicationSink,
    ) -> Result<DuplicationReport>
    where
        H: SelectionSource + CommandExecutor + UndoTransactions + ?Sized,
    {
        let sources = host.selected_prim_paths();
        if sources.is_empty() {
            return Err(Error::InvalidArgument("no prims selected".into()));
        }
        info!(
            "Scattering {} selected prims into '{}'.",
            sources.len(),
            self.settings.target_path
        );

        let transforms = self.preview(&sources)?;
        let request = DuplicationRequest::new(
            transforms,
            sources,
            self.settings.target_path.clone(),
        )
        .with_mode(self.settings.mode.clone());
        duplicate_prims_with_events(&request, host, sink)
    }
}
