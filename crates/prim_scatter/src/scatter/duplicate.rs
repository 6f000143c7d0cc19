//! Turns generated transforms into scene-graph edits.
//!
//! Copy and reference batches run inside one [`UndoGroup`] so a single undo reverts the
//! whole batch, including the prims created before a failure. Point-instancer batches are a
//! single host command and need no group.
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::sampling::ScatterResult;
use crate::scatter::events::{DuplicationEvent, DuplicationSink};
use crate::scatter::mode::DuplicationMode;
use crate::scene::{CommandExecutor, HostCommand, PrimPath, UndoGroup, UndoTransactions};

/// Input for one duplication batch.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct DuplicationRequest {
    /// Transforms and variant ids in generation order.
    pub transforms: ScatterResult,
    /// Source prims, indexed by variant id.
    pub source_prims: Vec<PrimPath>,
    /// Parent of the new prims, or the instancer path.
    pub target_path: PrimPath,
    pub mode: DuplicationMode,
}

impl DuplicationRequest {
    /// Creates a copy-mode request.
    pub fn new(
        transforms: ScatterResult,
        source_prims: Vec<PrimPath>,
        target_path: PrimPath,
    ) -> Self {
        Self {
            transforms,
            source_prims,
            target_path,
            mode: DuplicationMode::Copy,
        }
    }

    /// Sets the duplication mode.
    pub fn with_mode(mut self, mode: DuplicationMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Summary of a finished batch.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DuplicationReport {
    /// Prims created, in issue order. Holds the instancer path for point-instancer batches.
    pub created: Vec<PrimPath>,
    /// Items that produced no prim.
    pub skipped: usize,
    /// Host commands executed successfully.
    pub commands_issued: usize,
}

#[derive(Clone, Copy, Debug)]
enum DuplicateKind {
    Copy,
    Reference,
}

/// Duplicates prims per `request` without observing events.
pub fn duplicate_prims<H>(request: &DuplicationRequest, host: &mut H) -> Result<DuplicationReport>
where
    H: CommandExecutor + UndoTransactions + ?Sized,
{
    duplicate_prims_with_events(request, host, &mut ())
}

/// Duplicates prims per `request`, reporting progress to `sink`.
///
/// Commands are issued one at a time in generation order. The first failure aborts the rest
/// of the batch and is returned unchanged; nothing is retried.
pub fn duplicate_prims_with_events<H>(
    request: &DuplicationRequest,
    host: &mut H,
    sink: &mut dyn DuplicationSink,
) -> Result<DuplicationReport>
where
    H: CommandExecutor + UndoTransactions + ?Sized,
{
    info!(
        "Duplicating {} items into '{}' ({}).",
        request.transforms.len(),
        request.target_path,
        request.mode
    );
    sink.send(DuplicationEvent::BatchStarted {
        mode: request.mode.clone(),
        target_path: request.target_path.clone(),
        item_count: request.transforms.len(),
    });

    let outcome = match &request.mode {
        DuplicationMode::PointInstancer => create_point_instancer(request, host, sink),
        DuplicationMode::Copy => duplicate_grouped(request, host, sink, Some(DuplicateKind::Copy)),
        DuplicationMode::Reference => {
            duplicate_grouped(request, host, sink, Some(DuplicateKind::Reference))
        }
        DuplicationMode::Unrecognized(name) => {
            warn!(
                "Unrecognized duplication mode '{}'; items will be skipped.",
                name
            );
            duplicate_grouped(request, host, sink, None)
        }
    };

    match outcome {
        Ok(report) => {
            info!(
                "Duplication into '{}' finished: {} created, {} skipped, {} commands.",
                request.target_path,
                report.created.len(),
                report.skipped,
                report.commands_issued
            );
            sink.send(DuplicationEvent::BatchFinished {
                report: report.clone(),
            });
            Ok(report)
        }
        Err(err) => {
            warn!("Duplication into '{}' failed: {}.", request.target_path, err);
            sink.send(DuplicationEvent::Failed {
                index: err.item_index(),
                message: err.to_string(),
            });
            Err(err)
        }
    }
}

fn create_point_instancer<H>(
    request: &DuplicationRequest,
    host: &mut H,
    sink: &mut dyn DuplicationSink,
) -> Result<DuplicationReport>
where
    H: CommandExecutor + ?Sized,
{
    let mut report = DuplicationReport::default();
    let command = HostCommand::CreatePointInstancer {
        path: request.target_path.clone(),
        transforms: request
            .transforms
            .iter()
            .map(|item| item.transform.into())
            .collect(),
        proto_indices: request
            .transforms
            .iter()
            .map(|item| item.variant_id)
            .collect(),
        prototypes: request.source_prims.clone(),
    };
    issue(host, &command, None, &mut report)?;

    report.created.push(request.target_path.clone());
    sink.send(DuplicationEvent::PointInstancerCreated {
        path: request.target_path.clone(),
        instance_count: request.transforms.len(),
    });
    Ok(report)
}

fn duplicate_grouped<H>(
    request: &DuplicationRequest,
    host: &mut H,
    sink: &mut dyn DuplicationSink,
    kind: Option<DuplicateKind>,
) -> Result<DuplicationReport>
where
    H: CommandExecutor + UndoTransactions + ?Sized,
{
    let mut report = DuplicationReport::default();
    let mut group = UndoGroup::begin(host);

    let container = HostCommand::CreateGroup {
        path: request.target_path.clone(),
    };
    issue(&mut *group, &container, None, &mut report)?;
    sink.send(DuplicationEvent::GroupCreated {
        path: request.target_path.clone(),
    });

    for (index, item) in request.transforms.iter().enumerate() {
        let source = request
            .source_prims
            .get(item.variant_id)
            .ok_or(Error::IndexOutOfRange {
                index,
                variant_id: item.variant_id,
                len: request.source_prims.len(),
            })?;
        let to = request
            .target_path
            .append_child(&format!("{}{}", source.name(), index))?;

        let duplicate = match kind {
            Some(DuplicateKind::Copy) => HostCommand::DuplicateCopy {
                from: source.clone(),
                to: to.clone(),
            },
            Some(DuplicateKind::Reference) => HostCommand::DuplicateReference {
                from: source.clone(),
                to: to.clone(),
            },
            None => {
                debug!("Skipping item {} for '{}'.", index, to);
                report.skipped += 1;
                sink.send(DuplicationEvent::ItemSkipped {
                    index,
                    reason: format!("unrecognized duplication mode '{}'", request.mode),
                });
                continue;
            }
        };
        issue(&mut *group, &duplicate, Some(index), &mut report)?;

        let translate = HostCommand::SetTranslation {
            path: to.clone(),
            translation: item.transform.translation().into(),
        };
        issue(&mut *group, &translate, Some(index), &mut report)?;

        sink.send(DuplicationEvent::PrimCreated {
            index,
            source: source.clone(),
            path: to.clone(),
        });
        report.created.push(to);
    }

    Ok(report)
}

fn issue<H>(
    host: &mut H,
    command: &HostCommand,
    index: Option<usize>,
    report: &mut DuplicationReport,
) -> Result<()>
where
    H: CommandExecutor + ?Sized,
{
    debug!("Executing {} on '{}'.", command.name(), command.target());
    host.execute(command)
        .map_err(|source| Error::ExternalCommand {
            command: command.name(),
            index,
            source,
        })?;
    report.commands_issued += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::sampling::{scatter, GenerationRequest, ScatterItem, Transform};
    use crate::scatter::events::VecSink;
    use crate::testing::{path, Call, RecordingHost};

    fn items(variants: &[usize]) -> ScatterResult {
        variants
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                ScatterItem::new(
                    Transform::from_translation(DVec3::new(i as f64, 0.0, -(i as f64))),
                    v,
                )
            })
            .collect()
    }

    fn request(variants: &[usize], sources: &[&str], mode: DuplicationMode) -> DuplicationRequest {
        DuplicationRequest::new(
            items(variants),
            sources.iter().map(|s| path(s)).collect(),
            path("/World/Scatter"),
        )
        .with_mode(mode)
    }

    #[test]
    fn copy_mode_issues_group_then_duplicate_and_translate_per_item() {
        let mut host = RecordingHost::new();
        let report = duplicate_prims(
            &request(&[0, 0, 0], &["cube"], DuplicationMode::Copy),
            &mut host,
        )
        .unwrap();

        assert_eq!(host.calls.first(), Some(&Call::Begin));
        assert_eq!(host.calls.last(), Some(&Call::End));
        assert_eq!(host.group_calls(), (1, 1));
        assert_eq!(
            host.command_names(),
            vec![
                "CreateGroup",
                "DuplicateCopy",
                "SetTranslation",
                "DuplicateCopy",
                "SetTranslation",
                "DuplicateCopy",
                "SetTranslation",
            ]
        );

        let destinations: Vec<_> = host
            .commands()
            .into_iter()
            .filter_map(|cmd| match cmd {
                HostCommand::DuplicateCopy { to, .. } => Some(to.name().to_owned()),
                _ => None,
            })
            .collect();
        assert_eq!(destinations, vec!["cube0", "cube1", "cube2"]);
        assert_eq!(report.created.len(), 3);
        assert_eq!(report.commands_issued, 7);
    }

    #[test]
    fn translation_follows_its_duplicate() {
        let mut host = RecordingHost::new();
        duplicate_prims(
            &request(&[0, 0], &["/World/cube"], DuplicationMode::Copy),
            &mut host,
        )
        .unwrap();

        let commands = host.commands();
        match (commands[3], commands[4]) {
            (
                HostCommand::DuplicateCopy { from, to },
                HostCommand::SetTranslation { path: moved, translation },
            ) => {
                assert_eq!(from, &path("/World/cube"));
                assert_eq!(to, &path("/World/Scatter/cube1"));
                assert_eq!(moved, to);
                assert_eq!([translation.x, translation.y, translation.z], [1.0, 0.0, -1.0]);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn reference_mode_uses_variant_to_pick_source() {
        let mut host = RecordingHost::new();
        duplicate_prims(
            &request(
                &[1, 0, 1],
                &["/World/rock", "/World/tree"],
                DuplicationMode::Reference,
            ),
            &mut host,
        )
        .unwrap();

        let refs: Vec<_> = host
            .commands()
            .into_iter()
            .filter_map(|cmd| match cmd {
                HostCommand::DuplicateReference { from, to } => {
                    Some((from.name().to_owned(), to.name().to_owned()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            refs,
            vec![
                ("tree".to_owned(), "tree0".to_owned()),
                ("rock".to_owned(), "rock1".to_owned()),
                ("tree".to_owned(), "tree2".to_owned()),
            ]
        );
        assert_eq!(host.group_calls(), (1, 1));
    }

    #[test]
    fn point_instancer_issues_one_command_without_group() {
        let mut host = RecordingHost::new();
        let report = duplicate_prims(
            &request(&[0, 1, 1, 0], &["/World/a", "/World/b"], DuplicationMode::PointInstancer),
            &mut host,
        )
        .unwrap();

        assert_eq!(host.group_calls(), (0, 0));
        assert_eq!(host.calls.len(), 1);
        match host.commands()[0] {
            HostCommand::CreatePointInstancer {
                path: instancer,
                transforms,
                proto_indices,
                prototypes,
            } => {
                assert_eq!(instancer, &path("/World/Scatter"));
                assert_eq!(transforms.len(), 4);
                assert_eq!(transforms[2].w.x, 2.0);
                assert_eq!(proto_indices, &vec![0, 1, 1, 0]);
                assert_eq!(prototypes.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(report.created, vec![path("/World/Scatter")]);
        assert_eq!(report.commands_issued, 1);
    }

    #[test]
    fn out_of_range_variant_fails_before_its_duplicate() {
        let mut host = RecordingHost::new();
        let err = duplicate_prims(
            &request(&[0, 0, 3, 0], &["cube"], DuplicationMode::Copy),
            &mut host,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                index: 2,
                variant_id: 3,
                len: 1
            }
        ));
        assert_eq!(
            host.command_names(),
            vec![
                "CreateGroup",
                "DuplicateCopy",
                "SetTranslation",
                "DuplicateCopy",
                "SetTranslation",
            ]
        );
        assert_eq!(host.group_calls(), (1, 1));
        assert_eq!(host.calls.last(), Some(&Call::End));
    }

    #[test]
    fn host_failure_is_reported_with_item_index_and_group_closes() {
        // group, dup0, move0, dup1 -> fails
        let mut host = RecordingHost::failing_at(3);
        let mut sink = VecSink::new();
        let err = duplicate_prims_with_events(
            &request(&[0, 0, 0], &["cube"], DuplicationMode::Copy),
            &mut host,
            &mut sink,
        )
        .unwrap_err();

        match &err {
            Error::ExternalCommand { command, index, .. } => {
                assert_eq!(*command, "DuplicateCopy");
                assert_eq!(*index, Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(host.commands().len(), 3);
        assert_eq!(host.group_calls(), (1, 1));

        let failures: Vec<_> = sink
            .as_slice()
            .iter()
            .filter_map(|event| match event {
                DuplicationEvent::Failed { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(failures, vec![Some(1)]);
    }

    #[test]
    fn failing_container_has_no_item_index() {
        let mut host = RecordingHost::failing_at(0);
        let err = duplicate_prims(
            &request(&[0], &["cube"], DuplicationMode::Reference),
            &mut host,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ExternalCommand {
                command: "CreateGroup",
                index: None,
                ..
            }
        ));
        assert_eq!(host.group_calls(), (1, 1));
    }

    #[test]
    fn unrecognized_mode_skips_every_item_but_creates_container() {
        let mut host = RecordingHost::new();
        let mut sink = VecSink::new();
        let report = duplicate_prims_with_events(
            &request(&[0, 0], &["cube"], DuplicationMode::from("Instance".to_owned())),
            &mut host,
            &mut sink,
        )
        .unwrap();

        assert_eq!(host.command_names(), vec!["CreateGroup"]);
        assert_eq!(host.group_calls(), (1, 1));
        assert_eq!(report.skipped, 2);
        assert!(report.created.is_empty());

        let skipped = sink
            .as_slice()
            .iter()
            .filter(|event| matches!(event, DuplicationEvent::ItemSkipped { .. }))
            .count();
        assert_eq!(skipped, 2);
    }

    #[test]
    fn unrecognized_mode_still_checks_variant_bounds() {
        let mut host = RecordingHost::new();
        let err = duplicate_prims(
            &request(&[5], &["cube"], DuplicationMode::from("Other".to_owned())),
            &mut host,
        )
        .unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn empty_batch_still_creates_container() {
        let mut host = RecordingHost::new();
        let report = duplicate_prims(
            &request(&[], &["cube"], DuplicationMode::Copy),
            &mut host,
        )
        .unwrap();
        assert_eq!(host.command_names(), vec!["CreateGroup"]);
        assert_eq!(report.commands_issued, 1);
    }

    #[test]
    fn events_follow_batch_lifecycle() {
        let mut host = RecordingHost::new();
        let mut sink = VecSink::new();
        duplicate_prims_with_events(
            &request(&[0, 0], &["cube"], DuplicationMode::Copy),
            &mut host,
            &mut sink,
        )
        .unwrap();

        let events = sink.into_inner();
        assert!(matches!(
            events.first(),
            Some(DuplicationEvent::BatchStarted { item_count: 2, .. })
        ));
        assert!(matches!(events[1], DuplicationEvent::GroupCreated { .. }));
        let created: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                DuplicationEvent::PrimCreated { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(created, vec![0, 1]);
        assert!(matches!(
            events.last(),
            Some(DuplicationEvent::BatchFinished { .. })
        ));
    }

    #[test]
    fn generated_scatter_feeds_duplication() {
        let generation = GenerationRequest::new(2)
            .with_counts([3, 2, 1])
            .with_distances([2.0, 2.0, 0.0])
            .with_seed(17);
        let transforms: ScatterResult = scatter(&generation).unwrap().collect();
        let mut host = RecordingHost::new();
        let report = duplicate_prims(
            &DuplicationRequest::new(
                transforms.clone(),
                vec![path("/World/a"), path("/World/b")],
                path("/World/Scatter"),
            ),
            &mut host,
        )
        .unwrap();

        assert_eq!(report.created.len(), 6);
        for (i, (created, item)) in report.created.iter().zip(&transforms).enumerate() {
            let expected = if item.variant_id == 0 { "a" } else { "b" };
            assert_eq!(created.name(), format!("{expected}{i}"));
        }
    }
}
