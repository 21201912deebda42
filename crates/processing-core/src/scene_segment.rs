//! Scene segmentation: turn detected cut boundaries into a frame partition.
//!
//! The scene detector is trusted to return a full partition of the clip.
//! When it finds no cuts at all the whole clip becomes one scene. Under
//! [`ScenePolicy::Validate`] a list that is not a partition is rejected;
//! under [`ScenePolicy::PassThrough`] the same findings are only logged.

use reframe_common::{ReframeError, ReframeResult, ScenePolicy};
use reframe_schedule_model::{FrameNumber, Scene};

/// A way in which a scene list fails to partition the clip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionIssue {
    /// Scene with `end <= start`.
    #[error("scene {index} [{}, {}) is empty", .scene.start, .scene.end)]
    Empty { index: usize, scene: Scene },

    /// The first scene does not start at frame 0.
    #[error("first scene starts at frame {start} instead of 0")]
    LateStart { start: FrameNumber },

    /// Frames `[from, to)` belong to no scene.
    #[error("frames [{from}, {to}) are in no scene")]
    Gap { from: FrameNumber, to: FrameNumber },

    /// Frames `[from, to)` belong to two scenes.
    #[error("frames [{from}, {to}) are in two scenes")]
    Overlap { from: FrameNumber, to: FrameNumber },

    /// The last scene ends before the last tracked frame.
    #[error("scenes end at frame {end} but tracking runs to frame {}", .required - 1)]
    ShortCoverage {
        end: FrameNumber,
        required: FrameNumber,
    },
}

/// Build the scene list for a clip whose last tracked frame is `last_frame`.
pub fn segment_scenes(
    boundaries: &[(FrameNumber, FrameNumber)],
    last_frame: FrameNumber,
    policy: ScenePolicy,
) -> ReframeResult<Vec<Scene>> {
    if boundaries.is_empty() {
        tracing::debug!("No scenes detected, using a single scene");
        return Ok(vec![Scene::new(0, last_frame + 1)]);
    }

    let scenes: Vec<Scene> = boundaries
        .iter()
        .map(|&(start, end)| Scene::new(start, end))
        .collect();

    let issues = partition_issues(&scenes, last_frame);
    for issue in &issues {
        match policy {
            ScenePolicy::Validate => {
                return Err(ReframeError::malformed_scenes(issue.to_string()));
            }
            ScenePolicy::PassThrough => tracing::warn!("Scene list: {issue}"),
        }
    }

    tracing::debug!(
        "Scene starts: {:?}",
        scenes.iter().map(|s| s.start).collect::<Vec<_>>()
    );
    Ok(scenes)
}

/// Check that `scenes` partitions `[0, last_frame + 1)` in order.
pub fn partition_issues(scenes: &[Scene], last_frame: FrameNumber) -> Vec<PartitionIssue> {
    let mut issues = Vec::new();

    let Some(first) = scenes.first() else {
        return issues;
    };
    if first.start != 0 {
        issues.push(PartitionIssue::LateStart { start: first.start });
    }

    for (index, scene) in scenes.iter().enumerate() {
        if scene.is_empty() {
            issues.push(PartitionIssue::Empty {
                index,
                scene: *scene,
            });
        }
    }

    for pair in scenes.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.start > prev.end {
            issues.push(PartitionIssue::Gap {
                from: prev.end,
                to: next.start,
            });
        } else if next.start < prev.end {
            issues.push(PartitionIssue::Overlap {
                from: next.start,
                to: prev.end,
            });
        }
    }

    let end = scenes.iter().map(|s| s.end).max().unwrap_or(0);
    let required = last_frame + 1;
    if end < required {
        issues.push(PartitionIssue::ShortCoverage { end, required });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_gives_whole_clip() {
        let scenes = segment_scenes(&[], 99, ScenePolicy::Validate).unwrap();
        assert_eq!(scenes, vec![Scene::new(0, 100)]);
    }

    #[test]
    fn test_boundaries_map_directly() {
        let scenes =
            segment_scenes(&[(0, 40), (40, 100)], 99, ScenePolicy::Validate).unwrap();
        assert_eq!(scenes, vec![Scene::new(0, 40), Scene::new(40, 100)]);
    }

    #[test]
    fn test_gap_rejected_when_validating() {
        let result = segment_scenes(&[(0, 40), (50, 100)], 99, ScenePolicy::Validate);
        assert!(matches!(
            result,
            Err(ReframeError::MalformedSceneList { .. })
        ));
    }

    #[test]
    fn test_gap_passed_through() {
        let scenes =
            segment_scenes(&[(0, 40), (50, 100)], 99, ScenePolicy::PassThrough).unwrap();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[1], Scene::new(50, 100));
    }

    #[test]
    fn test_overlap_and_late_start_detected() {
        let issues = partition_issues(&[Scene::new(5, 40), Scene::new(30, 100)], 99);
        assert!(issues.contains(&PartitionIssue::LateStart { start: 5 }));
        assert!(issues.contains(&PartitionIssue::Overlap { from: 30, to: 40 }));
    }

    #[test]
    fn test_empty_scene_detected() {
        let issues = partition_issues(&[Scene::new(0, 0), Scene::new(0, 10)], 9);
        assert_eq!(
            issues,
            vec![PartitionIssue::Empty {
                index: 0,
                scene: Scene::new(0, 0)
            }]
        );
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(
            PartitionIssue::Gap { from: 40, to: 50 }.to_string(),
            "frames [40, 50) are in no scene"
        );
        assert_eq!(
            PartitionIssue::ShortCoverage {
                end: 50,
                required: 100
            }
            .to_string(),
            "scenes end at frame 50 but tracking runs to frame 99"
        );
    }

    #[test]
    fn test_short_coverage_rejected_when_validating() {
        let result = segment_scenes(&[(0, 50)], 99, ScenePolicy::Validate);
        assert!(matches!(
            result,
            Err(ReframeError::MalformedSceneList { .. })
        ));
        assert_eq!(
            partition_issues(&[Scene::new(0, 50)], 99),
            vec![PartitionIssue::ShortCoverage {
                end: 50,
                required: 100
            }]
        );
    }

    #[test]
    fn test_short_coverage_passed_through() {
        let scenes = segment_scenes(&[(0, 50)], 99, ScenePolicy::PassThrough).unwrap();
        assert_eq!(scenes, vec![Scene::new(0, 50)]);
    }

    #[test]
    fn test_scenes_past_last_frame_are_fine() {
        let scenes = segment_scenes(&[(0, 50), (50, 200)], 99, ScenePolicy::Validate).unwrap();
        assert_eq!(scenes.len(), 2);
    }
}
