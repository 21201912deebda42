//! Scenes: frame ranges treated as one continuous shot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Center, FrameNumber, Rectangle};

/// Tracker output keyed by frame. `None` marks a frame on which the
/// tracker lost the subject.
pub type FrameMap = BTreeMap<FrameNumber, Option<Rectangle>>;

/// A half-open frame range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub start: FrameNumber,
    pub end: FrameNumber,
}

impl Scene {
    pub fn new(start: FrameNumber, end: FrameNumber) -> Self {
        Self { start, end }
    }

    /// Number of frames covered.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, frame: FrameNumber) -> bool {
        self.start <= frame && frame < self.end
    }
}

/// One entry of a scene's center sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CenterSample {
    /// The tracker produced a rectangle for this frame.
    Tracked(Center),
    /// The tracker reported no rectangle for this frame.
    Lost { frame_number: FrameNumber },
}

impl CenterSample {
    pub fn frame_number(&self) -> FrameNumber {
        match self {
            CenterSample::Tracked(center) => center.frame_number,
            CenterSample::Lost { frame_number } => *frame_number,
        }
    }

    pub fn center(&self) -> Option<&Center> {
        match self {
            CenterSample::Tracked(center) => Some(center),
            CenterSample::Lost { .. } => None,
        }
    }
}

/// A scene together with the centers tracked inside it, ordered by frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenteredScene {
    #[serde(flatten)]
    pub scene: Scene,
    pub centers: Vec<CenterSample>,
}

impl CenteredScene {
    pub fn new(scene: Scene, centers: Vec<CenterSample>) -> Self {
        Self { scene, centers }
    }

    /// Collect the centers of every rectangle whose frame falls in `scene`.
    pub fn from_rectangles(scene: Scene, rectangles: &FrameMap) -> Self {
        let mut centers: Vec<CenterSample> = rectangles
            .range(scene.start..scene.end.max(scene.start))
            .map(|(&frame, rect)| match rect {
                Some(rect) => CenterSample::Tracked(rect.center()),
                None => CenterSample::Lost {
                    frame_number: frame,
                },
            })
            .collect();
        centers.sort_by_key(CenterSample::frame_number);
        Self { scene, centers }
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

impl std::fmt::Display for CenteredScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Start: {}, End: {}, Centers: [", self.scene.start, self.scene.end)?;
        for (i, sample) in self.centers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match sample {
                CenterSample::Tracked(center) => write!(f, "{center}")?,
                CenterSample::Lost { frame_number } => write!(f, "lost@{frame_number}")?,
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, frame: FrameNumber) -> Rectangle {
        Rectangle::new(x, x + 10.0, 0.0, 10.0, frame, 1.0).unwrap()
    }

    #[test]
    fn test_scene_bounds() {
        let scene = Scene::new(5, 10);
        assert_eq!(scene.len(), 5);
        assert!(scene.contains(5));
        assert!(scene.contains(9));
        assert!(!scene.contains(10));
        assert!(Scene::new(4, 4).is_empty());
    }

    #[test]
    fn test_from_rectangles_filters_range() {
        let mut map = FrameMap::new();
        for frame in 0..10 {
            map.insert(frame, Some(rect(frame as f64, frame)));
        }
        let centered = CenteredScene::from_rectangles(Scene::new(3, 6), &map);
        let frames: Vec<_> = centered.centers.iter().map(|c| c.frame_number()).collect();
        assert_eq!(frames, vec![3, 4, 5]);
        assert_eq!(centered.centers[0].center().unwrap().x, 8);
    }

    #[test]
    fn test_from_rectangles_keeps_lost_frames() {
        let mut map = FrameMap::new();
        map.insert(0, Some(rect(0.0, 0)));
        map.insert(1, None);
        map.insert(2, Some(rect(4.0, 2)));
        let centered = CenteredScene::from_rectangles(Scene::new(0, 3), &map);
        assert_eq!(centered.centers[1], CenterSample::Lost { frame_number: 1 });
    }

    #[test]
    fn test_inverted_scene_collects_nothing() {
        let mut map = FrameMap::new();
        map.insert(3, Some(rect(0.0, 3)));
        let centered = CenteredScene::from_rectangles(Scene::new(5, 2), &map);
        assert!(centered.is_empty());
    }
}
