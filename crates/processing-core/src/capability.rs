//! Seams to the external tracking and scene-detection collaborators.
//!
//! The schedule generator only consumes what these produce: a frame to
//! rectangle map and a list of scene boundaries. Replay implementations
//! feed recorded output back in, for tests and for offline runs.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use reframe_common::{ReframeError, ReframeResult};
use reframe_schedule_model::{
    parse_tracking_log, BoundingBox, FrameMap, FrameNumber, Rectangle, TrackingLogError,
};
use serde::{Deserialize, Serialize};

/// Single-object tracker families a tracking backend may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    #[default]
    Csrt,
    Kcf,
    Mil,
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrackerKind::Csrt => "csrt",
            TrackerKind::Kcf => "kcf",
            TrackerKind::Mil => "mil",
        })
    }
}

impl FromStr for TrackerKind {
    type Err = ReframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csrt" => Ok(TrackerKind::Csrt),
            "kcf" => Ok(TrackerKind::Kcf),
            "mil" => Ok(TrackerKind::Mil),
            other => Err(ReframeError::config(format!("unknown tracker: {other}"))),
        }
    }
}

/// A single-object visual tracker.
pub trait Tracker {
    /// Whatever the tracker reads a frame as.
    type Frame;

    /// Start tracking `initial` on `frame`.
    fn init(&mut self, frame: &Self::Frame, initial: BoundingBox) -> ReframeResult<()>;

    /// Locate the subject on the next frame, or `None` if it was lost.
    fn update(&mut self, frame: &Self::Frame) -> Option<BoundingBox>;

    fn kind(&self) -> TrackerKind;
}

/// Finds hard cuts in a video.
pub trait SceneDetector {
    /// Scene boundaries as `(start, end)` frame pairs. Empty if no cut was found.
    fn detect(&self, path: &Path, threshold: f64) -> ReframeResult<Vec<(FrameNumber, FrameNumber)>>;
}

/// Anything that can hand the core a frame to rectangle map.
pub trait RectangleSource {
    fn produce_frame_to_rectangle_map(&mut self) -> ReframeResult<FrameMap>;
}

/// Run `tracker` over `frames`, starting from `initial` on the first frame.
///
/// Rectangles are recorded in the tracker's working space with `ratio`
/// attached. Frames where the tracker loses the subject are recorded as
/// `None`; tracking continues so the tracker can reacquire.
pub fn track_frames<T, I>(
    tracker: &mut T,
    frames: I,
    initial: BoundingBox,
    ratio: f64,
) -> ReframeResult<FrameMap>
where
    T: Tracker,
    I: IntoIterator<Item = T::Frame>,
{
    let mut map = FrameMap::new();
    let mut frames = frames.into_iter();

    let Some(first) = frames.next() else {
        return Ok(map);
    };
    tracker.init(&first, initial)?;
    map.insert(0, Some(to_rectangle(initial, 0, ratio)?));

    let mut lost = 0usize;
    for (offset, frame) in frames.enumerate() {
        let frame_number = offset as FrameNumber + 1;
        let rect = match tracker.update(&frame) {
            Some(bbox) => Some(to_rectangle(bbox, frame_number, ratio)?),
            None => {
                lost += 1;
                None
            }
        };
        map.insert(frame_number, rect);
    }

    tracing::info!(
        "{} tracker covered {} frames ({} lost)",
        tracker.kind(),
        map.len(),
        lost
    );
    Ok(map)
}

fn to_rectangle(bbox: BoundingBox, frame: FrameNumber, ratio: f64) -> ReframeResult<Rectangle> {
    Rectangle::from_box(bbox, frame, ratio).map_err(|e| ReframeError::tracking(e.to_string()))
}

/// A tracking run packaged as a [`RectangleSource`].
pub struct TrackingSession<T: Tracker> {
    pub tracker: T,
    pub frames: Vec<T::Frame>,
    pub initial: BoundingBox,
    pub ratio: f64,
}

impl<T: Tracker> RectangleSource for TrackingSession<T> {
    fn produce_frame_to_rectangle_map(&mut self) -> ReframeResult<FrameMap> {
        let frames = std::mem::take(&mut self.frames);
        track_frames(&mut self.tracker, frames, self.initial, self.ratio)
    }
}

/// Tracker that replays recorded boxes. Frames are plain frame numbers.
#[derive(Debug, Clone, Default)]
pub struct ReplayTracker {
    boxes: BTreeMap<FrameNumber, BoundingBox>,
    kind: TrackerKind,
    initialized: bool,
}

impl ReplayTracker {
    pub fn new(kind: TrackerKind, boxes: BTreeMap<FrameNumber, BoundingBox>) -> Self {
        Self {
            boxes,
            kind,
            initialized: false,
        }
    }
}

impl Tracker for ReplayTracker {
    type Frame = FrameNumber;

    fn init(&mut self, _frame: &FrameNumber, initial: BoundingBox) -> ReframeResult<()> {
        if initial.width <= 0.0 || initial.height <= 0.0 {
            return Err(ReframeError::tracking("initial box has no area"));
        }
        self.initialized = true;
        Ok(())
    }

    fn update(&mut self, frame: &FrameNumber) -> Option<BoundingBox> {
        if !self.initialized {
            return None;
        }
        self.boxes.get(frame).copied()
    }

    fn kind(&self) -> TrackerKind {
        self.kind
    }
}

/// Scene detector that returns a recorded boundary list.
#[derive(Debug, Clone, Default)]
pub struct ReplaySceneDetector {
    boundaries: Vec<(FrameNumber, FrameNumber)>,
}

impl ReplaySceneDetector {
    pub fn new(boundaries: Vec<(FrameNumber, FrameNumber)>) -> Self {
        Self { boundaries }
    }

    /// Parse a JSON array of `[start, end]` pairs.
    pub fn from_json(json: &str) -> ReframeResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl SceneDetector for ReplaySceneDetector {
    fn detect(
        &self,
        path: &Path,
        threshold: f64,
    ) -> ReframeResult<Vec<(FrameNumber, FrameNumber)>> {
        tracing::debug!(
            "Replaying {} scenes for {:?} (threshold {threshold})",
            self.boundaries.len(),
            path
        );
        Ok(self.boundaries.clone())
    }
}

/// A recorded tracking log as a [`RectangleSource`].
#[derive(Debug, Clone, Default)]
pub struct TrackingLog {
    frames: FrameMap,
}

impl TrackingLog {
    pub fn new(frames: FrameMap) -> Self {
        Self { frames }
    }

    /// Parse a JSON tracking log. Rectangles without a `ratio` get `ratio`.
    pub fn from_json(json: &str, ratio: f64) -> ReframeResult<Self> {
        match parse_tracking_log(json, ratio) {
            Ok(frames) => Ok(Self::new(frames)),
            Err(TrackingLogError::Json(e)) => Err(ReframeError::Json(e)),
            Err(e) => Err(ReframeError::tracking(e.to_string())),
        }
    }
}

impl RectangleSource for TrackingLog {
    fn produce_frame_to_rectangle_map(&mut self) -> ReframeResult<FrameMap> {
        Ok(self.frames.clone())
    }
}
