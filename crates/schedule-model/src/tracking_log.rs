//! JSON tracking logs: the recorded output of a tracking session.
//!
//! A log is a JSON array with one entry per tracked frame. An entry is
//! either a rectangle object, a `{"frame_number": N}` marker for a frame on
//! which the subject was lost, or `null`, which marks the frame after the
//! previous entry as lost (frame 0 if it comes first). Rectangles may omit
//! `ratio`, in which case the caller's ratio applies.

use serde::{Deserialize, Serialize};

use crate::geometry::{FrameNumber, Rectangle, RectangleError};
use crate::scene::FrameMap;

/// Reasons a tracking log cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum TrackingLogError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Rectangle(#[from] RectangleError),

    #[error("frame {frame} appears more than once in the tracking log")]
    DuplicateFrame { frame: FrameNumber },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LogEntry {
    Tracked(RectangleEntry),
    Lost(LostFrame),
}

#[derive(Debug, Deserialize)]
struct RectangleEntry {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    frame_number: FrameNumber,
    #[serde(default)]
    ratio: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LostFrame {
    frame_number: FrameNumber,
}

#[derive(Serialize)]
#[serde(untagged)]
enum LogRecord<'a> {
    Tracked(&'a Rectangle),
    Lost(LostFrame),
}

/// Parse a tracking log into a frame map.
///
/// `default_ratio` is used for rectangles that carry no `ratio` of their
/// own. A frame that appears twice is an error.
pub fn parse_tracking_log(json: &str, default_ratio: f64) -> Result<FrameMap, TrackingLogError> {
    let entries: Vec<Option<LogEntry>> = serde_json::from_str(json)?;
    let mut frames = FrameMap::new();
    let mut previous: Option<FrameNumber> = None;

    for entry in entries {
        let (frame, rect) = match entry {
            Some(LogEntry::Tracked(r)) => {
                let ratio = r.ratio.unwrap_or(default_ratio);
                let rect = Rectangle::new(r.x1, r.x2, r.y1, r.y2, r.frame_number, ratio)?;
                (r.frame_number, Some(rect))
            }
            Some(LogEntry::Lost(lost)) => (lost.frame_number, None),
            None => (previous.map_or(0, |frame| frame + 1), None),
        };
        if frames.insert(frame, rect).is_some() {
            return Err(TrackingLogError::DuplicateFrame { frame });
        }
        previous = Some(frame);
    }
    Ok(frames)
}

/// Serialize a frame map as a tracking log, in frame order.
pub fn serialize_tracking_log(frames: &FrameMap) -> Result<String, serde_json::Error> {
    let records: Vec<LogRecord<'_>> = frames
        .iter()
        .map(|(&frame_number, rect)| match rect {
            Some(rect) => LogRecord::Tracked(rect),
            None => LogRecord::Lost(LostFrame { frame_number }),
        })
        .collect();
    serde_json::to_string(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect_json(frame: FrameNumber) -> String {
        format!(
            r#"{{"x1": 10.0, "x2": 20.0, "y1": 0.0, "y2": 40.0, "frame_number": {frame}, "ratio": 5.0}}"#
        )
    }

    #[test]
    fn test_parse_log_with_lost_frames() {
        let json = r#"[
            {"x1": 10.0, "x2": 20.0, "y1": 0.0, "y2": 40.0, "frame_number": 0, "ratio": 5.0},
            null,
            {"frame_number": 2},
            {"x1": 12.0, "x2": 22.0, "y1": 0.0, "y2": 40.0, "frame_number": 3, "ratio": 5.0}
        ]"#;
        let frames = parse_tracking_log(json, 5.0).unwrap();
        assert_eq!(frames.len(), 4);
        assert!(frames[&0].is_some());
        assert!(frames[&1].is_none());
        assert!(frames[&2].is_none());
        assert_eq!(frames[&3].unwrap().center().x, 85);
    }

    #[test]
    fn test_null_follows_previous_frame() {
        let json = format!(
            "[{}, {}, null, {}]",
            rect_json(100),
            rect_json(101),
            rect_json(103)
        );
        let frames = parse_tracking_log(&json, 5.0).unwrap();
        assert_eq!(frames.keys().copied().collect::<Vec<_>>(), vec![100, 101, 102, 103]);
        assert!(frames[&102].is_none());
        assert!(frames[&103].is_some());
    }

    #[test]
    fn test_leading_null_is_frame_zero() {
        let json = format!("[null, {}]", rect_json(1));
        let frames = parse_tracking_log(&json, 5.0).unwrap();
        assert!(frames[&0].is_none());
        assert!(frames[&1].is_some());
    }

    #[test]
    fn test_duplicate_frame_is_rejected() {
        let json = format!("[{}, {}, null, {}]", rect_json(0), rect_json(1), rect_json(2));
        assert!(matches!(
            parse_tracking_log(&json, 5.0),
            Err(TrackingLogError::DuplicateFrame { frame: 2 })
        ));

        let json = format!(r#"[{}, {{"frame_number": 0}}]"#, rect_json(0));
        assert!(matches!(
            parse_tracking_log(&json, 5.0),
            Err(TrackingLogError::DuplicateFrame { frame: 0 })
        ));
    }

    #[test]
    fn test_missing_ratio_uses_default() {
        let json = r#"[{"x1": 10.0, "x2": 20.0, "y1": 0.0, "y2": 40.0, "frame_number": 7}]"#;
        let frames = parse_tracking_log(json, 2.0).unwrap();
        let rect = frames[&7].unwrap();
        assert_eq!(rect.ratio(), 2.0);
        assert_eq!(rect.center().x, 30);
    }

    #[test]
    fn test_invalid_rectangle_is_rejected() {
        let json = r#"[{"x1": 30.0, "x2": 20.0, "y1": 0.0, "y2": 40.0, "frame_number": 0, "ratio": 5.0}]"#;
        assert!(matches!(
            parse_tracking_log(json, 5.0),
            Err(TrackingLogError::Rectangle(RectangleError::Inverted { .. }))
        ));
    }

    #[test]
    fn test_serialized_log_parses_back() {
        let mut frames = FrameMap::new();
        frames.insert(4, Some(Rectangle::new(1.0, 2.0, 3.0, 4.0, 4, 2.0).unwrap()));
        frames.insert(9, None);
        let json = serialize_tracking_log(&frames).unwrap();
        assert_eq!(parse_tracking_log(&json, 1.0).unwrap(), frames);
    }

    proptest! {
        #[test]
        fn prop_nulls_fill_consecutive_frames(
            start in 0u64..10_000,
            lost in prop::collection::vec(any::<bool>(), 1..40),
        ) {
            let entries: Vec<String> = lost
                .iter()
                .enumerate()
                .map(|(i, &is_lost)| {
                    if is_lost && i > 0 {
                        "null".to_string()
                    } else {
                        rect_json(start + i as u64)
                    }
                })
                .collect();
            let frames = parse_tracking_log(&format!("[{}]", entries.join(",")), 5.0).unwrap();

            prop_assert_eq!(frames.len(), lost.len());
            for (i, &is_lost) in lost.iter().enumerate() {
                let frame = start + i as u64;
                prop_assert_eq!(frames[&frame].is_none(), is_lost && i > 0);
            }
        }
    }
}
