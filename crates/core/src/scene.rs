use std::sync::{Arc, Mutex};

use simview_protocol::{Scene, Shape};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a snapshot document: a JSON array of shape records.
///
/// A record that fails to decode (unknown `type`, malformed fields) is
/// skipped on its own; only a document that is not a JSON array at all is
/// an error. This mirrors the renderer's shape-by-shape skip semantics.
pub fn decode_snapshot(data: &[u8]) -> Result<Scene, SnapshotError> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(data)?;
    let mut shapes = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Shape>(record) {
            Ok(shape) => shapes.push(shape),
            Err(err) => log::debug!("skipping shape record {index}: {err}"),
        }
    }
    Ok(Scene { shapes })
}

/// Holds the latest complete scene snapshot.
///
/// A cloneable handle around an immutable snapshot behind a pointer swap:
/// the transport callback calls [`replace`](Self::replace) while a draw is
/// in progress and the render loop still sees either the old or the new
/// scene in full, never a partial one. Snapshots are never edited in
/// place, so readers keep their `Arc` for the duration of a frame.
#[derive(Debug, Clone, Default)]
pub struct SceneModel {
    current: Arc<Mutex<Arc<Scene>>>,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swap in a new snapshot, discarding the old one.
    pub fn replace(&self, scene: Scene) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Arc::new(scene);
    }

    /// The latest complete snapshot; empty before the first delivery.
    pub fn current(&self) -> Arc<Scene> {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&current)
    }

    /// Decode and install a snapshot document. On decode failure the
    /// previous snapshot is retained and the failure is logged — the model
    /// is never left half-updated.
    pub fn apply_snapshot(&self, data: &[u8]) -> Result<usize, SnapshotError> {
        match decode_snapshot(data) {
            Ok(scene) => {
                let count = scene.len();
                self.replace(scene);
                Ok(count)
            }
            Err(err) => {
                log::warn!("discarding malformed snapshot: {err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simview_protocol::Point;

    fn circle_snapshot(x: f64) -> String {
        format!(r#"[{{"type": "circle", "center": [{x}, 0.0], "radius": 1.0, "fill_color": "red"}}]"#)
    }

    #[test]
    fn starts_empty() {
        let model = SceneModel::new();
        assert!(model.current().is_empty());
    }

    #[test]
    fn replacement_is_wholesale() {
        let model = SceneModel::new();
        for i in 0..10 {
            model
                .apply_snapshot(circle_snapshot(f64::from(i)).as_bytes())
                .unwrap();
        }
        // Only the last snapshot is visible, never a mix.
        let scene = model.current();
        assert_eq!(scene.len(), 1);
        let Shape::Circle { center, .. } = scene.shapes[0] else {
            panic!("expected circle");
        };
        assert_eq!(center, Point::new(9.0, 0.0));
    }

    #[test]
    fn malformed_snapshot_retains_previous_scene() {
        let model = SceneModel::new();
        model.apply_snapshot(circle_snapshot(3.0).as_bytes()).unwrap();
        assert!(model.apply_snapshot(b"{not json").is_err());
        assert!(model.apply_snapshot(b"{\"type\": \"circle\"}").is_err()); // not an array
        let scene = model.current();
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn unknown_and_malformed_records_are_skipped_individually() {
        let model = SceneModel::new();
        let snapshot = r#"[
            {"type": "circle", "center": [0, 0], "radius": 0.5, "fill_color": "orange"},
            {"type": "hologram", "center": [1, 1]},
            {"type": "circle", "center": "oops", "radius": 0.5},
            {"type": "segment", "p1": [0, 0], "p2": [1, 1], "color": "black"}
        ]"#;
        let kept = model.apply_snapshot(snapshot.as_bytes()).unwrap();
        assert_eq!(kept, 2);
        let scene = model.current();
        assert!(matches!(scene.shapes[0], Shape::Circle { .. }));
        assert!(matches!(scene.shapes[1], Shape::Segment { .. }));
    }

    #[test]
    fn snapshots_swap_atomically_across_clones() {
        let model = SceneModel::new();
        let reader = model.clone();
        let held = reader.current(); // borrowed for a frame
        model.apply_snapshot(circle_snapshot(1.0).as_bytes()).unwrap();
        assert!(held.is_empty()); // the frame keeps its snapshot
        assert_eq!(reader.current().len(), 1);
    }
}
