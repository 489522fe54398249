use serde::{Deserialize, Serialize};

/// A control command emitted upstream on the bidirectional channel.
///
/// Serialized as a named event with its payload fields, e.g.
/// `{"event": "set_goal", "x": 1.5, "y": -2.0}`. The transport that
/// actually delivers these to the simulator is an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ControlIntent {
    /// Place a new obstacle at the given world coordinate.
    AddObstacle { x: f64, y: f64 },
    /// Move the planner's goal to the given world coordinate.
    SetGoal { x: f64, y: f64 },
    /// Switch the active search algorithm by name.
    SelectAlgorithm { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_named_event() {
        let intent = ControlIntent::AddObstacle { x: 1.5, y: -2.0 };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["event"], "add_obstacle");
        assert_eq!(json["x"], 1.5);
        assert_eq!(json["y"], -2.0);
    }

    #[test]
    fn algorithm_selection_carries_name() {
        let intent = ControlIntent::SelectAlgorithm {
            name: "a_star_search".to_string(),
        };
        let json = serde_json::to_string(&intent).unwrap();
        assert!(json.contains("\"select_algorithm\""));
        assert!(json.contains("a_star_search"));
    }
}
