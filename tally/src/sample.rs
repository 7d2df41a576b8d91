use serde::{Deserialize, Serialize};

/// A record that can be tallied: which player was to move and the value target for that position.
pub trait Sample {
    fn current_player(&self) -> i32;

    fn value(&self) -> f64;
}

impl<S: Sample + ?Sized> Sample for &S {
    fn current_player(&self) -> i32 {
        (**self).current_player()
    }

    fn value(&self) -> f64 {
        (**self).value()
    }
}

/// One self-play training example as written to a samples file.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TrainingSample {
    /// Cell contents of the board, row major. 1 for the first mover, -1 for the second, 0 when empty.
    #[serde(default)]
    pub board: Vec<Vec<i32>>,
    /// Visit distribution of the search at this position.
    #[serde(default)]
    pub policy: Vec<f64>,
    pub value: f64,
    /// 1 when the first mover was to play, -1 for the second.
    pub current_player: i32,
}

impl TrainingSample {
    pub fn new(current_player: i32, value: f64) -> Self {
        Self {
            board: Vec::new(),
            policy: Vec::new(),
            value,
            current_player,
        }
    }

    pub fn with_position(mut self, board: Vec<Vec<i32>>, policy: Vec<f64>) -> Self {
        self.board = board;
        self.policy = policy;
        self
    }
}

impl Sample for TrainingSample {
    fn current_player(&self) -> i32 {
        self.current_player
    }

    fn value(&self) -> f64 {
        self.value
    }
}

impl Sample for (i32, f64) {
    fn current_player(&self) -> i32 {
        self.0
    }

    fn value(&self) -> f64 {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_written_shape() {
        let line = r#"{"board": [[1, 0, 0], [0, -1, 0], [0, 0, 0]], "policy": [0.5, 0.5], "value": -0.720000, "current_player": 1}"#;
        let sample: TrainingSample = serde_json::from_str(line).unwrap();

        assert_eq!(sample.current_player(), 1);
        assert_eq!(sample.value(), -0.72);
        assert_eq!(sample.board[1], vec![0, -1, 0]);
        assert_eq!(sample.policy.len(), 2);
    }

    #[test]
    fn test_deserialize_without_position() {
        let sample: TrainingSample =
            serde_json::from_str(r#"{"current_player": -1, "value": 0}"#).unwrap();

        assert_eq!(sample, TrainingSample::new(-1, 0.0));
    }

    #[test]
    fn test_deserialize_missing_value_fails() {
        let res = serde_json::from_str::<TrainingSample>(r#"{"current_player": -1}"#);

        assert!(res.is_err());
    }
}
