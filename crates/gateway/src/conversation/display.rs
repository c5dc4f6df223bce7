//! Projection of the emotion score onto the game client's face and gauge.

use serde::Serialize;

/// Game-client view of an emotion score: a coarse face bucket and a
/// 0–100 gauge value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayProjection {
    pub face_type: u8,
    pub display_score: u8,
}

impl DisplayProjection {
    pub fn from_emotion(emotion_score: u8) -> Self {
        let e = emotion_score.min(15);
        let face_type = match e {
            0..=4 => 0,
            5..=9 => 1,
            10..=12 => 2,
            _ => 3,
        };
        let display_score = (f64::from(e) / 15.0 * 100.0).round() as u8;
        Self {
            face_type,
            display_score,
        }
    }
}
