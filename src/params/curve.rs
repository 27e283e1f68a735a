// src/params/curve.rs
// Piecewise-linear keyframe curves for bends, radius modulation and bevel profiles
// RELEVANT FILES:src/params/mod.rs,src/layout/mod.rs,src/bevel/profile.rs

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.value.is_finite()
    }
}

/// Keys sorted by time, evaluated with linear interpolation and clamped at
/// both ends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct Curve {
    keys: Vec<Keyframe>,
}

impl From<Vec<Keyframe>> for Curve {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::new(keys)
    }
}

impl From<Curve> for Vec<Keyframe> {
    fn from(curve: Curve) -> Self {
        curve.keys
    }
}

impl Curve {
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value), Keyframe::new(1.0, value)])
    }

    pub fn linear(start: f32, end: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, start), Keyframe::new(1.0, end)])
    }

    /// Insert keeping time order; returns the key's index.
    pub fn add_key(&mut self, time: f32, value: f32) -> usize {
        let index = self.keys.partition_point(|k| k.time <= time);
        self.keys.insert(index, Keyframe::new(time, value));
        index
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.keys.iter().all(Keyframe::is_finite)
    }

    pub fn evaluate(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        let upper = self.keys.partition_point(|k| k.time <= time);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        let t = (time - a.time) / span;
        a.value + (b.value - a.value) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_curve_evaluates_to_zero() {
        assert_eq!(Curve::default().evaluate(0.3), 0.0);
    }

    #[test]
    fn evaluation_interpolates_and_clamps() {
        let curve = Curve::new(vec![
            Keyframe::new(1.0, 2.0),
            Keyframe::new(0.0, 0.0),
            Keyframe::new(2.0, 0.0),
        ]);
        assert_eq!(curve.keys()[0].time, 0.0);
        assert!((curve.evaluate(0.5) - 1.0).abs() < 1e-6);
        assert!((curve.evaluate(1.5) - 1.0).abs() < 1e-6);
        assert_eq!(curve.evaluate(-3.0), 0.0);
        assert_eq!(curve.evaluate(9.0), 0.0);
    }

    #[test]
    fn add_key_keeps_order() {
        let mut curve = Curve::linear(0.0, 1.0);
        assert_eq!(curve.add_key(0.5, 5.0), 1);
        assert_eq!(curve.len(), 3);
        assert!((curve.evaluate(0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn deserializes_from_key_list() {
        let curve: Curve =
            serde_json::from_str(r#"[{"time":1.0,"value":3.0},{"time":0.0,"value":1.0}]"#)
                .unwrap();
        assert_eq!(curve.keys()[0], Keyframe::new(0.0, 1.0));
        assert!((curve.evaluate(0.5) - 2.0).abs() < 1e-6);
    }
}
