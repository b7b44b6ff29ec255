use std::collections::HashMap;

/// Exponential smoothing step: move `current` a fraction `speed` toward `target`
pub fn lerp(current: f32, target: f32, speed: f32) -> f32 {
    current + (target - current) * speed.clamp(0.0, 1.0)
}

/// Current interpolated weight per morph target, owned by the frame blender
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphWeightVector {
    weights: HashMap<String, f32>,
}

impl MorphWeightVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &str) -> f32 {
        self.weights.get(target).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, target: &str, weight: f32) {
        let weight = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
        match self.weights.get_mut(target) {
            Some(slot) => *slot = weight,
            None => {
                self.weights.insert(target.to_string(), weight);
            }
        }
    }

    /// Smooth one target toward `goal` and return the new weight
    pub fn approach(&mut self, target: &str, goal: f32, speed: f32) -> f32 {
        let next = lerp(self.get(target), goal, speed);
        self.set(target, next);
        self.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn clear(&mut self) {
        self.weights.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 1.0, 0.5), 0.5);
        assert_eq!(lerp(0.2, 0.2, 0.9), 0.2);
        assert_eq!(lerp(0.0, 1.0, 4.0), 1.0);
    }

    #[test]
    fn test_approach_converges_geometrically() {
        let mut weights = MorphWeightVector::new();
        for _ in 0..10 {
            weights.approach("jawOpen", 1.0, 0.1);
        }
        let expected = 1.0 - 0.9f32.powi(10);
        assert!((weights.get("jawOpen") - expected).abs() < 1e-5);
    }

    #[test]
    fn test_set_clamps() {
        let mut weights = MorphWeightVector::new();
        weights.set("a", 2.0);
        weights.set("b", f32::NAN);
        assert_eq!(weights.get("a"), 1.0);
        assert_eq!(weights.get("b"), 0.0);
        assert_eq!(weights.get("missing"), 0.0);
    }
}
