//! Named facial expressions as partial morph-target weight sets.

use super::data::BUILTIN_EXPRESSIONS;
use crate::animation::blink::{EYE_BLINK_LEFT, EYE_BLINK_RIGHT};
use crate::{MouthpieceError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// The empty expression every unknown id resolves to.
static NEUTRAL: Expression = Expression(BTreeMap::new());

static BUILTIN: Lazy<ExpressionCatalog> = Lazy::new(|| {
    let mut catalog = ExpressionCatalog::empty();
    for (id, weights) in BUILTIN_EXPRESSIONS {
        catalog.insert(*id, Expression::from_pairs(weights.iter().copied()));
    }
    debug!("Built-in expression catalog: {} entries", catalog.len());
    catalog
});

/// Partial morph-target weight map. Unlisted targets implicitly weigh 0.
///
/// Weights are kept in [0,1] and zero weights are never stored, so two
/// expressions that drive the face identically compare equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Expression(BTreeMap<String, f32>);

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an expression from `(morph target, weight)` pairs
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f32)>) -> Self {
        let mut expression = Self::new();
        for (target, weight) in pairs {
            expression.set(target, weight);
        }
        expression
    }

    /// Set a weight, clamping into [0,1]. Zero (or NaN) removes the target.
    pub fn set(&mut self, target: impl Into<String>, weight: f32) {
        let target = target.into();
        let weight = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
        if weight == 0.0 {
            self.0.remove(&target);
        } else {
            self.0.insert(target, weight);
        }
    }

    /// Target weight for a morph target, 0 when absent
    pub fn weight(&self, target: &str) -> f32 {
        self.0.get(target).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.0.contains_key(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Linear blend toward `other`: `self*(1-t) + other*t` over the union of keys.
    ///
    /// `t` is clamped to [0,1]; `t == 0` yields `self` and `t == 1` yields
    /// `other` exactly.
    pub fn blend(&self, other: &Expression, t: f32) -> Expression {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mut blended = Expression::new();
        for target in self.0.keys().chain(other.0.keys()) {
            if blended.contains(target) {
                continue;
            }
            let weight = self.weight(target) * (1.0 - t) + other.weight(target) * t;
            blended.set(target.as_str(), weight);
        }
        blended
    }

    /// Multiply every weight by `intensity`, clamped to [0,1]
    pub fn scaled(&self, intensity: f32) -> Expression {
        let intensity = if intensity.is_nan() { 0.0 } else { intensity.max(0.0) };
        Expression::from_pairs(self.iter().map(|(k, v)| (k, v * intensity)))
    }

    /// Snapshot live weights as an expression, e.g. while hand-tuning a face.
    ///
    /// Only weights above `threshold` are kept; blink targets are skipped
    /// because they belong to the blink overlay.
    pub fn capture<'a>(weights: impl IntoIterator<Item = (&'a str, f32)>, threshold: f32) -> Expression {
        Expression::from_pairs(
            weights
                .into_iter()
                .filter(|(name, _)| *name != EYE_BLINK_LEFT && *name != EYE_BLINK_RIGHT)
                .filter(|(_, weight)| *weight > threshold)
                // Two decimals is what an operator would paste back into a table
                .map(|(name, weight)| (name, (weight * 100.0).round() / 100.0)),
        )
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, f32>::deserialize(deserializer)?;
        Ok(Expression::from_pairs(raw))
    }
}

/// Process-wide expression table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ExpressionCatalog {
    entries: HashMap<String, Expression>,
}

impl ExpressionCatalog {
    /// The shared built-in catalog
    pub fn builtin() -> &'static ExpressionCatalog {
        &BUILTIN
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `{ "name": { "morphTarget": weight } }` and merge it over the built-ins
    pub fn from_json(json: &str) -> Result<Self> {
        let loaded: HashMap<String, Expression> = serde_json::from_str(json)?;
        let mut catalog = Self::builtin().clone();
        let count = loaded.len();
        for (id, expression) in loaded {
            catalog.insert(id, expression);
        }
        info!("Loaded {} expressions ({} total)", count, catalog.len());
        Ok(catalog)
    }

    /// Load a JSON expression file, see [`ExpressionCatalog::from_json`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MouthpieceError::IOError(format!("Failed to read {:?}: {}", path.as_ref(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, id: impl Into<String>, expression: Expression) {
        self.entries.insert(id.into(), expression);
    }

    /// Stored weights for `id`, or the empty expression when unknown
    pub fn lookup(&self, id: &str) -> &Expression {
        self.entries.get(id).unwrap_or(&NEUTRAL)
    }

    /// Blend two catalog entries; unknown ids act as neutral
    pub fn blend(&self, a: &str, b: &str, t: f32) -> Expression {
        self.lookup(a).blend(self.lookup(b), t)
    }

    /// Scale a catalog entry by `intensity`, clamped to [0,1]
    pub fn scale(&self, id: &str, intensity: f32) -> Expression {
        self.lookup(id).scaled(intensity)
    }

    /// Whether `id` names a catalog entry
    pub fn is_valid(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Sorted expression ids
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_id_is_neutral() {
        let catalog = ExpressionCatalog::builtin();
        assert!(catalog.lookup("ecstatic_overload").is_empty());
        assert!(catalog.lookup("default").is_empty());
        assert!(catalog.lookup("neutral").is_empty());
    }

    #[test]
    fn test_smile_weights() {
        let smile = ExpressionCatalog::builtin().lookup("smile");
        assert_eq!(smile.weight("mouthSmileLeft"), 0.8);
        assert_eq!(smile.weight("browInnerUp"), 0.15);
        assert_eq!(smile.weight("jawOpen"), 0.0);
    }

    #[test]
    fn test_blend_endpoints_are_exact() {
        let catalog = ExpressionCatalog::builtin();
        let names = catalog.names();
        for a in &names {
            for b in &names {
                assert_eq!(&catalog.blend(a, b, 0.0), catalog.lookup(a), "blend({a}, {b}, 0)");
                assert_eq!(&catalog.blend(a, b, 1.0), catalog.lookup(b), "blend({a}, {b}, 1)");
            }
        }
    }

    #[test]
    fn test_blend_midpoint() {
        let catalog = ExpressionCatalog::builtin();
        let mixed = catalog.blend("smile", "sad", 0.5);
        assert!((mixed.weight("mouthSmileLeft") - 0.4).abs() < 1e-6);
        assert!((mixed.weight("mouthFrownLeft") - 0.5).abs() < 1e-6);
        assert!((mixed.weight("browInnerUp") - 0.475).abs() < 1e-6);
    }

    #[test]
    fn test_blend_with_unknown_fades_out() {
        let catalog = ExpressionCatalog::builtin();
        let faded = catalog.blend("smile", "no_such_face", 0.5);
        assert!((faded.weight("mouthSmileRight") - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_scale_stays_in_unit_range() {
        let catalog = ExpressionCatalog::builtin();
        for name in catalog.names() {
            for intensity in [0.0, 0.2, 1.0, 1.6, 2.0, 100.0] {
                for (_, w) in catalog.scale(name, intensity).iter() {
                    assert!((0.0..=1.0).contains(&w));
                }
            }
        }
        assert!(catalog.scale("smile", 0.0).is_empty());
        assert_eq!(catalog.scale("sad", 2.0).weight("mouthFrownLeft"), 1.0);
    }

    #[test]
    fn test_set_clamps_and_drops_zero() {
        let mut e = Expression::new();
        e.set("jawOpen", 3.0);
        e.set("mouthClose", -1.0);
        e.set("cheekPuff", f32::NAN);
        assert_eq!(e.weight("jawOpen"), 1.0);
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn test_capture_skips_blink_and_small_weights() {
        let live = [
            ("eyeBlinkLeft", 1.0),
            ("jawOpen", 0.456),
            ("mouthSmileLeft", 0.005),
        ];
        let captured = Expression::capture(live, 0.01);
        assert_eq!(captured, Expression::from_pairs([("jawOpen", 0.46)]));
    }

    #[test]
    fn test_from_json_merges_over_builtin() {
        let catalog =
            ExpressionCatalog::from_json(r#"{"smug": {"mouthSmileLeft": 0.9, "jawOpen": 4}}"#)
                .unwrap();
        assert!(catalog.is_valid("smile"));
        assert_eq!(catalog.lookup("smug").weight("jawOpen"), 1.0);
        assert_eq!(catalog.len(), ExpressionCatalog::builtin().len() + 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ExpressionCatalog::from_json("[1,2,3]").is_err());
    }
}
