//! Renderer-side morph target slots.
//!
//! The blender only sees a flat name -> weight mapping; how that spreads
//! over meshes is up to the sink.

use std::collections::HashMap;

pub trait MorphTargetSink {
    /// Every morph target name the renderer exposes
    fn target_names(&self) -> Vec<String>;

    /// Current weight, `None` if no mesh has this target
    fn weight(&self, name: &str) -> Option<f32>;

    /// Write a weight; unknown names are ignored
    fn set_weight(&mut self, name: &str, weight: f32);
}

/// One mesh's morph target dictionary and influence slots
#[derive(Debug, Clone, Default)]
pub struct MeshMorphTargets {
    name: String,
    dictionary: HashMap<String, usize>,
    influences: Vec<f32>,
}

impl MeshMorphTargets {
    pub fn new<S: Into<String>>(name: impl Into<String>, targets: impl IntoIterator<Item = S>) -> Self {
        let mut dictionary = HashMap::new();
        for target in targets {
            let index = dictionary.len();
            dictionary.entry(target.into()).or_insert(index);
        }
        Self {
            name: name.into(),
            influences: vec![0.0; dictionary.len()],
            dictionary,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn influences(&self) -> &[f32] {
        &self.influences
    }
}

impl MorphTargetSink for MeshMorphTargets {
    fn target_names(&self) -> Vec<String> {
        let mut names: Vec<(usize, &String)> = self.dictionary.iter().map(|(k, v)| (*v, k)).collect();
        names.sort_unstable();
        names.into_iter().map(|(_, k)| k.clone()).collect()
    }

    fn weight(&self, name: &str) -> Option<f32> {
        self.dictionary.get(name).and_then(|&i| self.influences.get(i).copied())
    }

    fn set_weight(&mut self, name: &str, weight: f32) {
        if let Some(&i) = self.dictionary.get(name) {
            if let Some(slot) = self.influences.get_mut(i) {
                *slot = weight;
            }
        }
    }
}

/// All skinned meshes of an avatar (head, teeth, ...). A write reaches every
/// mesh that has the target.
#[derive(Debug, Clone, Default)]
pub struct AvatarRig {
    meshes: Vec<MeshMorphTargets>,
}

impl AvatarRig {
    pub fn new(meshes: Vec<MeshMorphTargets>) -> Self {
        Self { meshes }
    }

    pub fn add_mesh(&mut self, mesh: MeshMorphTargets) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> &[MeshMorphTargets] {
        &self.meshes
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshMorphTargets> {
        self.meshes.iter().find(|m| m.name == name)
    }
}

impl MorphTargetSink for AvatarRig {
    fn target_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for mesh in &self.meshes {
            for name in mesh.target_names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    fn weight(&self, name: &str) -> Option<f32> {
        self.meshes.iter().find_map(|m| m.weight(name))
    }

    fn set_weight(&mut self, name: &str, weight: f32) {
        for mesh in &mut self.meshes {
            mesh.set_weight(name, weight);
        }
    }
}

/// ARKit blend shapes plus Oculus visemes, as exported by Ready Player Me avatars
pub const ARKIT_WITH_VISEMES: &[&str] = &[
    "browDownLeft", "browDownRight", "browInnerUp", "browOuterUpLeft", "browOuterUpRight",
    "cheekPuff", "cheekSquintLeft", "cheekSquintRight", "eyeBlinkLeft", "eyeBlinkRight",
    "eyeLookDownLeft", "eyeLookDownRight", "eyeLookInLeft", "eyeLookInRight", "eyeLookOutLeft",
    "eyeLookOutRight", "eyeLookUpLeft", "eyeLookUpRight", "eyeSquintLeft", "eyeSquintRight",
    "eyeWideLeft", "eyeWideRight", "jawForward", "jawLeft", "jawOpen", "jawRight", "mouthClose",
    "mouthDimpleLeft", "mouthDimpleRight", "mouthFrownLeft", "mouthFrownRight", "mouthFunnel",
    "mouthLeft", "mouthLowerDownLeft", "mouthLowerDownRight", "mouthPressLeft", "mouthPressRight",
    "mouthPucker", "mouthRight", "mouthRollLower", "mouthRollUpper", "mouthShrugLower",
    "mouthShrugUpper", "mouthSmileLeft", "mouthSmileRight", "mouthStretchLeft",
    "mouthStretchRight", "mouthUpperUpLeft", "mouthUpperUpRight", "noseSneerLeft",
    "noseSneerRight", "tongueOut", "viseme_sil", "viseme_PP", "viseme_FF", "viseme_TH",
    "viseme_DD", "viseme_kk", "viseme_CH", "viseme_SS", "viseme_nn", "viseme_RR", "viseme_aa",
    "viseme_E", "viseme_I", "viseme_O", "viseme_U",
];

impl AvatarRig {
    /// Head and teeth meshes of a stock ARKit avatar
    pub fn arkit_head() -> Self {
        let teeth: Vec<&str> = ARKIT_WITH_VISEMES
            .iter()
            .copied()
            .filter(|n| n.starts_with("jaw") || n.starts_with("viseme_") || *n == "tongueOut")
            .collect();
        Self::new(vec![
            MeshMorphTargets::new("Wolf3D_Head", ARKIT_WITH_VISEMES.iter().copied()),
            MeshMorphTargets::new("Wolf3D_Teeth", teeth),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_target_is_noop() {
        let mut mesh = MeshMorphTargets::new("head", ["jawOpen", "mouthSmileLeft"]);
        mesh.set_weight("noSuchShape", 1.0);
        assert_eq!(mesh.weight("noSuchShape"), None);
        assert_eq!(mesh.influences(), &[0.0, 0.0]);
    }

    #[test]
    fn test_dictionary_order_is_preserved() {
        let mesh = MeshMorphTargets::new("head", ["b", "a", "b", "c"]);
        assert_eq!(mesh.target_names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_rig_writes_every_mesh_with_target() {
        let mut rig = AvatarRig::arkit_head();
        rig.set_weight("jawOpen", 0.7);
        rig.set_weight("browInnerUp", 0.3);
        assert_eq!(rig.mesh("Wolf3D_Head").unwrap().weight("jawOpen"), Some(0.7));
        assert_eq!(rig.mesh("Wolf3D_Teeth").unwrap().weight("jawOpen"), Some(0.7));
        assert_eq!(rig.mesh("Wolf3D_Teeth").unwrap().weight("browInnerUp"), None);
        assert_eq!(rig.target_names().len(), ARKIT_WITH_VISEMES.len());
    }
}
