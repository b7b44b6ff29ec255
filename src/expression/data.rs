//! Built-in facial expression table (ARKit blend shape names).

/// `(expression id, [(morph target, weight)])`
pub type ExpressionEntry = (&'static str, &'static [(&'static str, f32)]);

pub const BUILTIN_EXPRESSIONS: &[ExpressionEntry] = &[
    ("default", &[]),
    (
        "smile",
        &[
            ("browInnerUp", 0.15),
            ("eyeSquintLeft", 0.35),
            ("eyeSquintRight", 0.35),
            ("mouthSmileLeft", 0.8),
            ("mouthSmileRight", 0.8),
            ("mouthDimpleLeft", 0.4),
            ("mouthDimpleRight", 0.4),
            ("cheekSquintLeft", 0.3),
            ("cheekSquintRight", 0.3),
        ],
    ),
    (
        "sad",
        &[
            ("browInnerUp", 0.8),
            ("browDownLeft", 0.4),
            ("browDownRight", 0.4),
            ("eyeSquintLeft", 0.6),
            ("eyeSquintRight", 0.6),
            ("eyeLookDownLeft", 0.7),
            ("eyeLookDownRight", 0.7),
            ("mouthFrownLeft", 1.0),
            ("mouthFrownRight", 1.0),
            ("mouthLowerDownLeft", 0.6),
            ("mouthLowerDownRight", 0.6),
            ("mouthShrugLower", 0.4),
        ],
    ),
    (
        "angry",
        &[
            ("browDownLeft", 1.0),
            ("browDownRight", 1.0),
            ("eyeSquintLeft", 0.8),
            ("eyeSquintRight", 0.8),
            ("noseSneerLeft", 0.7),
            ("noseSneerRight", 0.7),
            ("mouthFrownLeft", 0.6),
            ("mouthFrownRight", 0.6),
            ("jawForward", 0.3),
            ("cheekSquintLeft", 0.5),
            ("cheekSquintRight", 0.5),
        ],
    ),
    (
        "surprised",
        &[
            ("eyeWideLeft", 1.0),
            ("eyeWideRight", 1.0),
            ("browInnerUp", 1.0),
            ("browOuterUpLeft", 0.8),
            ("browOuterUpRight", 0.8),
            ("jawOpen", 0.6),
            ("mouthFunnel", 0.4),
            ("mouthUpperUpLeft", 0.5),
            ("mouthUpperUpRight", 0.5),
        ],
    ),
    (
        "fear",
        &[
            ("eyeWideLeft", 1.0),
            ("eyeWideRight", 1.0),
            ("browInnerUp", 1.0),
            ("browOuterUpLeft", 1.0),
            ("browOuterUpRight", 1.0),
            ("jawOpen", 0.4),
            ("mouthFunnel", 0.3),
            ("mouthUpperUpLeft", 0.8),
            ("mouthUpperUpRight", 0.8),
            ("eyeLookUpLeft", 0.2),
            ("eyeLookUpRight", 0.2),
        ],
    ),
    (
        "disgusted",
        &[
            ("noseSneerLeft", 1.0),
            ("noseSneerRight", 1.0),
            ("mouthShrugUpper", 0.8),
            ("eyeSquintLeft", 0.7),
            ("eyeSquintRight", 0.7),
            ("browDownLeft", 0.5),
            ("browDownRight", 0.5),
            ("mouthFrownLeft", 0.4),
            ("mouthFrownRight", 0.4),
            ("cheekSquintLeft", 0.6),
            ("cheekSquintRight", 0.6),
        ],
    ),
    (
        "joy",
        &[
            ("mouthSmileLeft", 0.8),
            ("mouthSmileRight", 0.8),
            ("eyeSquintLeft", 0.9),
            ("eyeSquintRight", 0.9),
            ("cheekSquintLeft", 0.8),
            ("cheekSquintRight", 0.8),
            ("mouthDimpleLeft", 0.8),
            ("mouthDimpleRight", 0.8),
            ("browOuterUpLeft", 0.4),
            ("browOuterUpRight", 0.4),
            ("jawOpen", 0.3),
        ],
    ),
    (
        "wink",
        &[
            ("eyeBlinkLeft", 1.0),
            ("mouthSmileLeft", 0.3),
            ("mouthSmileRight", 0.3),
        ],
    ),
    (
        "winkRight",
        &[
            ("eyeBlinkRight", 1.0),
            ("mouthSmileLeft", 0.3),
            ("mouthSmileRight", 0.3),
        ],
    ),
    (
        "sleepy",
        &[
            ("eyeBlinkLeft", 0.7),
            ("eyeBlinkRight", 0.7),
            ("browDownLeft", 0.5),
            ("browDownRight", 0.5),
            ("eyeLookDownLeft", 0.3),
            ("eyeLookDownRight", 0.3),
        ],
    ),
    (
        "tired",
        &[
            ("eyeBlinkLeft", 0.6),
            ("eyeBlinkRight", 0.6),
            ("browDownLeft", 0.8),
            ("browDownRight", 0.8),
            ("eyeLookDownLeft", 0.4),
            ("eyeLookDownRight", 0.4),
            ("mouthFrownLeft", 0.3),
            ("mouthFrownRight", 0.3),
        ],
    ),
    (
        "alert",
        &[
            ("eyeWideLeft", 0.8),
            ("eyeWideRight", 0.8),
            ("browOuterUpLeft", 0.5),
            ("browOuterUpRight", 0.5),
        ],
    ),
    (
        "lookUp",
        &[
            ("eyeLookUpLeft", 1.0),
            ("eyeLookUpRight", 1.0),
            ("browOuterUpLeft", 0.3),
            ("browOuterUpRight", 0.3),
        ],
    ),
    (
        "lookDown",
        &[
            ("eyeLookDownLeft", 1.0),
            ("eyeLookDownRight", 1.0),
            ("browDownLeft", 0.2),
            ("browDownRight", 0.2),
        ],
    ),
    (
        "lookLeft",
        &[
            ("eyeLookOutLeft", 1.0),
            ("eyeLookInRight", 1.0),
        ],
    ),
    (
        "lookRight",
        &[
            ("eyeLookInLeft", 1.0),
            ("eyeLookOutRight", 1.0),
        ],
    ),
    (
        "eyeRoll",
        &[
            ("eyeLookUpLeft", 1.0),
            ("eyeLookUpRight", 1.0),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
            ("browDownLeft", 0.3),
            ("browDownRight", 0.3),
        ],
    ),
    (
        "crossEyed",
        &[
            ("eyeLookInLeft", 1.0),
            ("eyeLookInRight", 1.0),
        ],
    ),
    (
        "stare",
        &[
            ("eyeWideLeft", 1.0),
            ("eyeWideRight", 1.0),
            ("browInnerUp", 0.3),
            ("browOuterUpLeft", 0.4),
            ("browOuterUpRight", 0.4),
        ],
    ),
    (
        "confused",
        &[
            ("browInnerUp", 0.6),
            ("browDownLeft", 0.3),
            ("browOuterUpRight", 0.7),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
            ("mouthLeft", 0.4),
        ],
    ),
    (
        "skeptical",
        &[
            ("browDownLeft", 0.6),
            ("browOuterUpRight", 1.0),
            ("eyeSquintLeft", 0.5),
            ("mouthLeft", 0.3),
        ],
    ),
    (
        "worried",
        &[
            ("browInnerUp", 1.0),
            ("browDownLeft", 0.2),
            ("browDownRight", 0.2),
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.4),
            ("mouthFrownLeft", 0.4),
            ("mouthFrownRight", 0.4),
        ],
    ),
    (
        "thoughtful",
        &[
            ("browDownLeft", 0.4),
            ("browDownRight", 0.4),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
            ("mouthLeft", 0.2),
        ],
    ),
    (
        "determined",
        &[
            ("browDownLeft", 1.0),
            ("browDownRight", 1.0),
            ("eyeSquintLeft", 0.5),
            ("eyeSquintRight", 0.5),
            ("mouthPressLeft", 0.7),
            ("mouthPressRight", 0.7),
            ("jawForward", 0.2),
        ],
    ),
    (
        "focused",
        &[
            ("browDownLeft", 0.7),
            ("browDownRight", 0.7),
            ("eyeSquintLeft", 0.6),
            ("eyeSquintRight", 0.6),
            ("mouthPressLeft", 0.3),
            ("mouthPressRight", 0.3),
        ],
    ),
    (
        "concerned",
        &[
            ("browInnerUp", 0.8),
            ("browDownLeft", 0.4),
            ("browDownRight", 0.4),
            ("eyeSquintLeft", 0.5),
            ("eyeSquintRight", 0.5),
            ("mouthFrownLeft", 0.5),
            ("mouthFrownRight", 0.5),
        ],
    ),
    (
        "relaxed",
        &[
            ("browOuterUpLeft", 0.3),
            ("browOuterUpRight", 0.3),
            ("eyeBlinkLeft", 0.2),
            ("eyeBlinkRight", 0.2),
            ("mouthSmileLeft", 0.2),
            ("mouthSmileRight", 0.2),
        ],
    ),
    (
        "kiss",
        &[
            ("mouthPucker", 1.0),
            ("mouthFunnel", 0.3),
            ("eyeBlinkLeft", 0.4),
            ("eyeBlinkRight", 0.4),
        ],
    ),
    (
        "whistle",
        &[
            ("mouthPucker", 0.8),
            ("mouthFunnel", 0.6),
            ("jawOpen", 0.2),
            ("cheekSquintLeft", 0.2),
            ("cheekSquintRight", 0.2),
        ],
    ),
    (
        "smirk",
        &[
            ("mouthSmileLeft", 0.8),
            ("mouthDimpleLeft", 0.6),
            ("eyeSquintLeft", 0.3),
        ],
    ),
    (
        "grin",
        &[
            ("mouthSmileLeft", 1.0),
            ("mouthSmileRight", 1.0),
            ("mouthStretchLeft", 0.5),
            ("mouthStretchRight", 0.5),
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.4),
            ("jawOpen", 0.2),
        ],
    ),
    (
        "pout",
        &[
            ("mouthPucker", 0.5),
            ("mouthLowerDownLeft", 0.8),
            ("mouthLowerDownRight", 0.8),
            ("browInnerUp", 0.3),
            ("mouthFrownLeft", 0.3),
            ("mouthFrownRight", 0.3),
        ],
    ),
    (
        "ooh",
        &[
            ("mouthFunnel", 1.0),
            ("jawOpen", 0.4),
            ("eyeWideLeft", 0.2),
            ("eyeWideRight", 0.2),
        ],
    ),
    (
        "ahh",
        &[
            ("jawOpen", 1.0),
            ("mouthOpen", 0.8),
            ("browOuterUpLeft", 0.2),
            ("browOuterUpRight", 0.2),
        ],
    ),
    (
        "yawn",
        &[
            ("jawOpen", 1.0),
            ("mouthFunnel", 0.3),
            ("eyeBlinkLeft", 0.8),
            ("eyeBlinkRight", 0.8),
            ("browDownLeft", 0.5),
            ("browDownRight", 0.5),
        ],
    ),
    (
        "grimace",
        &[
            ("mouthStretchLeft", 0.8),
            ("mouthStretchRight", 0.8),
            ("eyeSquintLeft", 0.6),
            ("eyeSquintRight", 0.6),
            ("browDownLeft", 0.4),
            ("browDownRight", 0.4),
        ],
    ),
    (
        "sealed",
        &[
            ("mouthPressLeft", 0.5),
            ("mouthPressRight", 0.5),
            ("mouthClose", 0.19),
        ],
    ),
    (
        "tongueOut",
        &[
            ("jawOpen", 0.8),
            ("tongueOut", 0.5),
            ("mouthSmileLeft", 0.4),
            ("mouthSmileRight", 0.4),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
            ("mouthClose", 0.19),
        ],
    ),
    (
        "drool",
        &[
            ("jawOpen", 0.6),
            ("mouthOpen", 0.5),
            ("eyeBlinkLeft", 0.4),
            ("eyeBlinkRight", 0.4),
        ],
    ),
    (
        "sigh",
        &[
            ("jawOpen", 0.3),
            ("mouthFunnel", 0.4),
            ("eyeBlinkLeft", 0.3),
            ("eyeBlinkRight", 0.3),
            ("browDownLeft", 0.2),
            ("browDownRight", 0.2),
        ],
    ),
    (
        "shush",
        &[
            ("mouthPucker", 0.6),
            ("eyeWideLeft", 0.3),
            ("eyeWideRight", 0.3),
            ("browInnerUp", 0.2),
        ],
    ),
    (
        "raspberry",
        &[
            ("jawOpen", 0.8),
            ("mouthClose", 0.19),
            ("tongueOut", 0.9),
            ("eyeSquintLeft", 0.8),
            ("eyeSquintRight", 0.8),
            ("mouthStretchLeft", 0.5),
            ("mouthStretchRight", 0.5),
        ],
    ),
    (
        "chipmunk",
        &[
            ("cheekPuff", 0.8),
            ("mouthClose", 0.4),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
        ],
    ),
    (
        "suckedCheeks",
        &[
            ("cheekSquintLeft", 1.0),
            ("cheekSquintRight", 1.0),
            ("mouthPucker", 0.4),
        ],
    ),
    (
        "dimples",
        &[
            ("mouthSmileLeft", 0.8),
            ("mouthSmileRight", 0.8),
            ("mouthDimpleLeft", 0.6),
            ("mouthDimpleRight", 0.6),
            ("cheekSquintLeft", 0.5),
            ("cheekSquintRight", 0.5),
        ],
    ),
    (
        "laughing",
        &[
            ("mouthSmileLeft", 1.0),
            ("mouthSmileRight", 1.0),
            ("jawOpen", 0.8),
            ("eyeSquintLeft", 1.0),
            ("eyeSquintRight", 1.0),
            ("cheekSquintLeft", 1.0),
            ("cheekSquintRight", 1.0),
            ("mouthDimpleLeft", 1.0),
            ("mouthDimpleRight", 1.0),
            ("browOuterUpLeft", 0.4),
            ("browOuterUpRight", 0.4),
        ],
    ),
    (
        "giggling",
        &[
            ("mouthSmileLeft", 0.7),
            ("mouthSmileRight", 0.7),
            ("jawOpen", 0.3),
            ("eyeSquintLeft", 0.6),
            ("eyeSquintRight", 0.6),
            ("cheekSquintLeft", 0.5),
            ("cheekSquintRight", 0.5),
            ("mouthDimpleLeft", 0.6),
            ("mouthDimpleRight", 0.6),
        ],
    ),
    (
        "crying",
        &[
            ("mouthFrownLeft", 1.0),
            ("mouthFrownRight", 1.0),
            ("browInnerUp", 1.0),
            ("eyeSquintLeft", 1.0),
            ("eyeSquintRight", 1.0),
            ("jawOpen", 0.5),
            ("mouthShrugLower", 0.8),
            ("mouthLowerDownLeft", 1.0),
            ("mouthLowerDownRight", 1.0),
        ],
    ),
    (
        "terrified",
        &[
            ("eyeWideLeft", 1.0),
            ("eyeWideRight", 1.0),
            ("browInnerUp", 1.0),
            ("browOuterUpLeft", 1.0),
            ("browOuterUpRight", 1.0),
            ("jawOpen", 1.0),
            ("mouthFunnel", 0.3),
            ("mouthUpperUpLeft", 1.0),
            ("mouthUpperUpRight", 1.0),
        ],
    ),
    (
        "frustrated",
        &[
            ("browDownLeft", 0.8),
            ("browDownRight", 0.8),
            ("eyeSquintLeft", 0.7),
            ("eyeSquintRight", 0.7),
            ("mouthFrownLeft", 0.6),
            ("mouthFrownRight", 0.6),
            ("jawForward", 0.4),
            ("noseSneerLeft", 0.5),
            ("noseSneerRight", 0.5),
        ],
    ),
    (
        "peaceful",
        &[
            ("eyeBlinkLeft", 0.8),
            ("eyeBlinkRight", 0.8),
            ("mouthSmileLeft", 0.3),
            ("mouthSmileRight", 0.3),
            ("browOuterUpLeft", 0.2),
            ("browOuterUpRight", 0.2),
        ],
    ),
    (
        "pleading",
        &[
            ("eyeWideLeft", 0.8),
            ("eyeWideRight", 0.8),
            ("browInnerUp", 0.8),
            ("mouthPucker", 0.3),
            ("mouthLowerDownLeft", 0.4),
            ("mouthLowerDownRight", 0.4),
        ],
    ),
    (
        "defiant",
        &[
            ("browDownLeft", 1.0),
            ("browDownRight", 1.0),
            ("eyeSquintLeft", 0.6),
            ("eyeSquintRight", 0.6),
            ("jawForward", 0.5),
            ("mouthPressLeft", 0.8),
            ("mouthPressRight", 0.8),
            ("noseSneerLeft", 0.4),
            ("noseSneerRight", 0.4),
        ],
    ),
    (
        "content",
        &[
            ("mouthSmileLeft", 0.5),
            ("mouthSmileRight", 0.5),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
            ("browOuterUpLeft", 0.2),
            ("browOuterUpRight", 0.2),
        ],
    ),
    (
        "euphoric",
        &[
            ("mouthSmileLeft", 1.0),
            ("mouthSmileRight", 1.0),
            ("eyeSquintLeft", 0.9),
            ("eyeSquintRight", 0.9),
            ("browInnerUp", 0.5),
            ("browOuterUpLeft", 0.6),
            ("browOuterUpRight", 0.6),
            ("cheekSquintLeft", 0.8),
            ("cheekSquintRight", 0.8),
            ("jawOpen", 0.4),
        ],
    ),
    (
        "melancholy",
        &[
            ("browInnerUp", 0.6),
            ("eyeLookDownLeft", 0.8),
            ("eyeLookDownRight", 0.8),
            ("mouthFrownLeft", 0.5),
            ("mouthFrownRight", 0.5),
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.4),
        ],
    ),
    (
        "overwhelmed",
        &[
            ("eyeWideLeft", 1.0),
            ("eyeWideRight", 1.0),
            ("browInnerUp", 1.0),
            ("browDownLeft", 0.3),
            ("browDownRight", 0.3),
            ("jawOpen", 0.5),
            ("mouthFunnel", 0.4),
        ],
    ),
    (
        "flirtatious",
        &[
            ("eyeBlinkLeft", 0.6),
            ("mouthSmileLeft", 0.6),
            ("mouthSmileRight", 0.8),
            ("mouthDimpleLeft", 0.4),
            ("mouthDimpleRight", 0.6),
            ("eyeLookDownLeft", 0.3),
            ("eyeLookDownRight", 0.3),
        ],
    ),
    (
        "mischievous",
        &[
            ("mouthSmileLeft", 0.8),
            ("mouthSmileRight", 0.5),
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.6),
            ("browDownRight", 0.3),
            ("mouthDimpleLeft", 0.7),
        ],
    ),
    (
        "playful",
        &[
            ("mouthSmileLeft", 0.7),
            ("mouthSmileRight", 0.7),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
            ("browOuterUpLeft", 0.4),
            ("browOuterUpRight", 0.4),
            ("tongueOut", 0.2),
        ],
    ),
    (
        "embarrassed",
        &[
            ("eyeLookDownLeft", 0.8),
            ("eyeLookDownRight", 0.8),
            ("mouthSmileLeft", 0.3),
            ("mouthSmileRight", 0.3),
            ("browInnerUp", 0.3),
            ("cheekPuff", 0.2),
        ],
    ),
    (
        "proud",
        &[
            ("browOuterUpLeft", 0.4),
            ("browOuterUpRight", 0.4),
            ("mouthSmileLeft", 0.6),
            ("mouthSmileRight", 0.6),
            ("jawForward", 0.2),
            ("eyeSquintLeft", 0.2),
            ("eyeSquintRight", 0.2),
        ],
    ),
    (
        "ashamed",
        &[
            ("eyeLookDownLeft", 1.0),
            ("eyeLookDownRight", 1.0),
            ("browInnerUp", 0.6),
            ("browDownLeft", 0.4),
            ("browDownRight", 0.4),
            ("mouthFrownLeft", 0.5),
            ("mouthFrownRight", 0.5),
        ],
    ),
    (
        "judgmental",
        &[
            ("browDownLeft", 0.8),
            ("browOuterUpRight", 0.6),
            ("eyeSquintLeft", 0.7),
            ("eyeSquintRight", 0.4),
            ("mouthLeft", 0.4),
            ("noseSneerLeft", 0.3),
        ],
    ),
    (
        "welcoming",
        &[
            ("mouthSmileLeft", 0.7),
            ("mouthSmileRight", 0.7),
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.4),
            ("browOuterUpLeft", 0.3),
            ("browOuterUpRight", 0.3),
            ("mouthDimpleLeft", 0.5),
            ("mouthDimpleRight", 0.5),
        ],
    ),
    (
        "thinking",
        &[
            ("eyeLookUpLeft", 0.6),
            ("eyeLookUpRight", 0.6),
            ("browInnerUp", 0.3),
            ("mouthLeft", 0.3),
            ("mouthPucker", 0.2),
        ],
    ),
    (
        "puzzled",
        &[
            ("browInnerUp", 0.6),
            ("browDownLeft", 0.3),
            ("browDownRight", 0.3),
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.4),
            ("mouthLeft", 0.5),
            ("mouthPucker", 0.3),
        ],
    ),
    (
        "concentrating",
        &[
            ("browDownLeft", 0.8),
            ("browDownRight", 0.8),
            ("eyeSquintLeft", 0.6),
            ("eyeSquintRight", 0.6),
            ("mouthPressLeft", 0.5),
            ("mouthPressRight", 0.5),
        ],
    ),
    (
        "contemplating",
        &[
            ("eyeLookDownLeft", 0.4),
            ("eyeLookDownRight", 0.4),
            ("browInnerUp", 0.3),
            ("mouthLeft", 0.3),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
        ],
    ),
    (
        "curious",
        &[
            ("browInnerUp", 0.6),
            ("browOuterUpLeft", 0.4),
            ("browOuterUpRight", 0.4),
            ("eyeWideLeft", 0.4),
            ("eyeWideRight", 0.4),
            ("mouthOpen", 0.2),
        ],
    ),
    (
        "enlightened",
        &[
            ("eyeWideLeft", 0.6),
            ("eyeWideRight", 0.6),
            ("browInnerUp", 0.5),
            ("browOuterUpLeft", 0.6),
            ("browOuterUpRight", 0.6),
            ("mouthSmileLeft", 0.4),
            ("mouthSmileRight", 0.4),
            ("jawOpen", 0.2),
        ],
    ),
    (
        "pain",
        &[
            ("browDownLeft", 1.0),
            ("browDownRight", 1.0),
            ("eyeSquintLeft", 1.0),
            ("eyeSquintRight", 1.0),
            ("mouthFrownLeft", 0.8),
            ("mouthFrownRight", 0.8),
            ("noseSneerLeft", 0.6),
            ("noseSneerRight", 0.6),
        ],
    ),
    (
        "sick",
        &[
            ("eyeBlinkLeft", 0.6),
            ("eyeBlinkRight", 0.6),
            ("browDownLeft", 0.5),
            ("browDownRight", 0.5),
            ("mouthFrownLeft", 0.4),
            ("mouthFrownRight", 0.4),
            ("noseSneerLeft", 0.3),
            ("noseSneerRight", 0.3),
        ],
    ),
    (
        "nauseous",
        &[
            ("noseSneerLeft", 0.8),
            ("noseSneerRight", 0.8),
            ("mouthShrugUpper", 0.6),
            ("browDownLeft", 0.5),
            ("browDownRight", 0.5),
            ("eyeSquintLeft", 0.6),
            ("eyeSquintRight", 0.6),
            ("cheekSquintLeft", 0.4),
            ("cheekSquintRight", 0.4),
        ],
    ),
    (
        "dizzy",
        &[
            ("eyeLookUpLeft", 0.5),
            ("eyeLookUpRight", 0.3),
            ("eyeLookInLeft", 0.4),
            ("eyeLookOutRight", 0.4),
            ("browInnerUp", 0.4),
            ("jawOpen", 0.3),
            ("mouthFunnel", 0.2),
        ],
    ),
    (
        "hot",
        &[
            ("jawOpen", 0.4),
            ("mouthFunnel", 0.3),
            ("eyeBlinkLeft", 0.3),
            ("eyeBlinkRight", 0.3),
            ("browDownLeft", 0.3),
            ("browDownRight", 0.3),
        ],
    ),
    ("neutral", &[]),
    (
        "bored",
        &[
            ("eyeBlinkLeft", 0.4),
            ("eyeBlinkRight", 0.4),
            ("browDownLeft", 0.3),
            ("browDownRight", 0.3),
            ("eyeLookDownLeft", 0.3),
            ("eyeLookDownRight", 0.3),
        ],
    ),
    (
        "annoyed",
        &[
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.4),
            ("browDownLeft", 0.5),
            ("browDownRight", 0.5),
            ("mouthLeft", 0.3),
        ],
    ),
    (
        "unimpressed",
        &[
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
            ("browDownLeft", 0.4),
            ("browDownRight", 0.4),
            ("mouthFrownLeft", 0.2),
            ("mouthFrownRight", 0.2),
        ],
    ),
    (
        "indifferent",
        &[
            ("browOuterUpLeft", 0.3),
            ("browOuterUpRight", 0.3),
            ("eyeBlinkLeft", 0.2),
            ("eyeBlinkRight", 0.2),
        ],
    ),
    (
        "uncomfortable",
        &[
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.4),
            ("mouthLeft", 0.3),
            ("browDownLeft", 0.2),
            ("browDownRight", 0.2),
        ],
    ),
    (
        "cool",
        &[
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.3),
            ("mouthSmileLeft", 0.3),
            ("mouthSmileRight", 0.3),
            ("browOuterUpLeft", 0.2),
            ("browOuterUpRight", 0.2),
        ],
    ),
    (
        "dreamy",
        &[
            ("eyeLookUpLeft", 0.4),
            ("eyeLookUpRight", 0.4),
            ("eyeBlinkLeft", 0.3),
            ("eyeBlinkRight", 0.3),
            ("mouthSmileLeft", 0.2),
            ("mouthSmileRight", 0.2),
            ("browOuterUpLeft", 0.2),
            ("browOuterUpRight", 0.2),
        ],
    ),
    (
        "crazy",
        &[
            ("browInnerUp", 0.9),
            ("noseSneerLeft", 0.6),
            ("noseSneerRight", 0.5),
            ("eyeLookDownLeft", 0.4),
            ("eyeLookUpRight", 0.4),
            ("eyeLookInLeft", 0.8),
            ("eyeLookInRight", 0.8),
            ("jawOpen", 0.8),
            ("mouthDimpleLeft", 0.8),
            ("mouthDimpleRight", 0.8),
            ("mouthStretchLeft", 0.3),
            ("mouthStretchRight", 0.3),
            ("mouthSmileLeft", 0.6),
            ("mouthSmileRight", 0.4),
            ("tongueOut", 0.6),
            ("eyeWideLeft", 0.8),
            ("eyeWideRight", 0.8),
        ],
    ),
    (
        "funnyFace",
        &[
            ("jawLeft", 0.4),
            ("mouthPucker", 0.5),
            ("noseSneerLeft", 1.0),
            ("noseSneerRight", 0.4),
            ("mouthLeft", 0.6),
            ("eyeLookUpLeft", 1.0),
            ("eyeLookUpRight", 1.0),
            ("cheekPuff", 0.8),
            ("mouthDimpleLeft", 0.4),
            ("mouthRollLower", 0.3),
            ("mouthSmileLeft", 0.4),
            ("mouthSmileRight", 0.4),
            ("browInnerUp", 0.8),
            ("tongueOut", 0.3),
        ],
    ),
    (
        "cheeky",
        &[
            ("mouthSmileLeft", 0.6),
            ("mouthSmileRight", 0.8),
            ("eyeSquintLeft", 0.3),
            ("eyeSquintRight", 0.5),
            ("mouthDimpleLeft", 0.4),
            ("mouthDimpleRight", 0.6),
            ("cheekPuff", 0.3),
            ("tongueOut", 0.2),
        ],
    ),
    (
        "goofy",
        &[
            ("eyeLookInLeft", 0.6),
            ("eyeLookOutRight", 0.6),
            ("mouthSmileLeft", 0.8),
            ("mouthSmileRight", 0.8),
            ("browOuterUpLeft", 0.5),
            ("browOuterUpRight", 0.5),
            ("jawOpen", 0.4),
            ("tongueOut", 0.4),
        ],
    ),
];
