//! Time-aligned mouth cues for one utterance.

use crate::viseme::VisemeCode;
use crate::Result;
use serde::{Deserialize, Serialize};

/// One mouth shape held over `[start, end]` seconds.
///
/// `value` keeps the extractor's raw code so malformed entries survive
/// parsing and read as silence at lookup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouthCue {
    pub start: f64,
    pub end: f64,
    pub value: String,
}

impl MouthCue {
    pub fn new(start: f64, end: f64, code: impl Into<String>) -> Self {
        Self {
            start,
            end,
            value: code.into(),
        }
    }

    pub fn code(&self) -> Option<VisemeCode> {
        VisemeCode::parse(&self.value)
    }

    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMetadata {
    #[serde(default)]
    pub sound_file: Option<String>,

    #[serde(default)]
    pub duration: Option<f64>,
}

/// Ordered cue list as produced by the phoneme extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTimeline")]
pub struct CueTimeline {
    #[serde(default)]
    pub metadata: TimelineMetadata,

    #[serde(default)]
    mouth_cues: Vec<MouthCue>,

    /// Sorted and non-overlapping; enables binary search
    #[serde(skip)]
    well_formed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeline {
    #[serde(default)]
    metadata: TimelineMetadata,
    #[serde(default)]
    mouth_cues: Vec<MouthCue>,
}

impl From<RawTimeline> for CueTimeline {
    fn from(raw: RawTimeline) -> Self {
        CueTimeline::new(raw.mouth_cues).with_metadata(raw.metadata)
    }
}

impl Default for CueTimeline {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CueTimeline {
    pub fn new(cues: Vec<MouthCue>) -> Self {
        let well_formed = Self::check_well_formed(&cues);
        Self {
            metadata: TimelineMetadata::default(),
            mouth_cues: cues,
            well_formed,
        }
    }

    pub fn with_metadata(mut self, metadata: TimelineMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Parse the extractor's JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn cues(&self) -> &[MouthCue] {
        &self.mouth_cues
    }

    pub fn len(&self) -> usize {
        self.mouth_cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mouth_cues.is_empty()
    }

    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }

    /// Length in seconds: the metadata duration, else the last cue end
    pub fn duration(&self) -> f64 {
        self.metadata
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or_else(|| self.mouth_cues.iter().map(|c| c.end).fold(0.0, f64::max))
    }

    fn check_well_formed(cues: &[MouthCue]) -> bool {
        cues.iter().all(|c| c.start.is_finite() && c.end.is_finite() && c.start <= c.end)
            && cues.windows(2).all(|w| w[0].end <= w[1].start)
    }

    /// First cue in stored order with `start <= t <= end`, or `None` for silence.
    pub fn active_cue_at(&self, t: f64) -> Option<&MouthCue> {
        if t.is_nan() {
            return None;
        }
        if self.well_formed {
            self.search_sorted(t)
        } else {
            self.mouth_cues.iter().find(|c| c.contains(t))
        }
    }

    fn search_sorted(&self, t: f64) -> Option<&MouthCue> {
        // Index of the first cue starting after t; only cues before it can contain t.
        let upper = self.mouth_cues.partition_point(|c| c.start <= t);
        if upper == 0 {
            return None;
        }
        // Adjacent cues may share a boundary (end == next start), in which case
        // several contain t. Walk back so the earliest stored one wins.
        let mut found = None;
        let mut i = upper;
        while i > 0 {
            i -= 1;
            let cue = &self.mouth_cues[i];
            if cue.contains(t) {
                found = Some(cue);
            } else if cue.end < t {
                break;
            }
        }
        found
    }

    /// Resolved code at `t`; unknown codes and gaps are silence
    pub fn code_at(&self, t: f64) -> Option<VisemeCode> {
        self.active_cue_at(t).and_then(MouthCue::code)
    }
}
