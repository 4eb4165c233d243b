use serde::{Deserialize, Serialize};

use crate::session::sports;

const DEFAULT_ATHLETE_NAME: &str = "Jordan Lee";
const DEFAULT_SPORTS: [&str; 2] = ["Soccer", "Basketball"];
const DEFAULT_SAMPLE_FRACTIONS: [f64; 3] = [0.15, 0.5, 0.85];
const DEFAULT_MIN_OFFSET_SECONDS: f64 = 0.1;
/// Offsets past this are treated as typos and reset to the default.
const MAX_MIN_OFFSET_SECONDS: f64 = 60.0;

/// Settings persisted to `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub profile: ProfileSettings,
    #[serde(default)]
    pub sampling: SamplingSettings,
}

impl AppSettings {
    /// Repair values a hand-edited file may have broken.
    pub fn normalized(mut self) -> Self {
        self.profile = self.profile.normalized();
        self.sampling = self.sampling.normalized();
        self
    }
}

/// Who is training and what they train for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    #[serde(default = "default_athlete_name")]
    pub athlete_name: String,
    #[serde(default = "default_selected_sports")]
    pub selected_sports: Vec<String>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            athlete_name: default_athlete_name(),
            selected_sports: default_selected_sports(),
        }
    }
}

impl ProfileSettings {
    fn normalized(mut self) -> Self {
        if self.athlete_name.trim().is_empty() {
            self.athlete_name = default_athlete_name();
        }
        let mut unique: Vec<String> = Vec::with_capacity(self.selected_sports.len());
        for name in self.selected_sports {
            if sports::is_known(&name) && !unique.contains(&name) {
                unique.push(name);
            }
        }
        self.selected_sports = unique;
        self
    }
}

/// Where in a clip frames are sampled for pose detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingSettings {
    /// Sample instants as fractions of the clip duration.
    #[serde(default = "default_sample_fractions")]
    pub sample_fractions: Vec<f64>,
    /// Earliest instant ever sampled; the first frames are often black.
    #[serde(default = "default_min_offset_seconds")]
    pub min_offset_seconds: f64,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            sample_fractions: default_sample_fractions(),
            min_offset_seconds: default_min_offset_seconds(),
        }
    }
}

impl SamplingSettings {
    /// Clamp fractions into 0..=1, sort them ascending and drop duplicates.
    pub fn normalized(mut self) -> Self {
        self.sample_fractions.retain(|fraction| fraction.is_finite());
        for fraction in &mut self.sample_fractions {
            *fraction = fraction.clamp(0.0, 1.0);
        }
        self.sample_fractions.sort_by(f64::total_cmp);
        self.sample_fractions.dedup();
        if self.sample_fractions.is_empty() {
            self.sample_fractions = default_sample_fractions();
        }
        if !(0.0..=MAX_MIN_OFFSET_SECONDS).contains(&self.min_offset_seconds) {
            self.min_offset_seconds = default_min_offset_seconds();
        }
        self
    }
}

fn default_athlete_name() -> String {
    DEFAULT_ATHLETE_NAME.to_string()
}

fn default_selected_sports() -> Vec<String> {
    DEFAULT_SPORTS.iter().map(|name| name.to_string()).collect()
}

fn default_sample_fractions() -> Vec<f64> {
    DEFAULT_SAMPLE_FRACTIONS.to_vec()
}

fn default_min_offset_seconds() -> f64 {
    DEFAULT_MIN_OFFSET_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_normalization_sorts_clamps_and_dedups() {
        let sampling = SamplingSettings {
            sample_fractions: vec![0.85, 1.4, f64::NAN, 0.15, 0.15, -0.2],
            min_offset_seconds: -1.0,
        }
        .normalized();
        assert_eq!(sampling.sample_fractions, vec![0.0, 0.15, 0.85, 1.0]);
        assert_eq!(sampling.min_offset_seconds, DEFAULT_MIN_OFFSET_SECONDS);
    }

    #[test]
    fn empty_fractions_fall_back_to_defaults() {
        let sampling = SamplingSettings {
            sample_fractions: Vec::new(),
            min_offset_seconds: 0.25,
        }
        .normalized();
        assert_eq!(sampling.sample_fractions, vec![0.15, 0.5, 0.85]);
        assert_eq!(sampling.min_offset_seconds, 0.25);
    }

    #[test]
    fn oversized_offset_resets_to_default() {
        let sampling = SamplingSettings {
            sample_fractions: vec![0.5],
            min_offset_seconds: 1e20,
        }
        .normalized();
        assert_eq!(sampling.min_offset_seconds, DEFAULT_MIN_OFFSET_SECONDS);

        let infinite = SamplingSettings {
            sample_fractions: vec![0.5],
            min_offset_seconds: f64::INFINITY,
        }
        .normalized();
        assert_eq!(infinite.min_offset_seconds, DEFAULT_MIN_OFFSET_SECONDS);
    }

    #[test]
    fn profile_normalization_drops_unknown_sports() {
        let profile = ProfileSettings {
            athlete_name: "  ".into(),
            selected_sports: vec!["Tennis".into(), "Curling".into(), "Boxing".into()],
        }
        .normalized();
        assert_eq!(profile.athlete_name, DEFAULT_ATHLETE_NAME);
        assert_eq!(profile.selected_sports, vec!["Tennis", "Boxing"]);
    }
}
