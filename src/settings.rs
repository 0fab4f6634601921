//! Run settings and preferences
//!
//! Persisted as JSON next to the profile. Only presentation-side knobs that
//! the simulation needs to honour live here (particle cap, shake, seed).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 128,
            QualityPreset::Medium => 512,
            QualityPreset::High => 2048,
        }
    }
}

/// Simulation-facing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle budget preset
    pub quality: QualityPreset,
    /// Emit particle data at all
    pub particles: bool,
    /// Report screen shake magnitude in snapshots
    pub screen_shake: bool,
    /// Reduced motion (forces shake off)
    pub reduced_motion: bool,
    /// Fixed run seed; `None` lets the driver pick one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            screen_shake: true,
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load settings from a JSON file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = serde_json::from_str(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_particles_off_means_zero_cap() {
        let mut settings = Settings::from_preset(QualityPreset::High);
        assert_eq!(settings.max_particles(), 2048);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"Low","seed":7}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.particles);
    }

    #[test]
    fn test_missing_file_is_default() {
        let settings = Settings::load("/nonexistent/arcade-sim/settings.json").unwrap();
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
    }
}
