//! Typed reference tables
pub mod colors;
pub mod culture;
pub mod formality;
pub mod never_combine;
pub mod occasions;
pub mod seasons;
pub mod styling;
pub mod trends;
pub mod venues;

pub use colors::{ColorFamily, ColorTable, Pairing, PairingOption, Temperature, TemperatureLists};
pub use culture::{CultureTable, RegionCulture, ReligiousNote};
pub use formality::{FormalityDefaults, FormalityTable};
pub use never_combine::{ColorMatch, ConditionalAvoidRule, NeverCombineRule, NeverCombineTable};
pub use occasions::{DressCode, Occasion, OccasionKind, OccasionTable, TimeModifiers};
pub use seasons::{ClimateZone, FabricTiers, Palette, SeasonTable, WeatherCondition};
pub use styling::{
    IndustryNorms, PatternInfo, PatternKind, PatternScale, StyleProfile, StylingTable, TextureClass,
};
pub use trends::TrendTable;
pub use venues::{Lighting, Venue, VenueTable};

use serde::{Deserialize, Serialize};

/// Inclusive formality band on the 1-10 scale, written `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormalityRange(pub f64, pub f64);

impl FormalityRange {
    pub fn min(&self) -> f64 {
        self.0.min(self.1)
    }

    pub fn max(&self) -> f64 {
        self.0.max(self.1)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min() + self.max()) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Distance to the nearest bound, zero when inside.
    pub fn distance(&self, value: f64) -> f64 {
        if self.contains(value) {
            0.0
        } else {
            (value - self.min()).abs().min((value - self.max()).abs())
        }
    }

    pub fn shifted(&self, modifier: f64) -> Self {
        FormalityRange(self.min() + modifier, self.max() + modifier)
    }
}

impl std::fmt::Display for FormalityRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.min(), self.max())
    }
}

pub(crate) fn listed(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item == value)
}
