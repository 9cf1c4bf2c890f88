//! Validation Context: optional situational parameters for one validation
//!
//! Every field is optional. A missing field disables the checks that need it.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationContext {
    pub occasion: Option<String>,
    pub season: Option<String>,
    pub venue_type: Option<String>,
    pub customer_profile: Option<String>,
    /// Required formality on the 1-10 scale.
    pub formality_required: Option<f64>,
    pub dress_code: Option<String>,
    /// `morning`, `afternoon` or `evening`.
    pub time_of_day: Option<String>,
    pub age_group: Option<String>,
    pub style_preference: Option<String>,
    pub budget_tier: Option<String>,
    pub climate_zone: Option<String>,
    pub weather_conditions: Option<String>,
    pub cultural_region: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lighting_conditions: Vec<String>,
    pub psychology_risk_level: Option<String>,
    pub career_stage: Option<String>,
    pub industry_context: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub religious_considerations: Vec<String>,
    /// `low`, `medium` or `high`.
    pub photography_importance: Option<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue_type = Some(venue.into());
        self
    }

    pub fn with_customer_profile(mut self, profile: impl Into<String>) -> Self {
        self.customer_profile = Some(profile.into());
        self
    }

    pub fn with_formality_required(mut self, level: f64) -> Self {
        self.formality_required = Some(level);
        self
    }

    pub fn with_dress_code(mut self, code: impl Into<String>) -> Self {
        self.dress_code = Some(code.into());
        self
    }

    pub fn with_time_of_day(mut self, time: impl Into<String>) -> Self {
        self.time_of_day = Some(time.into());
        self
    }

    pub fn with_style_preference(mut self, style: impl Into<String>) -> Self {
        self.style_preference = Some(style.into());
        self
    }

    pub fn with_climate_zone(mut self, zone: impl Into<String>) -> Self {
        self.climate_zone = Some(zone.into());
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather_conditions = Some(weather.into());
        self
    }

    pub fn with_cultural_region(mut self, region: impl Into<String>) -> Self {
        self.cultural_region = Some(region.into());
        self
    }

    pub fn with_lighting(mut self, lighting: impl Into<String>) -> Self {
        self.lighting_conditions.push(lighting.into());
        self
    }

    pub fn with_career_stage(mut self, stage: impl Into<String>) -> Self {
        self.career_stage = Some(stage.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry_context = Some(industry.into());
        self
    }

    pub fn with_religious_consideration(mut self, religion: impl Into<String>) -> Self {
        self.religious_considerations.push(religion.into());
        self
    }

    pub fn with_photography_importance(mut self, importance: impl Into<String>) -> Self {
        self.photography_importance = Some(importance.into());
        self
    }
}
