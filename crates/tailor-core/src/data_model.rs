//! Outfit data model
//!
//! An [`OutfitCombination`] is a value object built by the caller. The engine
//! only reads it; alternatives are produced by cloning and changing one field.

use serde::{Deserialize, Serialize};

/// Garment slots that carry a color, pattern and fabric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Garment {
    Suit,
    Shirt,
    Tie,
}

impl Garment {
    pub const ALL: [Garment; 3] = [Garment::Suit, Garment::Shirt, Garment::Tie];

    pub fn as_str(&self) -> &'static str {
        match self {
            Garment::Suit => "suit",
            Garment::Shirt => "shirt",
            Garment::Tie => "tie",
        }
    }
}

impl std::fmt::Display for Garment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accessory slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorySlot {
    PocketSquare,
    WatchType,
    Shoes,
    Belt,
}

impl AccessorySlot {
    pub const ALL: [AccessorySlot; 4] = [
        AccessorySlot::PocketSquare,
        AccessorySlot::WatchType,
        AccessorySlot::Shoes,
        AccessorySlot::Belt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessorySlot::PocketSquare => "pocket_square",
            AccessorySlot::WatchType => "watch_type",
            AccessorySlot::Shoes => "shoes",
            AccessorySlot::Belt => "belt",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pocket_square: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belt: Option<String>,
}

impl Accessories {
    pub fn get(&self, slot: AccessorySlot) -> Option<&str> {
        match slot {
            AccessorySlot::PocketSquare => self.pocket_square.as_deref(),
            AccessorySlot::WatchType => self.watch_type.as_deref(),
            AccessorySlot::Shoes => self.shoes.as_deref(),
            AccessorySlot::Belt => self.belt.as_deref(),
        }
    }

    pub fn set(&mut self, slot: AccessorySlot, value: Option<String>) {
        match slot {
            AccessorySlot::PocketSquare => self.pocket_square = value,
            AccessorySlot::WatchType => self.watch_type = value,
            AccessorySlot::Shoes => self.shoes = value,
            AccessorySlot::Belt => self.belt = value,
        }
    }

    /// Present accessories in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (AccessorySlot, &str)> + '_ {
        AccessorySlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|value| (slot, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A proposed suit/shirt/tie combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitCombination {
    pub suit_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit_fabric: Option<String>,

    pub shirt_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shirt_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shirt_fabric: Option<String>,

    /// Absence of a tie color means no tie is worn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_fabric: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessories: Option<Accessories>,
}

impl OutfitCombination {
    pub fn new(suit_color: impl Into<String>, shirt_color: impl Into<String>) -> Self {
        Self {
            suit_color: suit_color.into(),
            suit_pattern: None,
            suit_fabric: None,
            shirt_color: shirt_color.into(),
            shirt_pattern: None,
            shirt_fabric: None,
            tie_color: None,
            tie_pattern: None,
            tie_fabric: None,
            accessories: None,
        }
    }

    pub fn with_tie(mut self, color: impl Into<String>) -> Self {
        self.tie_color = Some(color.into());
        self
    }

    pub fn with_pattern(mut self, garment: Garment, pattern: impl Into<String>) -> Self {
        self.set_pattern(garment, Some(pattern.into()));
        self
    }

    pub fn with_fabric(mut self, garment: Garment, fabric: impl Into<String>) -> Self {
        self.set_fabric(garment, Some(fabric.into()));
        self
    }

    pub fn with_accessory(mut self, slot: AccessorySlot, value: impl Into<String>) -> Self {
        self.accessories
            .get_or_insert_with(Accessories::default)
            .set(slot, Some(value.into()));
        self
    }

    pub fn has_tie(&self) -> bool {
        self.tie_color.is_some()
    }

    /// Garments actually worn: suit and shirt always, tie when present.
    pub fn garments(&self) -> Vec<Garment> {
        Garment::ALL
            .into_iter()
            .filter(|g| *g != Garment::Tie || self.has_tie())
            .collect()
    }

    pub fn color(&self, garment: Garment) -> Option<&str> {
        match garment {
            Garment::Suit => Some(self.suit_color.as_str()),
            Garment::Shirt => Some(self.shirt_color.as_str()),
            Garment::Tie => self.tie_color.as_deref(),
        }
    }

    pub fn pattern(&self, garment: Garment) -> Option<&str> {
        match garment {
            Garment::Suit => self.suit_pattern.as_deref(),
            Garment::Shirt => self.shirt_pattern.as_deref(),
            Garment::Tie => self.tie_pattern.as_deref(),
        }
    }

    pub fn fabric(&self, garment: Garment) -> Option<&str> {
        match garment {
            Garment::Suit => self.suit_fabric.as_deref(),
            Garment::Shirt => self.shirt_fabric.as_deref(),
            Garment::Tie => self.tie_fabric.as_deref(),
        }
    }

    /// Setting the tie color to `None` removes the tie.
    pub fn set_color(&mut self, garment: Garment, color: Option<String>) {
        match garment {
            Garment::Suit => {
                if let Some(color) = color {
                    self.suit_color = color;
                }
            }
            Garment::Shirt => {
                if let Some(color) = color {
                    self.shirt_color = color;
                }
            }
            Garment::Tie => self.tie_color = color,
        }
    }

    pub fn set_pattern(&mut self, garment: Garment, pattern: Option<String>) {
        match garment {
            Garment::Suit => self.suit_pattern = pattern,
            Garment::Shirt => self.shirt_pattern = pattern,
            Garment::Tie => self.tie_pattern = pattern,
        }
    }

    pub fn set_fabric(&mut self, garment: Garment, fabric: Option<String>) {
        match garment {
            Garment::Suit => self.suit_fabric = fabric,
            Garment::Shirt => self.shirt_fabric = fabric,
            Garment::Tie => self.tie_fabric = fabric,
        }
    }

    /// Colors of the worn garments in suit, shirt, tie order.
    pub fn colors(&self) -> Vec<&str> {
        Garment::ALL
            .into_iter()
            .filter_map(|g| self.color(g))
            .collect()
    }

    /// Patterns other than `solid`, paired with their garment.
    pub fn non_solid_patterns(&self) -> Vec<(Garment, &str)> {
        self.garments()
            .into_iter()
            .filter_map(|g| self.pattern(g).map(|p| (g, p)))
            .filter(|(_, p)| *p != "solid")
            .collect()
    }

    /// Fabrics the caller supplied, paired with their garment.
    pub fn fabrics(&self) -> Vec<(Garment, &str)> {
        self.garments()
            .into_iter()
            .filter_map(|g| self.fabric(g).map(|f| (g, f)))
            .collect()
    }

    pub fn accessory_items(&self) -> Vec<(AccessorySlot, &str)> {
        self.accessories
            .as_ref()
            .map(|a| a.iter().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_accessors() {
        let combo = OutfitCombination::new("navy", "white")
            .with_tie("burgundy")
            .with_pattern(Garment::Tie, "paisley")
            .with_fabric(Garment::Suit, "wool")
            .with_accessory(AccessorySlot::Shoes, "black_oxford");

        assert_eq!(combo.colors(), vec!["navy", "white", "burgundy"]);
        assert_eq!(combo.non_solid_patterns(), vec![(Garment::Tie, "paisley")]);
        assert_eq!(combo.fabrics(), vec![(Garment::Suit, "wool")]);
        assert_eq!(
            combo.accessory_items(),
            vec![(AccessorySlot::Shoes, "black_oxford")]
        );
    }

    #[test]
    fn test_no_tie_excludes_tie_fields() {
        let combo = OutfitCombination::new("grey", "light_blue")
            .with_pattern(Garment::Tie, "striped");
        assert!(!combo.has_tie());
        assert_eq!(combo.garments(), vec![Garment::Suit, Garment::Shirt]);
        assert!(combo.non_solid_patterns().is_empty());
    }

    #[test]
    fn test_solid_is_not_a_pattern() {
        let combo = OutfitCombination::new("navy", "white")
            .with_tie("navy")
            .with_pattern(Garment::Suit, "solid")
            .with_pattern(Garment::Shirt, "gingham");
        assert_eq!(combo.non_solid_patterns(), vec![(Garment::Shirt, "gingham")]);
    }

    #[test]
    fn test_deserialize_minimal_json() {
        let combo: OutfitCombination =
            serde_json::from_str(r#"{"suit_color":"charcoal","shirt_color":"white"}"#).unwrap();
        assert_eq!(combo.suit_color, "charcoal");
        assert!(combo.tie_color.is_none());
        assert!(combo.accessories.is_none());
    }

    #[test]
    fn test_set_color_removes_tie() {
        let mut combo = OutfitCombination::new("navy", "white").with_tie("red");
        combo.set_color(Garment::Tie, None);
        assert!(!combo.has_tie());
        combo.set_color(Garment::Suit, Some("charcoal".into()));
        assert_eq!(combo.suit_color, "charcoal");
    }
}
