//! Firework recipes: the component records that drive explosions.
//!
//! Recipes are authored elsewhere and arrive as TOML. Colors are hex
//! strings; unknown pattern and shape names fall back rather than fail.

use crate::ascent::TrailEffect;
use crate::category::Category;
use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};
use sparkle_core::{Color, Result, SparkleError};
use std::path::Path;

/// One explosion layer of a firework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworkComponent {
    pub pattern: Pattern,
    pub color: Color,
    /// Second stream color (helix)
    #[serde(alias = "secondaryColor")]
    pub secondary_color: Color,
    /// Scales particle count, burst speed and particle scale
    pub size: f32,
    /// Particle lifetime in seconds
    pub lifetime: f32,
    pub shape: Category,
    pub spread: f32,
    /// Attach trails to this component's particles
    pub trail: bool,
    /// Exponential drag coefficient in [0, 1]
    pub friction: f32,
}

impl Default for FireworkComponent {
    fn default() -> Self {
        Self {
            pattern: Pattern::Spherical,
            color: Color::RED,
            secondary_color: Color::GREEN,
            size: 0.5,
            lifetime: 1.2,
            shape: Category::Sphere,
            spread: 1.0,
            trail: false,
            friction: 0.0,
        }
    }
}

impl FireworkComponent {
    pub fn new(pattern: Pattern, color: Color) -> Self {
        Self {
            pattern,
            color,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("size", self.size)?;
        check_positive("lifetime", self.lifetime)?;
        check_positive("spread", self.spread)?;
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(SparkleError::ValueOutOfRange {
                field: "friction".into(),
                min: 0.0,
                max: 1.0,
                value: self.friction as f64,
            });
        }
        Ok(())
    }
}

fn check_positive(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SparkleError::ValueOutOfRange {
            field: field.to_string(),
            min: f64::MIN_POSITIVE,
            max: f64::from(f32::MAX),
            value: value as f64,
        })
    }
}

/// A named, ordered list of components launched together
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub components: Vec<FireworkComponent>,
    /// Sparks left behind while the rocket climbs
    #[serde(default, alias = "trailEffect")]
    pub trail_effect: TrailEffect,
}

impl Recipe {
    pub fn new(name: impl Into<String>, components: Vec<FireworkComponent>) -> Self {
        Self {
            name: name.into(),
            components,
            trail_effect: TrailEffect::default(),
        }
    }

    pub fn with_trail_effect(mut self, effect: TrailEffect) -> Self {
        self.trail_effect = effect;
        self
    }

    /// Parse and validate a TOML recipe
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let recipe: Self = toml::from_str(s)?;
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.components.is_empty() {
            return Err(SparkleError::EmptyRecipe(self.name.clone()));
        }
        self.components.iter().try_for_each(FireworkComponent::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recipe_from_toml() {
        let toml_str = r##"
name = "Valentine"

[[components]]
pattern = "brokenHeart"
color = "#ff3366"
size = 0.6
lifetime = 2.0
shape = "crystalDroplet"
trail = true

[[components]]
pattern = "helix"
color = "#ffffff"
secondaryColor = "#0000ff"
"##;
        let recipe = Recipe::from_toml_str(toml_str).unwrap();
        assert_eq!(recipe.name, "Valentine");
        assert_eq!(recipe.trail_effect, TrailEffect::Fade);
        assert_eq!(recipe.components.len(), 2);

        let first = &recipe.components[0];
        assert_eq!(first.pattern, Pattern::BrokenHeart);
        assert_eq!(first.shape, Category::CrystalDroplet);
        assert_eq!(first.color, Color::parse_hex("#ff3366").unwrap());
        assert!(first.trail);
        assert!((first.size - 0.6).abs() < 1e-6);

        let second = &recipe.components[1];
        assert_eq!(second.pattern, Pattern::Helix);
        assert_eq!(second.secondary_color, Color::new(0.0, 0.0, 1.0));
        // Defaults fill the rest
        assert_eq!(second.shape, Category::Sphere);
        assert!((second.lifetime - 1.2).abs() < 1e-6);
    }

    #[test]
    fn trail_effect_is_read_by_name() {
        let toml_str = r##"
name = "Sky"
trailEffect = "rainbow"

[[components]]
"##;
        let recipe = Recipe::from_toml_str(toml_str).unwrap();
        assert_eq!(recipe.trail_effect, TrailEffect::Rainbow);

        let recipe = Recipe::from_toml_str("trail_effect = \"comet\"\n[[components]]").unwrap();
        assert_eq!(recipe.trail_effect, TrailEffect::Comet);

        let recipe = Recipe::from_toml_str("trail_effect = \"smoke\"\n[[components]]").unwrap();
        assert_eq!(recipe.trail_effect, TrailEffect::Fade);
    }

    #[test]
    fn unknown_names_fall_back() {
        let toml_str = r##"
[[components]]
pattern = "dahlia"
shape = "teapot"
"##;
        let recipe = Recipe::from_toml_str(toml_str).unwrap();
        assert_eq!(recipe.components[0].pattern, Pattern::Scatter);
        assert_eq!(recipe.components[0].shape, Category::Sphere);
    }

    #[test]
    fn empty_recipe_is_rejected() {
        let err = Recipe::from_toml_str("name = \"Dud\"").unwrap_err();
        assert!(matches!(err, SparkleError::EmptyRecipe(name) if name == "Dud"));
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = Recipe::from_toml_str("[[components]]\ncolor = \"red\"").unwrap_err();
        assert!(matches!(err, SparkleError::TomlParseError(_)));
    }

    #[test]
    fn non_positive_size_is_rejected() {
        let err = Recipe::from_toml_str("[[components]]\nsize = 0").unwrap_err();
        assert!(matches!(err, SparkleError::ValueOutOfRange { field, .. } if field == "size"));
    }

    #[test]
    fn friction_out_of_range_is_rejected() {
        let mut component = FireworkComponent::default();
        component.friction = 1.5;
        assert!(component.validate().is_err());
        component.friction = 0.4;
        assert!(component.validate().is_ok());
    }
}
