//! Particle shape categories. Each category owns one pool and one draw batch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of particle shapes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Sphere,
    Star,
    Ring,
    CrystalDroplet,
    SliceBurst,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Sphere,
        Category::Star,
        Category::Ring,
        Category::CrystalDroplet,
        Category::SliceBurst,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Dense index into per-category tables
    pub fn index(self) -> usize {
        match self {
            Category::Sphere => 0,
            Category::Star => 1,
            Category::Ring => 2,
            Category::CrystalDroplet => 3,
            Category::SliceBurst => 4,
        }
    }

    /// Resolve a shape name. Unknown names fall back to `Sphere`.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::warn!("unknown particle shape '{name}', using sphere");
            Category::Sphere
        })
    }

    /// Strict lookup; accepts the camelCase names recipes use and snake_case.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sphere" => Some(Category::Sphere),
            "star" => Some(Category::Star),
            "ring" => Some(Category::Ring),
            "crystalDroplet" | "crystal_droplet" => Some(Category::CrystalDroplet),
            "sliceBurst" | "slice_burst" => Some(Category::SliceBurst),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Sphere => "sphere",
            Category::Star => "star",
            Category::Ring => "ring",
            Category::CrystalDroplet => "crystalDroplet",
            Category::SliceBurst => "sliceBurst",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name().to_string()
    }
}
