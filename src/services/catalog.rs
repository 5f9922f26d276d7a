//! Display attributes for categories, impact levels and score bands
//!
//! Category presentation is a single lookup table with one fallback entry.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDisplay {
    pub key: &'static str,
    pub icon: &'static str,
    /// Hex colour
    pub color: &'static str,
}

static CATEGORY_TABLE: [CategoryDisplay; 5] = [
    CategoryDisplay {
        key: "transport",
        icon: "🚗",
        color: "#e74c3c",
    },
    CategoryDisplay {
        key: "travel",
        icon: "✈️",
        color: "#e74c3c",
    },
    CategoryDisplay {
        key: "food",
        icon: "🍽️",
        color: "#f39c12",
    },
    CategoryDisplay {
        key: "utilities",
        icon: "⚡",
        color: "#3498db",
    },
    CategoryDisplay {
        key: "shopping",
        icon: "🛍️",
        color: "#9b59b6",
    },
];

static FALLBACK_DISPLAY: CategoryDisplay = CategoryDisplay {
    key: "other",
    icon: "🌱",
    color: "#2ecc71",
};

/// Display attributes for `category`; unknown categories share one entry
pub fn display_for(category: &str) -> &'static CategoryDisplay {
    CATEGORY_TABLE
        .iter()
        .find(|d| d.key == category)
        .unwrap_or(&FALLBACK_DISPLAY)
}

/// "food" → "Food"
pub fn title_case(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    /// Classify a single activity's emissions in kg CO2
    pub fn from_emissions(kg: f64) -> Self {
        if kg >= 100.0 {
            Self::High
        } else if kg >= 20.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#2ecc71",
            Self::Medium => "#f39c12",
            Self::High => "#e74c3c",
        }
    }
}

/// Band of the 1-10 environmental impact score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::Good
        } else if score >= 6.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#2ecc71",
            Self::Fair => "#f39c12",
            Self::Poor => "#e74c3c",
        }
    }
}
