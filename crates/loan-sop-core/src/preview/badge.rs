use serde::{Deserialize, Serialize};

use crate::schema::{Decision, RiskRating};

/// Colour family of a categorical badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
    /// Fallback for values outside a badge's mapping.
    Neutral,
}

impl BadgeColor {
    /// Background/text utility classes for the colour.
    pub fn class_name(self) -> &'static str {
        match self {
            BadgeColor::Green => "bg-green-100 text-green-800",
            BadgeColor::Yellow => "bg-yellow-100 text-yellow-800",
            BadgeColor::Orange => "bg-orange-100 text-orange-800",
            BadgeColor::Red => "bg-red-100 text-red-800",
            BadgeColor::Blue => "bg-blue-100 text-blue-800",
            BadgeColor::Neutral => "bg-slate-100 text-slate-800",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub color: BadgeColor,
    pub class_name: String,
}

impl Badge {
    fn new(label: String, color: BadgeColor) -> Self {
        Self {
            label,
            color,
            class_name: color.class_name().to_string(),
        }
    }
}

pub fn risk_color(rating: &RiskRating) -> BadgeColor {
    match rating {
        RiskRating::Low => BadgeColor::Green,
        RiskRating::Medium => BadgeColor::Yellow,
        RiskRating::High => BadgeColor::Orange,
        RiskRating::VeryHigh => BadgeColor::Red,
        RiskRating::Other(_) => BadgeColor::Neutral,
    }
}

pub fn decision_color(decision: &Decision) -> BadgeColor {
    match decision {
        Decision::Approved => BadgeColor::Green,
        Decision::Denied => BadgeColor::Red,
        Decision::Conditional => BadgeColor::Yellow,
        Decision::CounterOffer => BadgeColor::Blue,
        Decision::Other(_) => BadgeColor::Neutral,
    }
}

/// `"<rating> Risk"`, or a neutral `"Not Rated"` when no rating is set.
pub fn risk_badge(rating: Option<&RiskRating>) -> Badge {
    match rating {
        Some(r) => Badge::new(format!("{} Risk", r.label()), risk_color(r)),
        None => Badge::new("Not Rated".to_string(), BadgeColor::Neutral),
    }
}

/// The decision verbatim, or a neutral `"Pending"` when undecided.
pub fn decision_badge(decision: Option<&Decision>) -> Badge {
    match decision {
        Some(d) => Badge::new(d.label().to_string(), decision_color(d)),
        None => Badge::new("Pending".to_string(), BadgeColor::Neutral),
    }
}
