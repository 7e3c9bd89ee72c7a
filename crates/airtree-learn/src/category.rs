use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::LearnError;

/// Air-quality categories, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AirQuality {
    Baik,
    Sedang,
    TidakSehat,
    SangatTidakSehat,
    Berbahaya,
}

impl AirQuality {
    pub const ALL: [AirQuality; 5] = [
        AirQuality::Baik,
        AirQuality::Sedang,
        AirQuality::TidakSehat,
        AirQuality::SangatTidakSehat,
        AirQuality::Berbahaya,
    ];

    /// Class label as it appears in datasets.
    pub fn label(&self) -> &'static str {
        match self {
            AirQuality::Baik => "Baik",
            AirQuality::Sedang => "Sedang",
            AirQuality::TidakSehat => "Tidak Sehat",
            AirQuality::SangatTidakSehat => "Sangat Tidak Sehat",
            AirQuality::Berbahaya => "Berbahaya",
        }
    }

    /// Resolve a class label, refusing anything outside the known table.
    pub fn from_label(label: &str) -> Result<Self, LearnError> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == label)
            .ok_or_else(|| LearnError::UnknownCategory {
                name: label.to_string(),
            })
    }

    /// One-line health summary.
    pub fn headline(&self) -> &'static str {
        match self {
            AirQuality::Baik => "Air is healthy for all activities",
            AirQuality::Sedang => "Sensitive groups may experience health effects",
            AirQuality::TidakSehat => "Everyone may experience health effects",
            AirQuality::SangatTidakSehat => "Health emergency warning for the entire population",
            AirQuality::Berbahaya => "Air is hazardous, evacuation is advised",
        }
    }

    pub fn recommendation_title(&self) -> &'static str {
        match self {
            AirQuality::Baik | AirQuality::Sedang | AirQuality::TidakSehat => "Recommendations",
            AirQuality::SangatTidakSehat => "Urgent recommendations",
            AirQuality::Berbahaya => "Emergency recommendations",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            AirQuality::Baik => &[
                "Outdoor activities are safe",
                "No restrictions for sensitive groups",
                "Keep the air clean by reducing emissions",
                "Enjoy the fresh air and outdoor activities",
            ],
            AirQuality::Sedang => &[
                "Sensitive groups (children, the elderly, people with respiratory illness) should limit outdoor activity",
                "The general public can carry on as normal",
                "Check air-quality updates regularly",
                "Avoid heavily polluted areas such as busy roads",
            ],
            AirQuality::TidakSehat => &[
                "Avoid strenuous outdoor activity",
                "Sensitive groups should stay indoors",
                "Wear an N95 mask when going outside",
                "Close doors and windows to limit exposure",
                "Identify and reduce nearby pollution sources",
            ],
            AirQuality::SangatTidakSehat => &[
                "Avoid all outdoor activity",
                "Stay indoors with ventilation closed",
                "Use an air purifier if one is available",
                "Follow the latest air-quality information",
                "Report to the authorities for emergency action",
            ],
            AirQuality::Berbahaya => &[
                "Do not go outside under any circumstances",
                "Use breathing equipment if available",
                "Move to a place with clean air immediately",
                "Report to the authorities for emergency action",
                "Evacuate to an area with better air quality",
            ],
        }
    }
}

impl fmt::Display for AirQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AirQuality {
    type Err = LearnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for category in AirQuality::ALL {
            assert_eq!(category.label().parse::<AirQuality>().expect("known"), category);
        }
    }

    #[test]
    fn every_category_has_guidance() {
        for category in AirQuality::ALL {
            assert!(!category.headline().is_empty());
            assert!(!category.recommendations().is_empty());
        }
    }

    #[test]
    fn unknown_labels_are_reported_not_defaulted() {
        let err = "Moderate".parse::<AirQuality>().expect_err("not in table");
        assert!(matches!(err, LearnError::UnknownCategory { name } if name == "Moderate"));
    }

    #[test]
    fn categories_order_by_severity() {
        assert!(AirQuality::Baik < AirQuality::Sedang);
        assert!(AirQuality::SangatTidakSehat < AirQuality::Berbahaya);
    }
}
