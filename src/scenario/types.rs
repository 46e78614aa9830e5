//! Priority labels and result rows.

use std::fmt;

use serde::Serialize;

use crate::inputs::Inputs;

/// Discrete priority band of a crisp score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PriorityLevel {
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Med-High")]
    MedHigh,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl PriorityLevel {
    /// Lowest first.
    pub const ALL: [Self; 5] = [Self::Low, Self::Medium, Self::MedHigh, Self::High, Self::VeryHigh];

    /// Bands are closed below: 80 and up is "Very High", 60 "High",
    /// 45 "Med-High", 30 "Medium", anything else "Low".
    pub fn from_score(score: f64) -> Self {
        if score >= 80. {
            Self::VeryHigh
        } else if score >= 60. {
            Self::High
        } else if score >= 45. {
            Self::MedHigh
        } else if score >= 30. {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::MedHigh => "Med-High",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One evaluated scenario.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioRecord {
    /// 1-based
    #[serde(rename = "Scenario_ID")]
    pub scenario_id: usize,
    #[serde(rename = "Damage_Severity")]
    pub damage: f64,
    #[serde(rename = "Accessibility")]
    pub accessibility: f64,
    #[serde(rename = "Population_Exposure")]
    pub population: f64,
    #[serde(rename = "Priority_Score")]
    pub score: f64,
    #[serde(rename = "Priority_Level")]
    pub level: PriorityLevel,
}

impl ScenarioRecord {
    pub fn inputs(&self) -> Inputs {
        Inputs::new(self.damage, self.accessibility, self.population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_thresholds() {
        assert_eq!(PriorityLevel::from_score(0.), PriorityLevel::Low);
        assert_eq!(PriorityLevel::from_score(29.99), PriorityLevel::Low);
        assert_eq!(PriorityLevel::from_score(30.), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_score(44.99), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_score(45.), PriorityLevel::MedHigh);
        assert_eq!(PriorityLevel::from_score(60.), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(79.999), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(80.), PriorityLevel::VeryHigh);
        assert_eq!(PriorityLevel::from_score(100.), PriorityLevel::VeryHigh);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(PriorityLevel::MedHigh.to_string(), "Med-High");
        assert_eq!(format!("{:<10}|", PriorityLevel::High), "High      |");
        assert_eq!(serde_json::to_string(&PriorityLevel::VeryHigh).unwrap(), r#""Very High""#);
    }

    #[test]
    fn test_record_column_names() {
        let record = ScenarioRecord {
            scenario_id: 1,
            damage: 3.7,
            accessibility: 9.5,
            population: 7.3,
            score: 71.25,
            level: PriorityLevel::High,
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["Scenario_ID"], 1);
        assert_eq!(json["Population_Exposure"], 7.3);
        assert_eq!(json["Priority_Level"], "High");
        assert_eq!(record.inputs(), Inputs::new(3.7, 9.5, 7.3));
    }
}
