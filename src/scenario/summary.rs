//! Descriptive statistics of a scenario batch.

use std::fmt;

use super::types::{PriorityLevel, ScenarioRecord};

/// count / mean / std / min / quartiles / max of one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, 0 for a single value.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = if sorted.len() > 1 {
            (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.)).sqrt()
        } else {
            0.
        };

        Some(Self {
            count: sorted.len(),
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Linear interpolation between the closest ranks, as numpy's default.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;

    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub damage: ColumnSummary,
    pub accessibility: ColumnSummary,
    pub population: ColumnSummary,
    pub score: ColumnSummary,
    /// Scenario count per level, lowest level first. Levels that never
    /// occur are listed with 0.
    pub levels: Vec<(PriorityLevel, usize)>,
}

impl Summary {
    pub fn from_records(records: &[ScenarioRecord]) -> Option<Self> {
        let column = |f: fn(&ScenarioRecord) -> f64| {
            let values: Vec<f64> = records.iter().map(f).collect();
            ColumnSummary::from_values(&values)
        };

        let levels = PriorityLevel::ALL
            .into_iter()
            .map(|level| (level, records.iter().filter(|r| r.level == level).count()))
            .collect();

        Some(Self {
            damage: column(|r| r.damage)?,
            accessibility: column(|r| r.accessibility)?,
            population: column(|r| r.population)?,
            score: column(|r| r.score)?,
            levels,
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = [
            ("Damage_Severity", &self.damage),
            ("Accessibility", &self.accessibility),
            ("Population_Exposure", &self.population),
            ("Priority_Score", &self.score),
        ];
        let rows: [(&str, fn(&ColumnSummary) -> f64); 8] = [
            ("count", |c| c.count as f64),
            ("mean", |c| c.mean),
            ("std", |c| c.std),
            ("min", |c| c.min),
            ("25%", |c| c.q25),
            ("50%", |c| c.median),
            ("75%", |c| c.q75),
            ("max", |c| c.max),
        ];

        write!(f, "{:<6}", "")?;
        for (name, _) in &columns {
            write!(f, " {name:>20}")?;
        }
        writeln!(f)?;

        for (label, get) in rows {
            write!(f, "{label:<6}")?;
            for (_, column) in &columns {
                write!(f, " {:>20.6}", get(column))?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        for (level, count) in &self.levels {
            writeln!(f, "{level:<10} {count:>6}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: usize, score: f64) -> ScenarioRecord {
        ScenarioRecord {
            scenario_id: id,
            damage: id as f64,
            accessibility: 10. - id as f64,
            population: 5.,
            score,
            level: PriorityLevel::from_score(score),
        }
    }

    #[test]
    fn test_column_summary() {
        let s = ColumnSummary::from_values(&[4., 1., 3., 2.]).unwrap();

        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert!((s.std - 1.2909944487358056).abs() < 1e-12);
        assert_eq!((s.min, s.max), (1., 4.));
        assert_eq!(s.q25, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q75, 3.25);
    }

    #[test]
    fn test_single_value() {
        let s = ColumnSummary::from_values(&[7.]).unwrap();

        assert_eq!(s.std, 0.);
        assert_eq!((s.q25, s.median, s.q75), (7., 7., 7.));
        assert!(ColumnSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_summary_levels() {
        let records = [record(1, 10.), record(2, 95.), record(3, 50.), record(4, 12.)];
        let summary = Summary::from_records(&records).unwrap();

        assert_eq!(summary.score.count, 4);
        assert_eq!(summary.damage.mean, 2.5);
        assert_eq!(
            summary.levels,
            vec![
                (PriorityLevel::Low, 2),
                (PriorityLevel::Medium, 0),
                (PriorityLevel::MedHigh, 1),
                (PriorityLevel::High, 0),
                (PriorityLevel::VeryHigh, 1),
            ]
        );
        assert!(Summary::from_records(&[]).is_none());

        let table = summary.to_string();
        assert!(table.contains("Priority_Score"));
        assert!(table.contains("Med-High"));
    }
}
