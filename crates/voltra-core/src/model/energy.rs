// ── Weekly energy-consumption series ──
//
// The dashboard chart's data. The backend has no stats endpoint; the
// sample week ships with the client, exactly as the original dashboard did.

/// A labeled series of daily kWh readings.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnergySeries {
    pub labels: &'static [&'static str],
    pub values: Vec<f64>,
}

impl EnergySeries {
    /// The built-in Monday-to-Sunday sample week.
    pub fn sample_week() -> Self {
        Self {
            labels: &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            values: vec![420.0, 380.0, 450.0, 390.0, 470.0, 410.0, 430.0],
        }
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.total() / self.values.len() as f64
        }
    }

    /// `(index, value)` pairs in the shape the chart widget consumes.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_week_is_labeled_per_day() {
        let series = EnergySeries::sample_week();
        assert_eq!(series.labels.len(), series.values.len());
        assert_eq!(series.max(), 470.0);
        assert!((series.average() - 421.428).abs() < 0.01);
    }
}
