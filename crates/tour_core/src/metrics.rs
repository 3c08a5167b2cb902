use crate::tour::Tour;

/// Edge statistics for a finished tour.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub size: usize,
    pub total: f64,
    pub longest: f64,
    pub average: f64,
    pub threshold: f64,
    pub outliers: usize,
}

impl TourMetrics {
    /// Edges longer than `average * threshold_factor` count as outliers.
    pub fn from_tour(tour: &Tour, threshold_factor: f64) -> Self {
        let distances: Vec<f64> = tour.edges().map(|(a, b)| a.dist(&b)).collect();
        let size = distances.len();

        if size == 0 {
            log::info!("metrics: empty tour so there's nothing to report");
            return Self::default();
        }

        let mut total = 0.0;
        for d in &distances {
            total += d;
        }
        let average = total / (size as f64);
        let threshold = average * threshold_factor;
        let outliers = distances.iter().filter(|d| **d > threshold).count();
        let longest = distances.iter().copied().fold(0.0_f64, f64::max);

        log::info!(
            "metrics: n={size} total={total:.3} longest={longest:.3} avg={average:.3} spike_threshold={threshold:.3} spikes={outliers}",
        );

        Self {
            size,
            total,
            longest,
            average,
            threshold,
            outliers,
        }
    }
}
