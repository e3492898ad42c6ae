/// Elapsed time of every timed pass for one provider, in milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Samples {
    millis: Vec<f64>,
}

impl Samples {
    /// Wraps the measured timings. Returns `None` for an empty list.
    pub fn new(millis: Vec<f64>) -> Option<Self> {
        if millis.is_empty() {
            None
        } else {
            Some(Self { millis })
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.millis
    }

    pub fn len(&self) -> usize {
        self.millis.len()
    }

    /// Always `false`: [`Samples::new`] rejects an empty list.
    pub fn is_empty(&self) -> bool {
        self.millis.is_empty()
    }

    pub fn average(&self) -> f64 {
        self.millis.iter().sum::<f64>() / self.millis.len() as f64
    }

    pub fn min(&self) -> f64 {
        self.millis.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.millis.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_samples_rejected() {
        assert!(Samples::new(Vec::new()).is_none());
    }

    #[test]
    fn test_statistics() {
        let samples = Samples::new(vec![4.0, 1.5, 2.5, 8.0, 4.0]).unwrap();
        assert_eq!(samples.len(), 5);
        assert!((samples.average() - 4.0).abs() < 1e-12);
        assert_eq!(samples.min(), 1.5);
        assert_eq!(samples.max(), 8.0);
    }

    #[test]
    fn test_average_between_min_and_max() {
        let samples = Samples::new(vec![0.013, 0.011, 0.0125, 0.2, 0.0]).unwrap();
        assert!(samples.min() <= samples.average());
        assert!(samples.average() <= samples.max());
    }
}
