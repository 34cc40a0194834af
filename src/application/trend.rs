// Trend buffer - Bounded history of the most recent samples
use crate::domain::sample::Sample;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct TrendBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl TrendBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// The last `n` samples, oldest first. Asking for more than is held
    /// yields everything. The iterator is `Clone`, so the same view can be
    /// walked more than once.
    pub fn window(&self, n: usize) -> impl ExactSizeIterator<Item = &Sample> + Clone + '_ {
        let skip = self.samples.len().saturating_sub(n);
        self.samples.range(skip..)
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::sample_at;

    fn filled(capacity: usize, count: usize) -> TrendBuffer {
        let mut buffer = TrendBuffer::new(capacity);
        for i in 0..count {
            buffer.push(sample_at(i as i64, 220.0, 1.0, i as f64, 0.0));
        }
        buffer
    }

    #[test]
    fn test_evicts_oldest_first() {
        let buffer = filled(50, 60);
        assert_eq!(buffer.window(usize::MAX).len(), 50);

        let powers: Vec<f64> = buffer.window(50).map(|s| s.power).collect();
        let expected: Vec<f64> = (10..60).map(|i| i as f64).collect();
        assert_eq!(powers, expected);
    }

    #[test]
    fn test_window_larger_than_buffer_returns_everything() {
        let buffer = filled(50, 5);
        assert_eq!(buffer.window(100).len(), 5);
        assert_eq!(buffer.window(0).len(), 0);
    }

    #[test]
    fn test_window_returns_most_recent_in_order() {
        let buffer = filled(10, 8);
        let powers: Vec<f64> = buffer.window(3).map(|s| s.power).collect();
        assert_eq!(powers, vec![5.0, 6.0, 7.0]);
        assert_eq!(buffer.latest().map(|s| s.power), Some(7.0));
    }

    #[test]
    fn test_window_is_restartable() {
        let buffer = filled(10, 4);
        let view = buffer.window(4);
        let first: Vec<f64> = view.clone().map(|s| s.power).collect();
        let second: Vec<f64> = view.map(|s| s.power).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let buffer = filled(0, 3);
        assert_eq!(buffer.window(usize::MAX).len(), 1);
        assert_eq!(buffer.latest().map(|s| s.power), Some(2.0));
    }
}
