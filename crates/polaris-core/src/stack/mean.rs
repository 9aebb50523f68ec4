use ndarray::Array2;

use crate::frame::Frame;

/// Streaming per-pixel mean of co-registered frames.
///
/// Seeded with the reference frame and updated one aligned frame at a
/// time as `M = (1 - 1/n) * M + (1/n) * frame`, so only a single
/// reference-sized buffer is ever held. The accumulator runs in f64.
pub struct RunningMean {
    acc: Array2<f64>,
    count: usize,
}

impl RunningMean {
    /// Start the accumulator with the reference frame (count = 1).
    pub fn seed(frame: &Frame) -> Self {
        Self {
            acc: frame.data.mapv(|v| v as f64),
            count: 1,
        }
    }

    /// Fold one aligned frame into the mean.
    pub fn add(&mut self, frame: &Frame) {
        debug_assert_eq!(self.acc.dim(), frame.data.dim());
        self.count += 1;
        let weight = 1.0 / self.count as f64;
        ndarray::Zip::from(&mut self.acc)
            .and(&frame.data)
            .for_each(|a, &v| *a = (1.0 - weight) * *a + weight * v as f64);
    }

    /// Frames folded in so far, including the seed.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_frame(self) -> Frame {
        Frame::new(self.acc.mapv(|v| v as f32))
    }
}
