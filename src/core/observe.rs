/// Sampling hook fed by the simulation driver.
///
/// At each sampling instant the driver hands over the current particle
/// positions in sequence order together with the running frame index.
/// What happens with a frame (rendering, file output, video assembly)
/// is entirely the implementor's business; the driver knows nothing about
/// it.
pub trait Observer {
    /// Receive one sampled configuration.
    fn on_frame(&mut self, positions: &[u32], frame: u32);
}

/// Observer that discards every frame, for runs where only the flow
/// estimate matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_frame(&mut self, _positions: &[u32], _frame: u32) {}
}

/// Observer that keeps every sampled configuration in memory, as
/// `(frame_index, positions)` tuples in arrival order.
///
/// This is the in-process stand-in for the image-per-frame output of an
/// external renderer, and what the Python surface drains to build its
/// frame matrix.
#[derive(Debug, Default, Clone)]
pub struct FrameRecorder {
    /// Recorded frames in arrival order.
    pub frames: Vec<(u32, Vec<u32>)>,
}

impl FrameRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for FrameRecorder {
    fn on_frame(&mut self, positions: &[u32], frame: u32) {
        self.frames.push((frame, positions.to_vec()));
    }
}
