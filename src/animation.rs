//! Frame loop driving a bubble field.
//!
//! A field and its sink move onto a dedicated frame thread that ticks at a
//! fixed rate until the returned [`AnimationHandle`] stops it. Exactly one
//! frame is in flight at a time. Per-frame increments are fixed, so when the
//! thread falls behind, missed ticks are dropped rather than replayed and
//! the animation slows down instead of jumping.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::bubbles::BubbleField;
use crate::error::DriftError;
use crate::sink::TransformSink;

type LoopResult<S> = Result<(BubbleField, S), DriftError>;

/// Fixed-rate frame scheduler
#[derive(Debug, Clone, Copy)]
pub struct FrameLoop {
    fps: f64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self { fps: 60.0 }
    }
}

impl FrameLoop {
    /// Create a loop ticking `fps` times per second (clamped to at least 1)
    pub fn new(fps: f64) -> Self {
        Self {
            fps: if fps.is_finite() { fps.max(1.0) } else { 60.0 },
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Time between ticks
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }

    /// Run `frames` updates synchronously, without pacing
    pub fn run_frames<S: TransformSink + ?Sized>(
        field: &mut BubbleField,
        sink: &mut S,
        frames: u64,
    ) -> Result<(), DriftError> {
        for _ in 0..frames {
            field.update(sink)?;
        }
        Ok(())
    }

    /// Start animating `field` on its own thread
    pub fn start<S>(&self, field: BubbleField, sink: S) -> Result<AnimationHandle<S>, DriftError>
    where
        S: TransformSink + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));
        let interval = self.interval();

        let stop_flag = Arc::clone(&stop);
        let frame_count = Arc::clone(&frames);
        let thread = thread::Builder::new()
            .name("bubbledrift-frames".to_string())
            .spawn(move || frame_thread(field, sink, interval, stop_flag, frame_count))?;

        info!("Frame loop started at {} fps", self.fps);

        Ok(AnimationHandle {
            stop,
            frames,
            thread: Some(thread),
        })
    }
}

fn frame_thread<S: TransformSink>(
    mut field: BubbleField,
    mut sink: S,
    interval: Duration,
    stop: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
) -> LoopResult<S> {
    let mut next_tick = Instant::now();

    while !stop.load(Ordering::Acquire) {
        if let Err(e) = field.update(&mut sink) {
            warn!("Frame loop stopped after {} frames: {}", field.frame(), e);
            return Err(e);
        }
        frames.fetch_add(1, Ordering::Release);

        next_tick += interval;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            // Behind schedule: drop the missed ticks
            next_tick = now;
        }
    }

    Ok((field, sink))
}

/// Owner of a running frame loop
///
/// Dropping the handle stops the loop and waits for the frame thread.
pub struct AnimationHandle<S> {
    stop: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    thread: Option<thread::JoinHandle<LoopResult<S>>>,
}

impl<S> AnimationHandle<S> {
    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Whether the frame thread is still ticking
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the pending frame and hand back the field and sink
    ///
    /// Returns the error that ended the loop early, if any.
    pub fn stop(mut self) -> LoopResult<S> {
        self.stop.store(true, Ordering::Release);
        let thread = self.thread.take().ok_or(DriftError::LoopPanicked)?;
        let result = thread.join().map_err(|_| DriftError::LoopPanicked)?;
        info!("Frame loop stopped after {} frames", self.frames());
        result
    }
}

impl<S> Drop for AnimationHandle<S> {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
