//! Color animation runner.
//!
//! [`AnimationRunner`] drives a target's color from a start value to an end
//! value over a fixed duration. Every tick it computes the linear progress,
//! applies the run's [`Easing`], interpolates, and writes the result to the
//! target. Completion is exposed as an [`AnimationCompletion`] future that
//! resolves to `true` when the run reached its end color and `false` when it
//! was canceled, superseded, or lost its target.
//!
//! Runs are keyed by `(target, handle)`, where the target is the object
//! itself rather than its id. At most one run per key is active:
//! starting a new run cancels the previous one, resolving its completion with
//! `false` before the new run is installed.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use color_rating_core::{
//!     AnimationConfig, AnimationHandle, AnimationRequest, AnimationRunner, Color, ColorTarget,
//!     Property,
//! };
//!
//! struct Panel {
//!     background: Property<Color>,
//! }
//!
//! impl ColorTarget for Panel {
//!     fn target_id(&self) -> &str {
//!         "panel"
//!     }
//!     fn color(&self) -> Color {
//!         self.background.get()
//!     }
//!     fn set_color(&self, color: Color) {
//!         self.background.set(color);
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = AnimationRunner::new(AnimationConfig::default())?;
//! let panel = Arc::new(Panel { background: Property::new(Color::EMPTY_SWATCH) });
//!
//! let request = AnimationRequest::new(
//!     Color::EMPTY_SWATCH,
//!     Color::from_rgb8(189, 44, 51),
//!     Duration::from_millis(250),
//! );
//! let completed = runner.animate(&panel, &AnimationHandle::COLOR, request)?.await;
//! assert!(completed);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::Instrument;

use crate::cancel::CancellationToken;
use crate::color::{Color, interpolate};
use crate::config::AnimationConfig;
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::logging::{self, targets};
use crate::target::{AnimationHandle, ColorTarget};

/// Shortest tick period the runner will schedule.
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Parameters of one color animation.
#[derive(Debug, Clone, Copy)]
pub struct AnimationRequest {
    /// Color written by the first tick.
    pub from: Color,
    /// Color written, exactly, by the final tick.
    pub to: Color,
    /// Total run time. Zero applies `to` immediately.
    pub duration: Duration,
    /// Curve applied to the linear progress before interpolating.
    pub easing: Easing,
}

impl AnimationRequest {
    /// Create a linear request.
    pub fn new(from: Color, to: Color, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::Linear,
        }
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Resolves once when a run ends: `true` if it completed, `false` if it was
/// canceled or superseded.
///
/// Dropping the completion does not cancel the run.
pub struct AnimationCompletion {
    receiver: oneshot::Receiver<bool>,
    result: Option<bool>,
}

impl AnimationCompletion {
    fn new(receiver: oneshot::Receiver<bool>) -> Self {
        Self {
            receiver,
            result: None,
        }
    }

    /// Get the result without waiting, if the run has already ended.
    pub fn try_result(&mut self) -> Option<bool> {
        if self.result.is_none() {
            self.result = match self.receiver.try_recv() {
                Ok(completed) => Some(completed),
                Err(oneshot::error::TryRecvError::Empty) => None,
                Err(oneshot::error::TryRecvError::Closed) => Some(false),
            };
        }
        self.result
    }
}

impl Future for AnimationCompletion {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        if let Some(result) = self.result {
            return Poll::Ready(result);
        }
        // A sender dropped without resolving means the runtime went away.
        let completed = std::task::ready!(Pin::new(&mut self.receiver).poll(cx)).unwrap_or(false);
        self.result = Some(completed);
        Poll::Ready(completed)
    }
}

impl fmt::Debug for AnimationCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationCompletion")
            .field("result", &self.result)
            .finish()
    }
}

/// Registry key: which object is animated, and under which handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RunKey {
    /// Address of the target. Distinct for every live target, whatever its id.
    target: usize,
    handle: AnimationHandle,
}

impl RunKey {
    fn new<T: ?Sized>(target: &T, handle: &AnimationHandle) -> Self {
        Self {
            target: address_of(target),
            handle: handle.clone(),
        }
    }
}

fn address_of<T: ?Sized>(target: &T) -> usize {
    (target as *const T).cast::<()>() as usize
}

/// Registration of the run that currently owns a key.
struct ActiveRun {
    id: u64,
    token: CancellationToken,
    completion: oneshot::Sender<bool>,
}

impl ActiveRun {
    fn resolve(self, completed: bool) {
        if !completed {
            self.token.cancel();
        }
        // The caller may have dropped its completion; that is fine.
        let _ = self.completion.send(completed);
    }
}

/// The ownership slot of one key.
///
/// Never held while target code runs, so a target may start or cancel runs
/// from inside `set_color`.
type KeySlot = Mutex<Option<ActiveRun>>;

fn owns(slot: &Option<ActiveRun>, id: u64) -> bool {
    slot.as_ref().is_some_and(|run| run.id == id)
}

fn take_if_owned(slot: &mut Option<ActiveRun>, id: u64) -> Option<ActiveRun> {
    if owns(slot, id) { slot.take() } else { None }
}

struct RunnerInner {
    config: AnimationConfig,
    runtime: Handle,
    slots: Mutex<HashMap<RunKey, Arc<KeySlot>>>,
    next_run: AtomicU64,
}

/// Drives color animations on [`ColorTarget`]s.
///
/// Cloning a runner is cheap; clones share the same run registry.
#[derive(Clone)]
pub struct AnimationRunner {
    inner: Arc<RunnerInner>,
}

impl AnimationRunner {
    /// Create a runner that schedules ticks on the current Tokio runtime.
    pub fn new(config: AnimationConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| AnimationError::NoRuntime)?;
        Ok(Self::with_handle(config, runtime))
    }

    /// Create a runner that schedules ticks on the given runtime.
    pub fn with_handle(config: AnimationConfig, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(RunnerInner {
                config,
                runtime,
                slots: Mutex::new(HashMap::new()),
                next_run: AtomicU64::new(1),
            }),
        }
    }

    /// The runner's configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.inner.config
    }

    /// Animate `target`'s color under `handle`.
    ///
    /// Runs are keyed by the target object itself, not by its id, so two
    /// targets sharing an id never interfere. Any run already active for the
    /// same target and handle is canceled first and its completion resolves
    /// `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::InvalidTarget`] if the target has an empty id.
    pub fn animate<T>(
        &self,
        target: &Arc<T>,
        handle: &AnimationHandle,
        request: AnimationRequest,
    ) -> Result<AnimationCompletion>
    where
        T: ColorTarget + ?Sized,
    {
        self.animate_weak(&Arc::downgrade(target), handle, request)
    }

    /// Like [`animate`](Self::animate), for callers holding only a weak reference.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::InvalidTarget`] if the target has already been
    /// dropped or has an empty id.
    pub fn animate_weak<T>(
        &self,
        target: &Weak<T>,
        handle: &AnimationHandle,
        request: AnimationRequest,
    ) -> Result<AnimationCompletion>
    where
        T: ColorTarget + ?Sized,
    {
        let strong = target
            .upgrade()
            .ok_or_else(|| AnimationError::invalid_target("target has been dropped"))?;
        let target_id = strong.target_id();
        if target_id.is_empty() {
            return Err(AnimationError::invalid_target("target id is empty"));
        }
        let key = RunKey::new(strong.as_ref(), handle);

        let id = self.inner.next_run.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        let (sender, receiver) = oneshot::channel();
        let completion = AnimationCompletion::new(receiver);

        let slot = self.inner.slot_for(&key);
        let previous = slot.lock().replace(ActiveRun {
            id,
            token: token.clone(),
            completion: sender,
        });
        if let Some(previous) = previous {
            tracing::debug!(
                target: targets::ANIMATION,
                target_id,
                handle = %key.handle,
                superseded = previous.id,
                run = id,
                "superseding active run"
            );
            previous.resolve(false);
        }

        tracing::debug!(
            target: targets::ANIMATION,
            target_id,
            handle = %key.handle,
            run = id,
            from = %request.from,
            to = %request.to,
            duration = ?request.duration,
            easing = request.easing.name(),
            "starting run"
        );

        if request.duration.is_zero() {
            strong.set_color(request.to);
            // The write may have re-entered and replaced this run.
            let finished = take_if_owned(&mut slot.lock(), id);
            if let Some(run) = finished {
                run.resolve(true);
            }
            tracing::debug!(target: targets::ANIMATION, run = id, "zero-duration run applied");
            return Ok(completion);
        }

        let span = logging::run_span(target_id, key.handle.as_str(), id);
        let run = RunState {
            id,
            target: target.clone(),
            slot,
            token,
            request,
            started: Instant::now(),
            clamp: self.inner.config.clamp_channels,
        };
        let period = self.inner.config.tick_interval.max(MIN_TICK_INTERVAL);
        self.inner
            .runtime
            .spawn(run.run_ticks(period).instrument(span));

        Ok(completion)
    }

    /// Animate from the target's current color to `to` under
    /// [`AnimationHandle::COLOR`], with the configured default duration and easing.
    pub fn color_to<T>(&self, target: &Arc<T>, to: Color) -> Result<AnimationCompletion>
    where
        T: ColorTarget + ?Sized,
    {
        let config = &self.inner.config;
        let request = AnimationRequest::new(target.color(), to, config.default_duration)
            .with_easing(config.default_easing);
        self.animate(target, &AnimationHandle::COLOR, request)
    }

    /// Cancel the run for `target` under `handle`.
    ///
    /// The target keeps whatever color the last tick applied. Returns `true`
    /// if a run was active.
    pub fn cancel<T>(&self, target: &T, handle: &AnimationHandle) -> bool
    where
        T: ColorTarget + ?Sized,
    {
        let key = RunKey::new(target, handle);
        let Some(slot) = self.inner.existing_slot(&key) else {
            return false;
        };
        cancel_slot(&slot, target.target_id(), &key.handle)
    }

    /// Cancel every run on `target`, whatever its handle. Returns how many
    /// runs were canceled.
    pub fn cancel_all_for<T>(&self, target: &T) -> usize
    where
        T: ColorTarget + ?Sized,
    {
        let address = address_of(target);
        let matching: Vec<(AnimationHandle, Arc<KeySlot>)> = self
            .inner
            .slots
            .lock()
            .iter()
            .filter(|(key, _)| key.target == address)
            .map(|(key, slot)| (key.handle.clone(), slot.clone()))
            .collect();

        let target_id = target.target_id();
        matching
            .iter()
            .filter(|(handle, slot)| cancel_slot(slot, target_id, handle))
            .count()
    }

    /// Whether a run is active for `target` under `handle`.
    pub fn is_running<T>(&self, target: &T, handle: &AnimationHandle) -> bool
    where
        T: ColorTarget + ?Sized,
    {
        self.inner
            .existing_slot(&RunKey::new(target, handle))
            .is_some_and(|slot| slot.lock().is_some())
    }

    /// Number of runs currently active across all targets.
    pub fn active_runs(&self) -> usize {
        let slots: Vec<Arc<KeySlot>> = self.inner.slots.lock().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }
}

impl fmt::Debug for AnimationRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRunner")
            .field("config", &self.inner.config)
            .field("active_runs", &self.active_runs())
            .finish()
    }
}

impl RunnerInner {
    /// Get or create the slot for `key`, pruning idle slots nobody else holds.
    ///
    /// Slots are only locked after the registry lock is released, except for
    /// the non-blocking probe here. Pruning also drops the slots of dead
    /// targets, whose addresses may be reused.
    fn slot_for(&self, key: &RunKey) -> Arc<KeySlot> {
        let mut slots = self.slots.lock();
        slots.retain(|k, slot| {
            k == key
                || Arc::strong_count(slot) > 1
                || slot.try_lock().is_none_or(|s| s.is_some())
        });
        slots.entry(key.clone()).or_default().clone()
    }

    fn existing_slot(&self, key: &RunKey) -> Option<Arc<KeySlot>> {
        self.slots.lock().get(key).cloned()
    }
}

fn cancel_slot(slot: &KeySlot, target_id: &str, handle: &AnimationHandle) -> bool {
    let run = slot.lock().take();
    match run {
        Some(run) => {
            tracing::debug!(
                target: targets::ANIMATION,
                target_id,
                handle = %handle,
                run = run.id,
                "canceling run"
            );
            run.resolve(false);
            true
        }
        None => false,
    }
}

/// What the tick loop should do after a tick.
enum Tick {
    Continue,
    Stop,
}

/// State owned by one run's tick loop.
struct RunState<T: ?Sized> {
    id: u64,
    target: Weak<T>,
    slot: Arc<KeySlot>,
    token: CancellationToken,
    request: AnimationRequest,
    started: Instant,
    clamp: bool,
}

impl<T: ColorTarget + ?Sized> RunState<T> {
    async fn run_ticks(self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => {
                    tracing::trace!(target: targets::ANIMATION, "run canceled, stopping ticks");
                    return;
                }
                _ = interval.tick() => {}
            }

            if let Tick::Stop = self.tick() {
                return;
            }
        }
    }

    /// Compute and apply one frame.
    ///
    /// Ownership is checked under the slot lock, but the lock is released
    /// before the color is written. A run superseded during that write has
    /// already been resolved `false` by whoever replaced it.
    fn tick(&self) -> Tick {
        let (target, color, last) = {
            let mut slot = self.slot.lock();
            if !owns(&slot, self.id) {
                return Tick::Stop;
            }

            let Some(target) = self.target.upgrade() else {
                if let Some(run) = take_if_owned(&mut slot, self.id) {
                    tracing::debug!(target: targets::ANIMATION, run = self.id, "target dropped, abandoning run");
                    run.resolve(false);
                }
                return Tick::Stop;
            };

            let duration = self.request.duration.as_secs_f32();
            let linear = (self.started.elapsed().as_secs_f32() / duration).clamp(0.0, 1.0);
            if linear >= 1.0 {
                (target, self.request.to, true)
            } else {
                let eased = self.request.easing.apply(linear);
                let mut color = interpolate(self.request.from, self.request.to, eased);
                if self.clamp {
                    color = color.clamped();
                }
                tracing::trace!(target: targets::ANIMATION, linear, eased, color = %color, "tick");
                (target, color, false)
            }
        };

        target.set_color(color);
        if !last {
            return Tick::Continue;
        }

        let finished = take_if_owned(&mut self.slot.lock(), self.id);
        if let Some(run) = finished {
            tracing::debug!(target: targets::ANIMATION, run = self.id, "run completed");
            run.resolve(true);
        }
        Tick::Stop
    }
}
