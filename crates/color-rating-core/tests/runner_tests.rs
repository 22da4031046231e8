//! Tests for the animation runner driving real targets over time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use color_rating_core::{
    AnimationConfig, AnimationHandle, AnimationRequest, AnimationRunner, Color, ColorTarget,
    Easing, Property, Signal,
};
use futures_util::FutureExt;
use futures_util::future::join_all;
use parking_lot::Mutex;

const GRAY: Color = Color::from_rgb8(51, 51, 51);
const RED: Color = Color::from_rgb8(189, 44, 51);
const BLUE: Color = Color::from_rgb8(27, 125, 185);

struct Cell {
    id: String,
    color: Property<Color>,
    color_changed: Signal<Color>,
    writes: Mutex<Vec<Color>>,
}

impl Cell {
    fn new(id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            color: Property::new(GRAY),
            color_changed: Signal::new(),
            writes: Mutex::new(Vec::new()),
        })
    }
}

impl ColorTarget for Cell {
    fn target_id(&self) -> &str {
        &self.id
    }

    fn color(&self) -> Color {
        self.color.get()
    }

    fn set_color(&self, color: Color) {
        self.writes.lock().push(color);
        if self.color.set(color) {
            self.color_changed.emit(color);
        }
    }
}

fn runner() -> AnimationRunner {
    AnimationRunner::new(AnimationConfig::default()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_gray_to_red_linear() {
    let runner = runner();
    let cell = Cell::new("1");
    let request = AnimationRequest::new(GRAY, RED, Duration::from_millis(250)).with_easing(Easing::Linear);

    let completed = runner
        .animate(&cell, &AnimationHandle::COLOR, request)
        .unwrap()
        .await;

    assert!(completed);
    assert_eq!(cell.color(), RED);

    // Linear progress: the red channel only ever increases.
    let writes = cell.writes.lock();
    assert!(writes.windows(2).all(|w| w[0].r <= w[1].r));
    assert!(writes.iter().all(Color::is_in_range));
}

#[tokio::test(start_paused = true)]
async fn test_group_join_waits_for_every_run() {
    let runner = runner();
    let cells: Vec<_> = (1..=5).map(|i| Cell::new(i.to_string())).collect();

    let completions = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let duration = Duration::from_millis(100 * (i as u64 + 1));
            runner.animate(cell, &AnimationHandle::COLOR, AnimationRequest::new(GRAY, BLUE, duration))
        })
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut group = join_all(completions).boxed();

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!((&mut group).now_or_never().is_none());
    assert_eq!(cells[0].color(), BLUE);
    assert_ne!(cells[4].color(), BLUE);

    assert!(runner.cancel(cells[3].as_ref(), &AnimationHandle::COLOR));
    let results = group.await;
    assert_eq!(results, [true, true, true, false, true]);
    assert_eq!(runner.active_runs(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_all_for_target() {
    let runner = runner();
    let cell = Cell::new("1");
    let fade = AnimationHandle::from_static("Fade");

    let a = runner
        .animate(&cell, &AnimationHandle::COLOR, AnimationRequest::new(GRAY, RED, Duration::from_secs(1)))
        .unwrap();
    let b = runner
        .animate(&cell, &fade, AnimationRequest::new(GRAY, BLUE, Duration::from_secs(1)))
        .unwrap();

    assert_eq!(runner.cancel_all_for(cell.as_ref()), 2);
    assert!(!a.await);
    assert!(!b.await);
    assert_eq!(runner.cancel_all_for(cell.as_ref()), 0);
}

/// A target that cancels its own run from inside a color write.
struct SelfCanceling {
    color: Property<Color>,
    runner: OnceLock<AnimationRunner>,
}

impl ColorTarget for SelfCanceling {
    fn target_id(&self) -> &str {
        "self-canceling"
    }

    fn color(&self) -> Color {
        self.color.get()
    }

    fn set_color(&self, color: Color) {
        self.color.set(color);
        if color.r > 0.5
            && let Some(runner) = self.runner.get()
        {
            runner.cancel(self, &AnimationHandle::COLOR);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_target_may_cancel_from_write() {
    let runner = runner();
    let target = Arc::new(SelfCanceling {
        color: Property::new(Color::BLACK),
        runner: OnceLock::new(),
    });
    let _ = target.runner.set(runner.clone());

    let request = AnimationRequest::new(Color::BLACK, Color::WHITE, Duration::from_millis(500));
    let completed = tokio::time::timeout(
        Duration::from_secs(5),
        runner.animate(&target, &AnimationHandle::COLOR, request).unwrap(),
    )
    .await
    .expect("run should end");

    assert!(!completed);
    let stopped_at = target.color();
    assert!(stopped_at.r > 0.5 && stopped_at.r < 1.0);
}

#[tokio::test(start_paused = true)]
async fn test_observer_restart_supersedes() {
    let runner = runner();
    let cell = Cell::new("1");
    let restarted = Arc::new(AtomicBool::new(false));
    let second = Arc::new(Mutex::new(None));

    // Restart toward blue from inside the first change notification only.
    let weak = Arc::downgrade(&cell);
    let r = runner.clone();
    let (flag, slot) = (restarted.clone(), second.clone());
    cell.color_changed.connect(move |_| {
        if flag.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(cell) = weak.upgrade() {
            let request = AnimationRequest::new(cell.color(), BLUE, Duration::from_millis(100));
            *slot.lock() = r.animate(&cell, &AnimationHandle::COLOR, request).ok();
        }
    });

    let first = runner
        .animate(&cell, &AnimationHandle::COLOR, AnimationRequest::new(Color::BLACK, RED, Duration::from_millis(250)))
        .unwrap();
    assert!(!first.await);

    let second = second.lock().take().expect("observer should have restarted the run");
    assert!(second.await);
    assert_eq!(cell.color(), BLUE);
    assert_eq!(runner.active_runs(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_same_id_targets_do_not_supersede() {
    let runner = runner();
    let left = Cell::new("swatch");
    let right = Cell::new("swatch");

    let a = runner.color_to(&left, RED).unwrap();
    let b = runner.color_to(&right, BLUE).unwrap();

    assert_eq!(join_all([a, b]).await, [true, true]);
    assert_eq!(left.color(), RED);
    assert_eq!(right.color(), BLUE);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cross_target_observers_do_not_deadlock() {
    let config = AnimationConfig::default().with_tick_interval(Duration::from_millis(1));
    let runner = AnimationRunner::new(config).unwrap();
    let a = Cell::new("a");
    let b = Cell::new("b");

    // Each write on one cell inspects the other cell's run.
    for (from, to) in [(&a, &b), (&b, &a)] {
        let other = Arc::downgrade(to);
        let r = runner.clone();
        from.color_changed.connect(move |_| {
            if let Some(other) = other.upgrade() {
                let _ = r.is_running(other.as_ref(), &AnimationHandle::COLOR);
            }
        });
    }

    let request = AnimationRequest::new(Color::BLACK, Color::WHITE, Duration::from_millis(200));
    let runs = join_all([
        runner.animate(&a, &AnimationHandle::COLOR, request).unwrap(),
        runner.animate(&b, &AnimationHandle::COLOR, request).unwrap(),
    ]);

    let results = tokio::time::timeout(Duration::from_secs(5), runs)
        .await
        .expect("runs should finish without deadlocking");
    assert_eq!(results, [true, true]);
}

#[tokio::test(start_paused = true)]
async fn test_tick_interval_from_config() {
    let config = AnimationConfig::from_toml_str("tick_interval_ms = 50\ndefault_duration_ms = 250").unwrap();
    let runner = AnimationRunner::new(config).unwrap();
    let cell = Cell::new("1");

    assert!(runner.color_to(&cell, RED).unwrap().await);
    let writes = cell.writes.lock().len();
    assert!((5..=7).contains(&writes), "expected about six ticks, got {writes}");
}

#[tokio::test(start_paused = true)]
async fn test_dropping_completion_does_not_cancel() {
    let runner = runner();
    let cell = Cell::new("1");
    drop(runner.color_to(&cell, RED).unwrap());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(cell.color(), RED);
    assert!(!runner.is_running(cell.as_ref(), &AnimationHandle::COLOR));
}
