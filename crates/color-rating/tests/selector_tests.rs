//! Tests for the rating selector interaction.

use std::sync::Arc;
use std::time::Duration;

use color_rating::{LEVELS, RatingColorPolicy, RatingError, RatingSelector, SubmitPrompt};
use color_rating_core::{AnimationConfig, AnimationHandle, AnimationRunner, Color, ColorTarget};
use parking_lot::Mutex;

fn selector() -> RatingSelector {
    RatingSelector::new(AnimationRunner::new(AnimationConfig::default()).unwrap())
}

fn colors(selector: &RatingSelector) -> Vec<Color> {
    selector.swatches().iter().map(|s| s.color()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_tap_three_then_five() {
    let selector = selector();

    let three = selector.tap(3).unwrap();
    let five = selector.tap(5).unwrap();

    let first = three.await;
    assert_eq!(first.results, [false; 5]);
    assert_eq!(first.canceled(), 5);

    let second = five.await;
    assert!(second.all_completed());
    assert_eq!(colors(&selector), [LEVELS[4].color; 5]);
    assert_eq!(selector.selected_rating(), Some(5));
    assert_eq!(selector.caption(), "This is the best thing I've seen!");
}

#[tokio::test(start_paused = true)]
async fn test_retap_mid_transition() {
    let selector = selector();

    let five = selector.tap(5).unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    let two = selector.tap(2).unwrap();

    assert!(!five.await.all_completed());
    assert!(two.await.all_completed());

    let red_orange = LEVELS[1].color;
    assert_eq!(
        colors(&selector),
        [red_orange, red_orange, Color::EMPTY_SWATCH, Color::EMPTY_SWATCH, Color::EMPTY_SWATCH]
    );
    assert_eq!(selector.runner().active_runs(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_lower_rating_returns_swatches_to_gray() {
    let selector = selector();
    assert!(selector.tap(4).unwrap().await.all_completed());
    assert!(selector.tap(1).unwrap().await.all_completed());

    let expected = RatingColorPolicy::new().target_colors(1).unwrap();
    assert_eq!(colors(&selector), expected);
}

#[tokio::test(start_paused = true)]
async fn test_submit_flow() {
    let selector = selector();
    let submitted = Arc::new(Mutex::new(Vec::new()));
    let s = submitted.clone();
    selector.submitted.connect(move |rating| s.lock().push(*rating));

    assert_eq!(selector.submit(), None);
    assert!(submitted.lock().is_empty());

    let _ = selector.tap_automation_id("4").unwrap();
    let prompt = selector.submit().unwrap();
    assert_eq!(
        prompt,
        SubmitPrompt {
            title: "Thanks!".to_string(),
            message: "You rated this 4/5".to_string(),
            dismiss: "OK".to_string(),
        }
    );
    assert_eq!(*submitted.lock(), [4]);
}

#[tokio::test(start_paused = true)]
async fn test_signals_on_tap() {
    let selector = selector();
    let events = Arc::new(Mutex::new(Vec::new()));

    let e = events.clone();
    selector
        .submit_enabled_changed
        .connect(move |enabled| e.lock().push(format!("enabled {enabled}")));
    let e = events.clone();
    selector.rated.connect(move |rating| e.lock().push(format!("rated {rating}")));

    let _ = selector.tap(1).unwrap();
    let _ = selector.tap(2).unwrap();

    assert_eq!(*events.lock(), ["enabled true", "rated 1", "rated 2"]);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_ratings_are_rejected() {
    let selector = selector();
    assert!(matches!(selector.tap(0), Err(RatingError::InvalidRating(0))));
    assert!(matches!(selector.tap(6), Err(RatingError::InvalidRating(6))));
    assert!(matches!(selector.tap_automation_id("x"), Err(RatingError::UnknownSwatch(_))));

    assert_eq!(selector.caption(), "Please give a rating");
    assert!(!selector.is_submit_enabled());
    assert!(
        selector
            .swatches()
            .iter()
            .all(|s| !selector.runner().is_running(s.as_ref(), &AnimationHandle::COLOR))
    );
}

#[tokio::test(start_paused = true)]
async fn test_swatch_color_changes_are_observable() {
    let selector = selector();
    let top = selector.swatch(5).unwrap().clone();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    top.color_changed.connect(move |color| s.lock().push(*color));

    assert!(selector.tap(5).unwrap().await.all_completed());

    let seen = seen.lock();
    assert!(seen.len() > 1);
    assert_eq!(seen.last(), Some(&LEVELS[4].color));
}

#[tokio::test(start_paused = true)]
async fn test_selectors_sharing_a_runner_are_independent() {
    let runner = AnimationRunner::new(AnimationConfig::default()).unwrap();
    let left = RatingSelector::new(runner.clone());
    let right = RatingSelector::new(runner);

    let three = left.tap(3).unwrap();
    let five = right.tap(5).unwrap();

    assert!(three.await.all_completed());
    assert!(five.await.all_completed());
    assert_eq!(colors(&left), RatingColorPolicy::new().target_colors(3).unwrap());
    assert_eq!(colors(&right), [LEVELS[4].color; 5]);
}
