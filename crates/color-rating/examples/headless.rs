//! Drives the rating selector without a UI.
//!
//! Run with `RUST_LOG=color_rating=debug,color_rating_core=debug` to see the
//! runner's logs.

use std::time::Duration;

use color_rating::RatingSelector;
use color_rating_core::{AnimationConfig, AnimationRunner, ColorTarget, Easing};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AnimationConfig::default()
        .with_default_duration(Duration::from_millis(400))
        .with_default_easing(Easing::CubicOut);
    let selector = RatingSelector::new(AnimationRunner::new(config)?);

    selector
        .caption_changed
        .connect(|caption| println!("caption: {caption}"));
    selector.swatches()[0]
        .color_changed
        .connect(|color| tracing::trace!(%color, "bottom swatch"));

    println!("{}: {}", selector.title(), selector.caption());

    // The second tap lands mid-transition and cancels the first group.
    let first = selector.tap(2)?;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = selector.tap_automation_id("4")?;

    let first = first.await;
    println!("rating 2 transition: {} of 5 swatches canceled", first.canceled());
    let second = second.await;
    println!("rating 4 transition completed: {}", second.all_completed());

    for swatch in selector.swatches() {
        println!("swatch {}: {}", swatch.position(), swatch.color());
    }

    if let Some(prompt) = selector.submit() {
        println!("[{}] {} ({})", prompt.title, prompt.message, prompt.dismiss);
    }
    Ok(())
}
