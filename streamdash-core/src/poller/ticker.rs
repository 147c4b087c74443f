use std::fmt::Debug;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

/// Source of poll ticks.
///
/// Production uses [`IntervalTicker`]. Tests drive the loop by hand.
pub trait Ticker: Send + Sync + Debug {
    fn ticks(&self, period: Duration) -> BoxStream<'static, ()>;
}

/// Tokio interval ticker. The first tick fires immediately; missed ticks
/// are skipped rather than replayed in a burst.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalTicker;

impl Ticker for IntervalTicker {
    fn ticks(&self, period: Duration) -> BoxStream<'static, ()> {
        let period = period.max(Duration::from_millis(1));
        // Built on first poll so the interval is created inside the runtime.
        stream::once(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            IntervalStream::new(interval)
        })
        .flatten()
        .map(|_| ())
        .boxed()
    }
}
