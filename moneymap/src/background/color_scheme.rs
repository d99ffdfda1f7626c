//! Polls the OS color-scheme signal and reports changes as events.

use crate::appearance;
use crate::events::DataEvent;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Something that can say whether the OS currently prefers a dark scheme
pub trait ColorSchemeSource: Send + 'static {
    fn prefers_dark(&self) -> bool;
}

/// Reads the process environment on every poll
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvColorScheme;

impl ColorSchemeSource for EnvColorScheme {
    fn prefers_dark(&self) -> bool {
        appearance::os_prefers_dark()
    }
}

impl<F> ColorSchemeSource for F
where
    F: Fn() -> bool + Send + 'static,
{
    fn prefers_dark(&self) -> bool {
        self()
    }
}

/// Send an event whenever the signal differs from the last one seen.
/// Returns once the receiving side is gone.
pub async fn watch_color_scheme<S: ColorSchemeSource>(
    source: S,
    initial: bool,
    interval: Duration,
    data_tx: UnboundedSender<DataEvent>,
) {
    let mut last = initial;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let prefers_dark = source.prefers_dark();
        if prefers_dark == last {
            continue;
        }
        last = prefers_dark;

        tracing::info!("OS color scheme changed, prefers dark: {}", prefers_dark);
        if data_tx
            .send(DataEvent::OsColorSchemeChanged { prefers_dark })
            .is_err()
        {
            tracing::debug!("Color scheme watcher stopping, receiver dropped");
            return;
        }
    }
}
