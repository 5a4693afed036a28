use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ProgressSettings;
use crate::pipeline::types::PipelineState;

/// Nudges the in-flight progress forward on a fixed interval until stopped.
///
/// The percentage is only an estimate; it stalls at the configured cap until
/// the run completes and the state jumps straight to 100.
pub struct ProgressTicker {
    cancel_token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub fn spawn(state: Arc<watch::Sender<PipelineState>>, settings: &ProgressSettings) -> Self {
        let cancel_token = CancellationToken::new();
        let task = tokio::spawn(Self::run(
            state,
            settings.tick_interval(),
            settings.step,
            settings.cap,
            cancel_token.clone(),
        ));
        Self {
            cancel_token,
            task: Some(task),
        }
    }

    async fn run(
        state: Arc<watch::Sender<PipelineState>>,
        period: std::time::Duration,
        step: u8,
        cap: u8,
        cancel_token: CancellationToken,
    ) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately.
        interval.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => break,
                _ = interval.tick() => {
                    state.send_if_modified(|s| s.tick(step, cap));
                }
            }
        }
        debug!("Progress ticker stopped");
    }

    /// Stops ticking and waits until no further tick can land.
    pub async fn stop(mut self) {
        self.cancel_token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!("Progress ticker ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;
    use crate::common::{MediaFile, SelectedMedia};

    fn uploading_state() -> Arc<watch::Sender<PipelineState>> {
        let mut state = PipelineState::default();
        let file = MediaFile::new("a.png", "image/png", vec![1u8, 2, 3]);
        state.select(SelectedMedia::try_from_file(file).unwrap());
        state.begin_upload(Uuid::new_v4());
        Arc::new(watch::Sender::new(state))
    }

    fn settings() -> ProgressSettings {
        ProgressSettings {
            tick_interval_ms: 50,
            step: 10,
            cap: 95,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_stalls_at_cap() {
        let state = uploading_state();
        let ticker = ProgressTicker::spawn(state.clone(), &settings());

        tokio::time::sleep(Duration::from_millis(175)).await;
        assert_eq!(state.borrow().progress(), Some(30));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.borrow().progress(), Some(95));

        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_stop() {
        let state = uploading_state();
        let ticker = ProgressTicker::spawn(state.clone(), &settings());

        tokio::time::sleep(Duration::from_millis(120)).await;
        ticker.stop().await;
        let frozen = state.borrow().progress();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(state.borrow().progress(), frozen);
    }
}
