//! Jittered auto-rotation of the displayed quote.
//!
//! `AutoRotator` owns at most one timer worker thread. The worker waits on a
//! crossbeam `select!` between its stop channel and a one-shot `after(period)`
//! timer; on expiry it runs a full refresh cycle and schedules the next tick.
//! The period is `base + uniform[0, jitter]`, redrawn on every tick. When a
//! cycle had to fall back to the static list, the next tick comes after the
//! shorter `retry` delay instead, on the same timer. Every delay is at least
//! `MIN_PERIOD`.
//!
//! Rotation states are `Stopped` and `Running`:
//! - `start` moves to `Running`, replacing any existing timer;
//! - `stop` moves to `Stopped`;
//! - a tick keeps `Running` and reschedules.
//!
//! Cancelling a worker joins it, so after `start`/`stop` return the number of
//! live timers is exact. An in-flight HTTP request is not interrupted; the stop
//! takes effect once that request's own timeout elapses at the latest.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, after, select, unbounded};
use log::{debug, error, info};
use quote_common::net::{RETRY_INTERVAL_MS, ROTATE_INTERVAL_MS};
use rand::Rng;

use crate::board::{QuoteBoard, QuoteDisplay, run_cycle};
use crate::fetcher::Fetcher;
use crate::latch::InteractionLatch;
use crate::provider::{Origin, QuoteProvider};

/// Shortest delay between two ticks.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Timing of the rotation timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationConfig {
    /// Minimum time between two refreshes.
    pub base: Duration,
    /// Upper bound of the random delay added to `base`.
    pub jitter: Duration,
    /// Delay used after a refresh fell back to the static list.
    pub retry: Duration,
}

impl Default for RotationConfig {
    fn default() -> Self {
        RotationConfig {
            base: Duration::from_millis(ROTATE_INTERVAL_MS),
            jitter: Duration::ZERO,
            retry: Duration::from_millis(RETRY_INTERVAL_MS),
        }
    }
}

impl RotationConfig {
    /// Delay before the next tick after a fallback, never below `MIN_PERIOD`.
    pub fn retry_delay(&self) -> Duration {
        self.retry.max(MIN_PERIOD)
    }
}

/// Draw the next tick period: `base + uniform[0, jitter]` at millisecond resolution.
///
/// A `base` shorter than `MIN_PERIOD` is raised to it.
pub fn next_period<R: Rng>(base: Duration, jitter: Duration, rng: &mut R) -> Duration {
    let base = base.max(MIN_PERIOD);
    let jitter_ms = jitter.as_millis() as u64;
    if jitter_ms == 0 {
        return base;
    }
    base + Duration::from_millis(rng.random_range(0..=jitter_ms))
}

/// Counts a timer worker as live from spawn until its thread exits.
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        LiveGuard(Arc::clone(counter))
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct TimerWorker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl TimerWorker {
    fn cancel(self) {
        let _ = self.stop_tx.send(());
        if self.handle.join().is_err() {
            error!("Rotation timer thread panicked");
        }
    }
}

/// Periodically refreshes a `QuoteBoard` from a `QuoteProvider`.
pub struct AutoRotator<F, D> {
    provider: Arc<QuoteProvider<F>>,
    board: Arc<QuoteBoard<D>>,
    config: RotationConfig,
    worker: Option<TimerWorker>,
    latch: InteractionLatch,
    live: Arc<AtomicUsize>,
}

impl<F, D> AutoRotator<F, D> {
    fn cancel_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel();
        }
    }

    /// Whether a timer is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Whether rotation is suspended by an interaction and will resume.
    pub fn is_paused(&self) -> bool {
        self.latch.is_paused()
    }

    /// Timer worker threads still alive.
    pub fn live_timers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Configuration of the current (or last) rotation.
    pub fn config(&self) -> RotationConfig {
        self.config
    }

    /// Board the timer and manual refreshes write to.
    pub fn board(&self) -> &Arc<QuoteBoard<D>> {
        &self.board
    }
}

impl<F, D> AutoRotator<F, D>
where
    F: Fetcher + 'static,
    D: QuoteDisplay + 'static,
{
    /// New rotator in the `Stopped` state.
    pub fn new(provider: Arc<QuoteProvider<F>>, board: Arc<QuoteBoard<D>>) -> Self {
        AutoRotator {
            provider,
            board,
            config: RotationConfig::default(),
            worker: None,
            latch: InteractionLatch::new(),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Start rotating with `config`, replacing any running timer.
    pub fn start(&mut self, config: RotationConfig) {
        self.latch.clear();
        self.config = config;
        self.spawn_worker();
    }

    /// Stop rotating. No-op when already stopped.
    pub fn stop(&mut self) {
        self.latch.clear();
        if self.worker.is_some() {
            self.cancel_worker();
            info!("Quote rotation stopped");
        }
    }

    /// Suspend rotation for a user interaction, remembering whether it ran.
    pub fn pause_for_interaction(&mut self) {
        if self.latch.pause(self.is_running()) {
            self.cancel_worker();
            info!("Quote rotation paused");
        }
    }

    /// Restore rotation if it was running when the interaction began.
    pub fn resume_after_interaction(&mut self) {
        if self.latch.resume() {
            self.spawn_worker();
            info!("Quote rotation resumed");
        }
    }

    /// Refresh once right away on a separate thread.
    ///
    /// May overlap with a timer tick; the board keeps only the newest result.
    pub fn refresh_now(&self) -> JoinHandle<Origin> {
        let provider = Arc::clone(&self.provider);
        let board = Arc::clone(&self.board);
        thread::spawn(move || run_cycle(&provider, &board))
    }

    fn spawn_worker(&mut self) {
        self.cancel_worker();

        let (stop_tx, stop_rx) = unbounded::<()>();
        let provider = Arc::clone(&self.provider);
        let board = Arc::clone(&self.board);
        let config = self.config;
        let live = LiveGuard::new(&self.live);

        let handle = thread::spawn(move || {
            let _live = live;
            let mut rng = rand::rng();
            let mut delay = next_period(config.base, config.jitter, &mut rng);
            debug!("Rotation timer started, first tick in {} ms", delay.as_millis());

            loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(after(delay)) -> _ => {
                        delay = match run_cycle(&provider, &board) {
                            Origin::Fallback => {
                                let retry = config.retry_delay();
                                info!("Retrying quote services in {} ms", retry.as_millis());
                                retry
                            }
                            Origin::Remote(_) => next_period(config.base, config.jitter, &mut rng),
                        };
                    }
                }
            }
            debug!("Rotation timer exited");
        });

        self.worker = Some(TimerWorker { stop_tx, handle });
        info!(
            "Quote rotation running every {} ms (+ up to {} ms jitter)",
            config.base.as_millis(),
            config.jitter.as_millis()
        );
    }
}

impl<F, D> Drop for AutoRotator<F, D> {
    fn drop(&mut self) {
        self.cancel_worker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{QUOTABLE_BODY, RecordingDisplay, Reply, ScriptedFetcher};
    use quote_common::{EndpointSpec, Source};

    fn online() -> Arc<QuoteProvider<ScriptedFetcher>> {
        let fetcher = ScriptedFetcher::new().reply("http://one", Reply::Body(QUOTABLE_BODY));
        Arc::new(
            QuoteProvider::new(fetcher)
                .with_endpoints(vec![EndpointSpec::with_url(Source::Quotable, "http://one")]),
        )
    }

    fn offline() -> Arc<QuoteProvider<ScriptedFetcher>> {
        Arc::new(QuoteProvider::new(ScriptedFetcher::new()).with_endpoints(Vec::new()))
    }

    fn new_rotator(
        provider: Arc<QuoteProvider<ScriptedFetcher>>,
    ) -> AutoRotator<ScriptedFetcher, RecordingDisplay> {
        AutoRotator::new(provider, Arc::new(QuoteBoard::new(RecordingDisplay::default())))
    }

    fn every(ms: u64) -> RotationConfig {
        RotationConfig {
            base: Duration::from_millis(ms),
            jitter: Duration::ZERO,
            retry: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_next_period_within_bounds() {
        let mut rng = rand::rng();
        let base = Duration::from_millis(1000);
        let jitter = Duration::from_millis(250);
        for _ in 0..500 {
            let period = next_period(base, jitter, &mut rng);
            assert!(period >= base);
            assert!(period <= base + jitter);
        }
    }

    #[test]
    fn test_next_period_without_jitter() {
        let mut rng = rand::rng();
        let base = Duration::from_millis(40);
        assert_eq!(next_period(base, Duration::ZERO, &mut rng), base);
    }

    #[test]
    fn test_zero_periods_are_raised() {
        let mut rng = rand::rng();
        assert_eq!(next_period(Duration::ZERO, Duration::ZERO, &mut rng), MIN_PERIOD);
        let config = RotationConfig {
            base: Duration::ZERO,
            jitter: Duration::ZERO,
            retry: Duration::ZERO,
        };
        assert_eq!(config.retry_delay(), MIN_PERIOD);
    }

    #[test]
    fn test_zero_config_does_not_spin() {
        let mut rotator = new_rotator(offline());
        rotator.start(RotationConfig {
            base: Duration::ZERO,
            jitter: Duration::ZERO,
            retry: Duration::ZERO,
        });
        thread::sleep(Duration::from_millis(100));
        rotator.stop();
        // At one tick per millisecond at most, 100 ms allows about 100 refreshes.
        let cycles = rotator.board().display().shown_count();
        assert!(cycles >= 1);
        assert!(cycles <= 150, "{} refreshes in 100 ms", cycles);
    }

    #[test]
    fn test_initially_stopped() {
        let rotator = new_rotator(online());
        assert!(!rotator.is_running());
        assert_eq!(rotator.live_timers(), 0);
        assert_eq!(rotator.config(), RotationConfig::default());
    }

    #[test]
    fn test_ticks_refresh_display() {
        let mut rotator = new_rotator(online());
        rotator.start(every(20));
        thread::sleep(Duration::from_millis(250));
        rotator.stop();

        assert!(rotator.board().display().shown_count() >= 2);
        assert_eq!(rotator.live_timers(), 0);
    }

    #[test]
    fn test_double_start_keeps_one_timer() {
        let mut rotator = new_rotator(online());
        rotator.start(every(40));
        rotator.start(every(40));
        assert!(rotator.is_running());
        assert_eq!(rotator.live_timers(), 1);

        thread::sleep(Duration::from_millis(210));
        rotator.stop();
        // One timer ticks at most five times in this window; two would double that.
        assert!(rotator.board().display().shown_count() <= 6);
        assert_eq!(rotator.live_timers(), 0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut rotator = new_rotator(online());
        rotator.stop();
        rotator.start(every(1000));
        rotator.stop();
        rotator.stop();
        assert!(!rotator.is_running());
        assert_eq!(rotator.live_timers(), 0);
    }

    #[test]
    fn test_pause_when_stopped_does_not_resume() {
        let mut rotator = new_rotator(online());
        rotator.pause_for_interaction();
        rotator.resume_after_interaction();
        assert!(!rotator.is_running());
        assert_eq!(rotator.live_timers(), 0);
    }

    #[test]
    fn test_pause_resume_restores_rotation() {
        let mut rotator = new_rotator(online());
        rotator.start(every(1000));

        rotator.pause_for_interaction();
        assert!(!rotator.is_running());
        assert!(rotator.is_paused());
        assert_eq!(rotator.live_timers(), 0);

        rotator.resume_after_interaction();
        assert!(rotator.is_running());
        assert_eq!(rotator.live_timers(), 1);
        assert_eq!(rotator.config(), every(1000));
    }

    #[test]
    fn test_double_pause_single_resume() {
        let mut rotator = new_rotator(online());
        rotator.start(every(1000));
        rotator.pause_for_interaction();
        rotator.pause_for_interaction();
        rotator.resume_after_interaction();
        assert!(rotator.is_running());
        assert_eq!(rotator.live_timers(), 1);

        rotator.resume_after_interaction();
        assert_eq!(rotator.live_timers(), 1);
    }

    #[test]
    fn test_stop_while_paused_clears_latch() {
        let mut rotator = new_rotator(online());
        rotator.start(every(1000));
        rotator.pause_for_interaction();
        rotator.stop();
        rotator.resume_after_interaction();
        assert!(!rotator.is_running());
    }

    #[test]
    fn test_fallback_uses_retry_delay() {
        let mut rotator = new_rotator(offline());
        rotator.start(RotationConfig {
            base: Duration::from_millis(60),
            jitter: Duration::ZERO,
            retry: Duration::from_millis(10),
        });
        thread::sleep(Duration::from_millis(260));
        assert_eq!(rotator.live_timers(), 1);
        rotator.stop();

        // The base period alone allows at most four ticks in this window.
        assert!(rotator.board().display().shown_count() >= 6);
        assert!(!rotator.board().display().notices.lock().unwrap().is_empty());
    }

    #[test]
    fn test_first_tick_waits_for_period() {
        let mut rotator = new_rotator(offline());
        rotator.start(RotationConfig {
            base: Duration::from_secs(10),
            jitter: Duration::ZERO,
            retry: Duration::from_millis(10),
        });
        thread::sleep(Duration::from_millis(100));
        rotator.stop();
        assert_eq!(rotator.board().display().shown_count(), 0);
    }

    #[test]
    fn test_refresh_now_overlapping_timer() {
        let mut rotator = new_rotator(online());
        rotator.start(every(1000));
        let origin = rotator.refresh_now().join().unwrap();
        assert_eq!(origin, Origin::Remote(Source::Quotable));
        assert_eq!(rotator.board().display().shown_count(), 1);
        assert_eq!(rotator.live_timers(), 1);
    }
}
