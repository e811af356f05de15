//! Interval switching for one chart.
//!
//! At most one load is logically in flight. Each started load carries a
//! token; a completion whose token is no longer current is dropped, so a
//! response can never land on a torn-down widget or over a newer request.

use app_shell::ShellConfig;
use ts_core::{Candle, Interval};

use crate::history::HistoryError;
use crate::widget::ChartWidget;

/// What to do with a request that arrives while another load is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Ignore the new request until the running load settles.
    #[default]
    Reject,
    /// Start the new load at once; the older response is dropped as stale.
    Supersede,
}

impl OverlapPolicy {
    pub fn for_config(config: &ShellConfig) -> Self {
        if config.supersede_loads {
            OverlapPolicy::Supersede
        } else {
            OverlapPolicy::Reject
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        interval: Interval,
        token: u64,
        /// Interval whose data is on screen while this load runs.
        previous: Option<Interval>,
    },
    Loaded(Interval),
}

/// Proof that a load was started; handed back to [`IntervalLoader::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub interval: Interval,
    token: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRequest {
    Start(LoadTicket),
    AlreadyActive,
    Busy { loading: Interval },
    /// The owning session was torn down.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied { points: usize },
    Failed,
    Stale,
}

#[derive(Debug, Default)]
pub struct IntervalLoader {
    state: LoadState,
    next_token: u64,
    policy: OverlapPolicy,
}

impl IntervalLoader {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Interval whose data is currently displayed.
    pub fn active(&self) -> Option<Interval> {
        match self.state {
            LoadState::Idle => None,
            LoadState::Loading { previous, .. } => previous,
            LoadState::Loaded(interval) => Some(interval),
        }
    }

    pub fn loading(&self) -> Option<Interval> {
        match self.state {
            LoadState::Loading { interval, .. } => Some(interval),
            _ => None,
        }
    }

    pub fn request(&mut self, interval: Interval) -> LoadRequest {
        if self.active() == Some(interval) {
            if let (OverlapPolicy::Supersede, LoadState::Loading { .. }) =
                (self.policy, self.state)
            {
                // Switching back to what is on screen abandons the running load.
                self.state = LoadState::Loaded(interval);
            }
            return LoadRequest::AlreadyActive;
        }
        if let LoadState::Loading {
            interval: loading, ..
        } = self.state
        {
            if self.policy == OverlapPolicy::Reject || loading == interval {
                return LoadRequest::Busy { loading };
            }
        }
        self.next_token += 1;
        let token = self.next_token;
        self.state = LoadState::Loading {
            interval,
            token,
            previous: self.active(),
        };
        LoadRequest::Start(LoadTicket { interval, token })
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        matches!(self.state, LoadState::Loading { token, .. } if token == ticket.token)
    }

    /// Apply the outcome of a started load. On failure the previous interval
    /// stays active and the widget is not touched.
    pub fn settle<W: ChartWidget>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Candle>, HistoryError>,
        widget: &mut W,
    ) -> Settled {
        if !self.is_current(&ticket) {
            log::debug!("dropping stale {} history response", ticket.interval);
            return Settled::Stale;
        }
        let candles = match result {
            Ok(candles) => candles,
            Err(err) => {
                log::error!("failed to load {} history: {err}", ticket.interval);
                self.restore_previous();
                return Settled::Failed;
            }
        };
        if let Err(err) = widget.set_candles(&candles) {
            log::error!("failed to apply {} history: {err}", ticket.interval);
            self.restore_previous();
            return Settled::Failed;
        }
        widget.fit_content();
        self.state = LoadState::Loaded(ticket.interval);
        log::debug!("loaded {} {} candles", candles.len(), ticket.interval);
        Settled::Applied {
            points: candles.len(),
        }
    }

    /// Invalidate any running load; its completion will be stale.
    pub fn teardown(&mut self) {
        self.restore_previous();
    }

    fn restore_previous(&mut self) {
        if let LoadState::Loading { previous, .. } = self.state {
            self.state = previous.map_or(LoadState::Idle, LoadState::Loaded);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ts_core::{decode_history, INTERVALS};

    #[derive(Debug, Default)]
    pub(crate) struct FakeWidget {
        pub data: Vec<Candle>,
        pub sets: usize,
        pub fits: usize,
        pub size: Option<(u32, u32)>,
        pub disposed: bool,
    }

    impl ChartWidget for FakeWidget {
        fn resize(&mut self, width: u32, height: u32) {
            assert!(!self.disposed);
            self.size = Some((width, height));
        }

        fn set_candles(&mut self, candles: &[Candle]) -> Result<(), crate::WidgetError> {
            assert!(!self.disposed);
            self.data = candles.to_vec();
            self.sets += 1;
            Ok(())
        }

        fn fit_content(&mut self) {
            self.fits += 1;
        }

        fn dispose(&mut self) {
            self.disposed = true;
        }
    }

    pub(crate) fn candles(n: usize) -> Vec<Candle> {
        let body: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"time":"{}","open":"1","high":"2","low":"0.5","close":"1.5"}}"#,
                    i as i64 * 60_000 + 999
                )
            })
            .collect();
        decode_history(&format!("[{}]", body.join(","))).unwrap()
    }

    fn start(loader: &mut IntervalLoader, interval: Interval) -> LoadTicket {
        match loader.request(interval) {
            LoadRequest::Start(t) => t,
            other => panic!("expected start, got {other:?}"),
        }
    }

    #[test]
    fn success_replaces_dataset_and_fits() {
        let mut loader = IntervalLoader::default();
        let mut w = FakeWidget::default();
        let t = start(&mut loader, Interval::M15);
        assert_eq!(loader.loading(), Some(Interval::M15));
        assert_eq!(loader.settle(t, Ok(candles(3)), &mut w), Settled::Applied { points: 3 });
        assert_eq!(w.data.len(), 3);
        assert_eq!(w.data[1].time, 60);
        assert_eq!(w.fits, 1);
        assert_eq!(loader.active(), Some(Interval::M15));
        assert_eq!(loader.loading(), None);
    }

    #[test]
    fn policy_follows_config() {
        let mut config = ShellConfig::default();
        assert_eq!(OverlapPolicy::for_config(&config), OverlapPolicy::Reject);
        config.supersede_loads = true;
        assert_eq!(OverlapPolicy::for_config(&config), OverlapPolicy::Supersede);
    }

    #[test]
    fn same_interval_is_noop() {
        let mut loader = IntervalLoader::default();
        let mut w = FakeWidget::default();
        for interval in INTERVALS {
            let t = start(&mut loader, interval);
            loader.settle(t, Ok(candles(1)), &mut w);
            assert_eq!(loader.request(interval), LoadRequest::AlreadyActive);
            assert_eq!(loader.state(), LoadState::Loaded(interval));
        }
        assert_eq!(w.fits, INTERVALS.len());
    }

    #[test]
    fn reject_policy_blocks_while_in_flight() {
        let mut loader = IntervalLoader::default();
        let mut w = FakeWidget::default();
        let a = start(&mut loader, Interval::M1);
        for other in [Interval::M5, Interval::H4, Interval::M1] {
            assert_eq!(
                loader.request(other),
                LoadRequest::Busy {
                    loading: Interval::M1
                }
            );
        }
        loader.settle(a, Ok(candles(2)), &mut w);
        assert!(matches!(loader.request(Interval::H4), LoadRequest::Start(_)));
    }

    #[test]
    fn failure_keeps_dataset_and_previous_interval() {
        let mut loader = IntervalLoader::default();
        let mut w = FakeWidget::default();
        let t = start(&mut loader, Interval::M15);
        loader.settle(t, Ok(candles(4)), &mut w);
        let before = w.data.clone();

        let t = start(&mut loader, Interval::M30);
        assert_eq!(loader.active(), Some(Interval::M15));
        let err = Err(HistoryError::Status(500));
        assert_eq!(loader.settle(t, err, &mut w), Settled::Failed);
        assert_eq!(w.data, before);
        assert_eq!(w.sets, 1);
        assert_eq!(loader.state(), LoadState::Loaded(Interval::M15));

        let t = start(&mut loader, Interval::M30);
        let bad = ts_core::decode_history("not json").map_err(HistoryError::from);
        assert_eq!(loader.settle(t, bad, &mut w), Settled::Failed);
        assert_eq!(w.data, before);
    }

    #[test]
    fn failed_first_load_returns_to_idle() {
        let mut loader = IntervalLoader::default();
        let mut w = FakeWidget::default();
        let t = start(&mut loader, Interval::M15);
        loader.settle(t, Err(HistoryError::Status(404)), &mut w);
        assert_eq!(loader.state(), LoadState::Idle);
        assert!(matches!(loader.request(Interval::M15), LoadRequest::Start(_)));
    }

    #[test]
    fn supersede_drops_older_response() {
        let mut loader = IntervalLoader::new(OverlapPolicy::Supersede);
        let mut w = FakeWidget::default();
        let a = start(&mut loader, Interval::M1);
        let b = start(&mut loader, Interval::M5);
        assert_eq!(loader.settle(a, Ok(candles(9)), &mut w), Settled::Stale);
        assert!(w.data.is_empty());
        assert_eq!(loader.loading(), Some(Interval::M5));
        assert_eq!(loader.settle(b, Ok(candles(2)), &mut w), Settled::Applied { points: 2 });
        assert_eq!(loader.active(), Some(Interval::M5));
    }

    #[test]
    fn supersede_back_to_active_abandons_load() {
        let mut loader = IntervalLoader::new(OverlapPolicy::Supersede);
        let mut w = FakeWidget::default();
        let t = start(&mut loader, Interval::M15);
        loader.settle(t, Ok(candles(1)), &mut w);
        let t = start(&mut loader, Interval::H4);
        assert_eq!(loader.request(Interval::M15), LoadRequest::AlreadyActive);
        assert_eq!(loader.settle(t, Ok(candles(5)), &mut w), Settled::Stale);
        assert_eq!(w.data.len(), 1);
    }

    #[test]
    fn teardown_makes_in_flight_stale() {
        let mut loader = IntervalLoader::default();
        let mut w = FakeWidget::default();
        let t = start(&mut loader, Interval::M15);
        loader.teardown();
        assert_eq!(loader.settle(t, Ok(candles(3)), &mut w), Settled::Stale);
        assert_eq!(w.sets, 0);
    }
}
