use std::cell::RefCell;
use std::rc::{Rc, Weak};

use app_shell::{Subscription, SubscriptionSet};
use ts_core::{Candle, Interval};

use crate::history::HistoryError;
use crate::loader::{IntervalLoader, LoadRequest, LoadTicket, OverlapPolicy, Settled};
use crate::widget::ChartWidget;

/// What the interval selector needs to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSnapshot {
    pub active: Option<Interval>,
    pub loading: Option<Interval>,
}

struct SessionInner<W> {
    widget: Option<W>,
    loader: IntervalLoader,
    subscriptions: SubscriptionSet,
}

/// One mounted chart: widget, loader and the listeners feeding it.
///
/// Cloning shares the session. After [`ChartSession::teardown`] the widget is
/// gone and every call is a no-op, so late async completions are harmless.
pub struct ChartSession<W> {
    inner: Rc<RefCell<SessionInner<W>>>,
}

impl<W> Clone for ChartSession<W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<W: ChartWidget + 'static> ChartSession<W> {
    pub fn new(widget: W, policy: OverlapPolicy) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SessionInner {
                widget: Some(widget),
                loader: IntervalLoader::new(policy),
                subscriptions: SubscriptionSet::new(),
            })),
        }
    }

    pub fn is_live(&self) -> bool {
        self.inner.borrow().widget.is_some()
    }

    /// Keep `sub` alive until teardown. Released at once if already torn down.
    pub fn hold(&self, sub: Subscription) {
        let mut inner = self.inner.borrow_mut();
        if inner.widget.is_some() {
            inner.subscriptions.push(sub);
        } else {
            drop(inner);
            drop(sub);
        }
    }

    /// Hold an acquired subscription, or tear the session down when acquiring
    /// it failed so the widget does not outlive the error.
    pub fn hold_or_teardown<E>(&self, sub: Result<Subscription, E>) -> Result<(), E> {
        match sub {
            Ok(sub) => {
                self.hold(sub);
                Ok(())
            }
            Err(err) => {
                self.teardown();
                Err(err)
            }
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        if let Some(widget) = self.inner.borrow_mut().widget.as_mut() {
            widget.resize(width, height);
        }
    }

    /// A resize callback that does not keep the session alive.
    pub fn resize_handler(&self) -> impl FnMut(u32, u32) + 'static {
        let weak: Weak<RefCell<SessionInner<W>>> = Rc::downgrade(&self.inner);
        move |width, height| {
            if let Some(inner) = weak.upgrade() {
                ChartSession { inner }.resize(width, height);
            }
        }
    }

    pub fn snapshot(&self) -> LoadSnapshot {
        let inner = self.inner.borrow();
        LoadSnapshot {
            active: inner.loader.active(),
            loading: inner.loader.loading(),
        }
    }

    pub fn request(&self, interval: Interval) -> LoadRequest {
        let mut inner = self.inner.borrow_mut();
        if inner.widget.is_none() {
            return LoadRequest::Closed;
        }
        inner.loader.request(interval)
    }

    pub fn settle(&self, ticket: LoadTicket, result: Result<Vec<Candle>, HistoryError>) -> Settled {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        match inner.widget.as_mut() {
            Some(widget) => inner.loader.settle(ticket, result, widget),
            None => {
                log::debug!("chart gone, dropping {} history response", ticket.interval);
                Settled::Stale
            }
        }
    }

    /// Release listeners, dispose the widget and invalidate any running load.
    pub fn teardown(&self) {
        let (subscriptions, widget) = {
            let mut inner = self.inner.borrow_mut();
            inner.loader.teardown();
            (
                std::mem::take(&mut inner.subscriptions),
                inner.widget.take(),
            )
        };
        drop(subscriptions);
        if let Some(mut widget) = widget {
            widget.dispose();
        }
    }
}
