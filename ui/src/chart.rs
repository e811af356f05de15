use crate::button::IntervalSelector;
use crate::state::use_app_ctx;
use chart_frontend::LoadSnapshot;
use leptos::*;
use ts_core::Interval;

#[cfg(target_arch = "wasm32")]
use chart_frontend::{
    fetch_history, mount_chart, ChartSession, LightweightChart, LoadRequest, OverlapPolicy,
};
#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;

#[component]
pub fn TradingChart() -> impl IntoView {
    let app_ctx = use_app_ctx();
    let container = create_node_ref::<html::Div>();
    let snapshot = create_rw_signal(LoadSnapshot::default());

    #[cfg(target_arch = "wasm32")]
    let session = create_rw_signal::<Option<ChartSession<LightweightChart>>>(None);

    #[cfg(target_arch = "wasm32")]
    let load = move |interval: Interval| {
        let Some(s) = session.get_untracked() else {
            return;
        };
        let ticket = match s.request(interval) {
            LoadRequest::Start(ticket) => ticket,
            LoadRequest::Busy { loading } => {
                log::debug!("ignoring {interval}: {loading} still loading");
                return;
            }
            LoadRequest::AlreadyActive | LoadRequest::Closed => return,
        };
        snapshot.set(s.snapshot());
        let config = app_ctx.config.get_value();
        spawn_local(async move {
            let result = fetch_history(&config, ticket.interval).await;
            s.settle(ticket, result);
            // The view may be gone by now; the session already ignored the result.
            let _ = snapshot.try_set(s.snapshot());
        });
    };
    #[cfg(not(target_arch = "wasm32"))]
    let load = move |_interval: Interval| {
        let _ = (app_ctx, snapshot);
    };

    #[cfg(target_arch = "wasm32")]
    {
        let default_interval = app_ctx.config.with_value(|c| c.default_interval);
        let policy = app_ctx.config.with_value(OverlapPolicy::for_config);
        spawn_local(async move {
            // Wait one tick so the container is attached and sized.
            TimeoutFuture::new(0).await;
            let Some(el) = container.get_untracked() else {
                log::error!("chart container not mounted");
                return;
            };
            match mount_chart(&el, policy) {
                Ok(s) => {
                    if let Some(Some(orphan)) = session.try_set(Some(s)) {
                        // Unmounted while waiting.
                        orphan.teardown();
                    } else {
                        load(default_interval);
                    }
                }
                Err(err) => log::error!("chart init failed: {err}"),
            }
        });

        on_cleanup(move || {
            if let Some(s) = session.try_get_untracked().flatten() {
                s.teardown();
            }
        });
    }

    view! {
        <div class="trading-chart">
            <IntervalSelector snapshot=snapshot on_select=load />
            <div _ref=container class="chart-container"></div>
        </div>
    }
}
