//! Bindings to the `lightweight-charts` standalone build (global
//! `LightweightCharts`), loaded by a script tag in `index.html`.

use app_shell::Subscription;
use js_sys::Reflect;
use serde::Serialize;
use ts_core::Candle;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ResizeObserver};

use crate::loader::OverlapPolicy;
use crate::session::ChartSession;
use crate::widget::{CandlestickStyle, ChartOptions, ChartWidget, SizeOptions, WidgetError};

const LIBRARY_GLOBAL: &str = "LightweightCharts";

#[wasm_bindgen]
extern "C" {
    type ChartApi;

    #[wasm_bindgen(catch, js_namespace = LightweightCharts, js_name = createChart)]
    fn create_chart(container: &HtmlElement, options: &JsValue) -> Result<ChartApi, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addSeries)]
    fn add_series(
        this: &ChartApi,
        definition: &JsValue,
        options: &JsValue,
    ) -> Result<SeriesApi, JsValue>;

    #[wasm_bindgen(method, js_name = applyOptions)]
    fn apply_options(this: &ChartApi, options: &JsValue);

    #[wasm_bindgen(method, js_name = timeScale)]
    fn time_scale(this: &ChartApi) -> TimeScaleApi;

    #[wasm_bindgen(method)]
    fn remove(this: &ChartApi);

    type TimeScaleApi;

    #[wasm_bindgen(method, js_name = fitContent)]
    fn fit_content(this: &TimeScaleApi);

    type SeriesApi;

    #[wasm_bindgen(method, catch, js_name = setData)]
    fn set_data(this: &SeriesApi, data: &JsValue) -> Result<(), JsValue>;
}

fn js_err(err: JsValue) -> WidgetError {
    WidgetError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Serialize through JSON, the same shape the library documents.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, WidgetError> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(js_err)
}

fn library_export(name: &str) -> Result<JsValue, WidgetError> {
    let lib = Reflect::get(&js_sys::global(), &JsValue::from_str(LIBRARY_GLOBAL))
        .ok()
        .filter(|v| !v.is_undefined())
        .ok_or(WidgetError::LibraryMissing)?;
    Reflect::get(&lib, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined())
        .ok_or(WidgetError::LibraryMissing)
}

/// A `lightweight-charts` chart with one candlestick series.
pub struct LightweightChart {
    chart: ChartApi,
    series: SeriesApi,
}

impl LightweightChart {
    pub fn create(
        container: &HtmlElement,
        options: &ChartOptions,
        style: &CandlestickStyle,
    ) -> Result<Self, WidgetError> {
        let candlestick = library_export("CandlestickSeries")?;
        let chart = create_chart(container, &to_js(options)?).map_err(js_err)?;
        let series = match chart.add_series(&candlestick, &to_js(style)?) {
            Ok(series) => series,
            Err(err) => {
                chart.remove();
                return Err(js_err(err));
            }
        };
        Ok(Self { chart, series })
    }
}

impl ChartWidget for LightweightChart {
    fn resize(&mut self, width: u32, height: u32) {
        match to_js(&SizeOptions { width, height }) {
            Ok(opts) => self.chart.apply_options(&opts),
            Err(err) => log::error!("chart resize: {err}"),
        }
    }

    fn set_candles(&mut self, candles: &[Candle]) -> Result<(), WidgetError> {
        let data = to_js(candles)?;
        self.series.set_data(&data).map_err(js_err)
    }

    fn fit_content(&mut self) {
        self.chart.time_scale().fit_content();
    }

    fn dispose(&mut self) {
        self.chart.remove();
    }
}

/// Call `on_resize` on every size change of `element`. No debouncing.
pub fn observe_resize(
    element: &HtmlElement,
    mut on_resize: impl FnMut() + 'static,
) -> Result<Subscription, JsValue> {
    let cb = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_entries: JsValue| on_resize()));
    let observer = ResizeObserver::new(cb.as_ref().unchecked_ref())?;
    observer.observe(element);
    Ok(Subscription::new(move || {
        observer.disconnect();
        drop(cb);
    }))
}

/// Build the chart inside `container` and keep it sized to the container.
pub fn mount_chart(
    container: &HtmlElement,
    policy: OverlapPolicy,
) -> Result<ChartSession<LightweightChart>, WidgetError> {
    let widget = LightweightChart::create(
        container,
        &ChartOptions::dark(),
        &CandlestickStyle::default(),
    )?;
    let session = ChartSession::new(widget, policy);

    let mut resize = session.resize_handler();
    let el = container.clone();
    let sub = observe_resize(container, move || {
        resize(el.client_width().max(0) as u32, el.client_height().max(0) as u32);
    });
    session.hold_or_teardown(sub).map_err(js_err)?;
    Ok(session)
}
