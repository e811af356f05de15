use serde::Serialize;
use thiserror::Error;
use ts_core::Candle;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("lightweight-charts is not loaded")]
    LibraryMissing,
    #[error("chart library call failed: {0}")]
    Js(String),
    #[error("could not encode chart payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The charting surface a session drives: one candlestick series plus a
/// time scale.
pub trait ChartWidget {
    fn resize(&mut self, width: u32, height: u32);
    /// Replace the whole series dataset.
    fn set_candles(&mut self, candles: &[Candle]) -> Result<(), WidgetError>;
    /// Fit the visible time range to the loaded data.
    fn fit_content(&mut self);
    /// Release the widget. No other call is made afterwards.
    fn dispose(&mut self);
}

/// Crosshair mode "normal" (free movement, not magnet).
pub const CROSSHAIR_NORMAL: u8 = 1;
pub const LINE_DASHED: u8 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct Background {
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub background: Background,
    pub text_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineColor {
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub vert_lines: LineColor,
    pub horz_lines: LineColor,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrosshairLine {
    pub color: String,
    pub width: u8,
    pub style: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairOptions {
    pub mode: u8,
    pub vert_line: CrosshairLine,
    pub horz_line: CrosshairLine,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceScaleOptions {
    pub border_color: String,
    pub text_color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeScaleOptions {
    pub border_color: String,
    pub time_visible: bool,
    pub seconds_visible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleScroll {
    pub mouse_wheel: bool,
    pub pressed_mouse_move: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleScale {
    pub axis_pressed_mouse_move: bool,
    pub mouse_wheel: bool,
    pub pinch: bool,
}

/// Options passed to `createChart`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub layout: LayoutOptions,
    pub grid: GridOptions,
    pub crosshair: CrosshairOptions,
    pub right_price_scale: PriceScaleOptions,
    pub time_scale: TimeScaleOptions,
    pub handle_scroll: HandleScroll,
    pub handle_scale: HandleScale,
}

impl ChartOptions {
    /// Dark trading theme.
    pub fn dark() -> Self {
        let text = "hsl(210, 20%, 70%)".to_string();
        let grid = "hsl(220, 13%, 16%)";
        let border = "hsl(220, 13%, 18%)".to_string();
        let crosshair = CrosshairLine {
            color: "hsl(210, 40%, 85%)".into(),
            width: 1,
            style: LINE_DASHED,
        };
        Self {
            layout: LayoutOptions {
                background: Background {
                    color: "hsl(220, 13%, 8%)".into(),
                },
                text_color: text.clone(),
            },
            grid: GridOptions {
                vert_lines: LineColor { color: grid.into() },
                horz_lines: LineColor { color: grid.into() },
            },
            crosshair: CrosshairOptions {
                mode: CROSSHAIR_NORMAL,
                vert_line: crosshair.clone(),
                horz_line: crosshair,
            },
            right_price_scale: PriceScaleOptions {
                border_color: border.clone(),
                text_color: text,
            },
            time_scale: TimeScaleOptions {
                border_color: border,
                time_visible: true,
                seconds_visible: false,
            },
            handle_scroll: HandleScroll {
                mouse_wheel: true,
                pressed_mouse_move: true,
            },
            handle_scale: HandleScale {
                axis_pressed_mouse_move: true,
                mouse_wheel: true,
                pinch: true,
            },
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::dark()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlestickStyle {
    pub up_color: String,
    pub down_color: String,
    pub border_up_color: String,
    pub border_down_color: String,
    pub wick_up_color: String,
    pub wick_down_color: String,
}

impl Default for CandlestickStyle {
    fn default() -> Self {
        let bull = "hsl(134, 61%, 41%)";
        let bear = "hsl(0, 84%, 60%)";
        Self {
            up_color: bull.into(),
            down_color: bear.into(),
            border_up_color: bull.into(),
            border_down_color: bear.into(),
            wick_up_color: bull.into(),
            wick_down_color: bear.into(),
        }
    }
}

/// Payload of `applyOptions` on resize.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SizeOptions {
    pub width: u32,
    pub height: u32,
}
