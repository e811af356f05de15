use chart_frontend::LoadSnapshot;
use leptos::*;
use ts_core::{Interval, INTERVALS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Default,
    Secondary,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Default => "btn-default",
            ButtonVariant::Secondary => "btn-secondary",
            ButtonVariant::Ghost => "btn-ghost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    #[default]
    Default,
    Sm,
    Lg,
}

impl ButtonSize {
    fn class(self) -> &'static str {
        match self {
            ButtonSize::Default => "btn-size-default",
            ButtonSize::Sm => "btn-size-sm",
            ButtonSize::Lg => "btn-size-lg",
        }
    }
}

fn join_classes(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn button_class(variant: ButtonVariant, size: ButtonSize, extra: &str) -> String {
    join_classes(&["btn", variant.class(), size.class(), extra])
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(into)] on_click: Callback<ev::MouseEvent>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=button_class(variant, size, &class)
            aria-label=aria_label
            on:click=move |ev| on_click.call(ev)
        >
            {children()}
        </button>
    }
}

/// Interval buttons: loading wins over active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalVariant {
    #[default]
    Default,
    Active,
    Loading,
}

impl IntervalVariant {
    pub fn from_state(is_active: bool, is_loading: bool) -> Self {
        if is_loading {
            IntervalVariant::Loading
        } else if is_active {
            IntervalVariant::Active
        } else {
            IntervalVariant::Default
        }
    }

    fn class(self) -> &'static str {
        match self {
            IntervalVariant::Default => "interval-default",
            IntervalVariant::Active => "interval-active",
            IntervalVariant::Loading => "interval-loading",
        }
    }
}

pub fn interval_button_class(variant: IntervalVariant) -> String {
    join_classes(&[
        "btn",
        ButtonSize::Default.class(),
        "interval-btn",
        variant.class(),
    ])
}

#[component]
pub fn IntervalButton(
    interval: Interval,
    #[prop(into)] active: Signal<bool>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_select: Callback<Interval>,
) -> impl IntoView {
    let variant = move || IntervalVariant::from_state(active.get(), loading.get());
    view! {
        <button
            type="button"
            class=move || interval_button_class(variant())
            disabled=move || loading.get()
            aria-pressed=move || active.get().to_string()
            aria-busy=move || loading.get().to_string()
            on:click=move |_| on_select.call(interval)
        >
            {interval.label}
        </button>
    }
}

/// One button per configured interval; holds no state of its own.
#[component]
pub fn IntervalSelector(
    #[prop(into)] snapshot: Signal<LoadSnapshot>,
    #[prop(into)] on_select: Callback<Interval>,
) -> impl IntoView {
    view! {
        <div class="interval-bar" role="toolbar" aria-label="Chart interval">
            {INTERVALS
                .iter()
                .copied()
                .map(|interval| {
                    let active = Signal::derive(move || snapshot.get().active == Some(interval));
                    let loading = Signal::derive(move || snapshot.get().loading == Some(interval));
                    view! {
                        <IntervalButton
                            interval=interval
                            active=active
                            loading=loading
                            on_select=on_select
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}
