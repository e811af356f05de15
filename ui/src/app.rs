use crate::{
    chart::TradingChart, install::PwaInstallButton, state::provide_app_ctx, theme::GLOBAL_CSS,
};
use app_shell::ShellConfig;
use leptos::*;
use leptos_meta::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_ctx(ShellConfig::from_window());

    view! {
        <Style>{GLOBAL_CSS}</Style>
        <PwaInstallButton/>
        <TradingChart/>
    }
}
