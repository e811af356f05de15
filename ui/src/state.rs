use app_shell::ShellConfig;
use leptos::*;

#[derive(Clone, Copy)]
pub struct AppCtx {
    pub config: StoredValue<ShellConfig>,
}

pub fn provide_app_ctx(config: ShellConfig) -> AppCtx {
    log::debug!(
        "config: history={} pair={} default interval={} supersede loads={}",
        config.history_base,
        config.pair,
        config.default_interval,
        config.supersede_loads
    );
    let ctx = AppCtx {
        config: store_value(config),
    };
    provide_context(ctx);
    ctx
}

pub fn use_app_ctx() -> AppCtx {
    use_context::<AppCtx>().expect("AppCtx not provided")
}
