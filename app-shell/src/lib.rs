//! Browser shell plumbing shared by the front-end widgets.

pub mod config;
pub mod install;
pub mod platform;
pub mod subscription;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::ShellConfig;
pub use install::{
    run_install, DeferredInstall, InstallError, InstallOutcome, InstallPrompt, InstallPromptState,
    InstallView,
};
pub use platform::PlatformEnv;
pub use subscription::{Subscription, SubscriptionSet};
#[cfg(target_arch = "wasm32")]
pub use web::{listen, listen_before_install, read_global, BeforeInstallPromptEvent};
