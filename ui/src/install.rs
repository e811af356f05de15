use crate::button::{Button, ButtonSize, ButtonVariant};
use app_shell::{InstallPrompt, InstallView, PlatformEnv};
use leptos::*;

#[cfg(target_arch = "wasm32")]
use app_shell::{listen_before_install, run_install, BeforeInstallPromptEvent};

#[cfg(target_arch = "wasm32")]
type Deferred = BeforeInstallPromptEvent;
#[cfg(not(target_arch = "wasm32"))]
type Deferred = ();

#[cfg(target_arch = "wasm32")]
fn platform() -> PlatformEnv {
    PlatformEnv::detect()
}

#[cfg(not(target_arch = "wasm32"))]
fn platform() -> PlatformEnv {
    PlatformEnv::default()
}

#[component]
pub fn PwaInstallButton() -> impl IntoView {
    let prompt = create_rw_signal(InstallPrompt::<Deferred>::mount(&platform()));
    let current = create_memo(move |_| prompt.with(|p| p.view()));

    #[cfg(target_arch = "wasm32")]
    match listen_before_install(move |ev| prompt.update(|p| p.capture(ev))) {
        Ok(sub) => on_cleanup(move || drop(sub)),
        Err(err) => log::error!("install: cannot listen for beforeinstallprompt: {err:?}"),
    }

    let install = move |_: ev::MouseEvent| {
        #[cfg(target_arch = "wasm32")]
        if let Some(signal) = prompt.try_update(|p| p.take_signal()).flatten() {
            spawn_local(async move {
                run_install(signal).await;
            });
        }
    };

    let dismiss = move |_: ev::MouseEvent| {
        prompt.update(|p| {
            p.dismiss_banner();
        })
    };

    move || match current.get() {
        InstallView::Hidden => ().into_view(),
        InstallView::NativeButton => view! {
            <div class="install-fab">
                <Button variant=ButtonVariant::Secondary size=ButtonSize::Sm on_click=install>
                    "📱 Install app"
                </Button>
            </div>
        }
        .into_view(),
        InstallView::IosBanner => view! {
            <div class="install-banner" role="dialog" aria-label="Install the app">
                <div class="install-banner-body">
                    <p class="install-banner-title">"Install the app"</p>
                    <p class="install-banner-text">
                        "Tap "
                        <span class="install-banner-icon" aria-label="Share">
                            <svg viewBox="0 0 24 24" width="16" height="16" fill="none" stroke="currentColor" stroke-width="2">
                                <path d="M12 3v12M8 7l4-4 4 4M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2-2v-7"/>
                            </svg>
                        </span>
                        " then \"Add to Home Screen\""
                    </p>
                </div>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    aria_label="Dismiss"
                    on_click=dismiss
                >
                    "✕"
                </Button>
            </div>
        }
        .into_view(),
    }
}
