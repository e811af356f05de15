//! PWA install offer.
//!
//! Two presentation paths exist: the platform's deferred `beforeinstallprompt`
//! signal (Android / desktop Chromium) and a manual "Add to Home Screen" hint
//! for iOS Safari, which never emits that signal.

use std::future::Future;
use std::str::FromStr;

use thiserror::Error;

use crate::platform::PlatformEnv;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

impl FromStr for InstallOutcome {
    type Err = InstallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(InstallOutcome::Accepted),
            "dismissed" => Ok(InstallOutcome::Dismissed),
            other => Err(InstallError::UnknownOutcome(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InstallError {
    #[error("prompt() failed: {0}")]
    Prompt(String),
    #[error("userChoice rejected: {0}")]
    Choice(String),
    #[error("unknown install outcome {0:?}")]
    UnknownOutcome(String),
}

/// A captured platform install signal. Replaying consumes it.
pub trait DeferredInstall {
    /// Show the platform prompt and wait for the user's choice.
    fn prompt(self) -> impl Future<Output = Result<InstallOutcome, InstallError>>;
}

/// Exactly one presentation state at a time. The deferred signal only exists
/// inside `NativeButton`.
#[derive(Debug, Clone, PartialEq)]
pub enum InstallPromptState<S> {
    Hidden,
    NativeButton(S),
    IosBanner,
}

/// Payload-free mirror of [`InstallPromptState`] for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallView {
    Hidden,
    NativeButton,
    IosBanner,
}

#[derive(Debug)]
pub struct InstallPrompt<S> {
    state: InstallPromptState<S>,
}

impl<S> Default for InstallPrompt<S> {
    fn default() -> Self {
        Self {
            state: InstallPromptState::Hidden,
        }
    }
}

impl<S> InstallPrompt<S> {
    /// Initial state. The iOS heuristics are evaluated here and never again.
    pub fn mount(env: &PlatformEnv) -> Self {
        let state = if env.wants_ios_hint() {
            log::debug!("install: iOS Safari outside standalone, showing hint");
            InstallPromptState::IosBanner
        } else {
            InstallPromptState::Hidden
        };
        Self { state }
    }

    pub fn state(&self) -> &InstallPromptState<S> {
        &self.state
    }

    pub fn view(&self) -> InstallView {
        match self.state {
            InstallPromptState::Hidden => InstallView::Hidden,
            InstallPromptState::NativeButton(_) => InstallView::NativeButton,
            InstallPromptState::IosBanner => InstallView::IosBanner,
        }
    }

    /// Retain a platform signal. The caller has already suppressed its default
    /// action. A native signal wins over the iOS hint, and a newer signal
    /// replaces an unused older one.
    pub fn capture(&mut self, signal: S) {
        if matches!(self.state, InstallPromptState::IosBanner) {
            log::debug!("install: native signal replaces iOS hint");
        }
        self.state = InstallPromptState::NativeButton(signal);
    }

    /// Take the retained signal for replay. The state is `Hidden` afterwards
    /// whatever the replay outcome, so a signal can be replayed once at most.
    pub fn take_signal(&mut self) -> Option<S> {
        match std::mem::replace(&mut self.state, InstallPromptState::Hidden) {
            InstallPromptState::NativeButton(signal) => Some(signal),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Close the iOS hint. Returns false when it was not showing.
    pub fn dismiss_banner(&mut self) -> bool {
        if matches!(self.state, InstallPromptState::IosBanner) {
            self.state = InstallPromptState::Hidden;
            true
        } else {
            false
        }
    }
}

/// Replay a taken signal. Failures are logged and swallowed.
pub async fn run_install<S: DeferredInstall>(signal: S) -> Option<InstallOutcome> {
    match signal.prompt().await {
        Ok(outcome) => {
            log::info!("install prompt outcome: {outcome:?}");
            Some(outcome)
        }
        Err(err) => {
            log::error!("install prompt failed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    const IPHONE_SAFARI: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Version/17.0 Mobile/15E148 Safari/604.1";
    const DESKTOP_CHROME: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/118.0 Safari/537.36";

    #[derive(Debug, Clone, PartialEq)]
    struct FakeSignal(Result<InstallOutcome, InstallError>);

    impl DeferredInstall for FakeSignal {
        async fn prompt(self) -> Result<InstallOutcome, InstallError> {
            self.0
        }
    }

    fn accepted() -> FakeSignal {
        FakeSignal(Ok(InstallOutcome::Accepted))
    }

    #[test]
    fn native_signal_accept_hides_and_consumes() {
        let mut prompt = InstallPrompt::mount(&PlatformEnv::new(DESKTOP_CHROME, false));
        assert_eq!(prompt.view(), InstallView::Hidden);

        prompt.capture(accepted());
        assert_eq!(prompt.view(), InstallView::NativeButton);

        let signal = prompt.take_signal().expect("signal retained");
        assert_eq!(block_on(run_install(signal)), Some(InstallOutcome::Accepted));
        assert_eq!(prompt.view(), InstallView::Hidden);
        assert!(prompt.take_signal().is_none());
    }

    #[test]
    fn dismissed_outcome_still_discards_signal() {
        let mut prompt = InstallPrompt::default();
        prompt.capture(FakeSignal(Ok(InstallOutcome::Dismissed)));
        let signal = prompt.take_signal().unwrap();
        assert_eq!(block_on(run_install(signal)), Some(InstallOutcome::Dismissed));
        assert_eq!(*prompt.state(), InstallPromptState::Hidden);
    }

    #[test]
    fn prompt_failure_is_swallowed() {
        let mut prompt = InstallPrompt::default();
        prompt.capture(FakeSignal(Err(InstallError::Prompt("NotAllowedError".into()))));
        let signal = prompt.take_signal().unwrap();
        assert_eq!(block_on(run_install(signal)), None);
        assert_eq!(prompt.view(), InstallView::Hidden);
    }

    #[test]
    fn ios_banner_until_dismissed() {
        let mut prompt: InstallPrompt<FakeSignal> =
            InstallPrompt::mount(&PlatformEnv::new(IPHONE_SAFARI, false));
        assert_eq!(prompt.view(), InstallView::IosBanner);
        assert!(prompt.take_signal().is_none());
        assert_eq!(prompt.view(), InstallView::IosBanner);
        assert!(prompt.dismiss_banner());
        assert_eq!(prompt.view(), InstallView::Hidden);
        assert!(!prompt.dismiss_banner());
    }

    #[test]
    fn no_banner_when_standalone_or_not_ios_safari() {
        for env in [
            PlatformEnv::new(IPHONE_SAFARI, true),
            PlatformEnv::new(DESKTOP_CHROME, false),
        ] {
            let prompt: InstallPrompt<FakeSignal> = InstallPrompt::mount(&env);
            assert_eq!(prompt.view(), InstallView::Hidden);
        }
    }

    #[test]
    fn native_signal_takes_precedence_over_banner() {
        let mut prompt = InstallPrompt::mount(&PlatformEnv::new(IPHONE_SAFARI, false));
        prompt.capture(accepted());
        assert_eq!(prompt.view(), InstallView::NativeButton);
        prompt.take_signal();
        assert_eq!(prompt.view(), InstallView::Hidden);
    }

    #[test]
    fn outcome_parsing() {
        assert_eq!("accepted".parse(), Ok(InstallOutcome::Accepted));
        assert_eq!("dismissed".parse(), Ok(InstallOutcome::Dismissed));
        assert!(matches!(
            "maybe".parse::<InstallOutcome>(),
            Err(InstallError::UnknownOutcome(_))
        ));
    }
}
