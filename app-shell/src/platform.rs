/// What the install flow needs to know about the browser, captured once at mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformEnv {
    pub user_agent: String,
    /// `(display-mode: standalone)` matches, or iOS reports `navigator.standalone`.
    pub standalone: bool,
}

impl PlatformEnv {
    pub fn new(user_agent: impl Into<String>, standalone: bool) -> Self {
        Self {
            user_agent: user_agent.into(),
            standalone,
        }
    }

    pub fn is_ios(&self) -> bool {
        ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|device| self.user_agent.contains(device))
    }

    /// Safari proper; Chrome's UA also mentions Safari.
    pub fn is_safari(&self) -> bool {
        self.user_agent.contains("Safari") && !self.user_agent.contains("Chrome")
    }

    /// iOS Safari, not yet installed: the only case the manual hint applies to.
    pub fn wants_ios_hint(&self) -> bool {
        self.is_ios() && self.is_safari() && !self.standalone
    }

    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        use wasm_bindgen::JsValue;

        let Some(win) = web_sys::window() else {
            return Self::default();
        };
        let navigator = win.navigator();
        let user_agent = navigator.user_agent().unwrap_or_default();
        let display_standalone = win
            .match_media("(display-mode: standalone)")
            .ok()
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false);
        let ios_standalone = js_sys::Reflect::get(&navigator, &JsValue::from_str("standalone"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Self {
            user_agent,
            standalone: display_standalone || ios_standalone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const IPAD_CHROME: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/118.0 Mobile/15E148 Safari/604.1 Chrome/118.0";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0 Mobile Safari/537.36";
    const MAC_SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

    #[test]
    fn iphone_safari_gets_hint() {
        assert!(PlatformEnv::new(IPHONE_SAFARI, false).wants_ios_hint());
    }

    #[test]
    fn hint_needs_all_three() {
        assert!(!PlatformEnv::new(IPHONE_SAFARI, true).wants_ios_hint());
        assert!(!PlatformEnv::new(IPAD_CHROME, false).wants_ios_hint());
        assert!(!PlatformEnv::new(ANDROID_CHROME, false).wants_ios_hint());
        assert!(!PlatformEnv::new(MAC_SAFARI, false).wants_ios_hint());
    }
}
