//! Result element state: what it shows, where a click goes, and its slide-in animation.
//!
//! Phases: `Hidden --reveal--> Animating --animation end--> Settled`, and any
//! reveal from `Animating` or `Settled` goes back to `Animating` after the
//! element's transform is reset, so repeated results visibly re-animate.

/// Characters stripped from an identifier to get its display text.
///
/// Identifiers are full short URLs whose scheme prefix is assumed to be
/// exactly `https://` (8 characters). With `protocol = "http"` one character
/// of the host is cut as well (`http://127.0.0.1:8000/1` shows
/// `27.0.0.1:8000/1`); config validation warns about that. Identifiers
/// shorter than 8 characters display as the empty string.
pub const SCHEME_PREFIX_LEN: usize = 8;

/// Text shown for `identifier`.
pub fn display_path(identifier: &str) -> String {
    identifier.chars().skip(SCHEME_PREFIX_LEN).collect()
}

/// Path a click navigates to for `identifier`.
pub fn click_target(identifier: &str) -> String {
    format!("/{identifier}")
}

/// The surface the presenter drives (a DOM node, a terminal line, a test fake).
pub trait ResultElement {
    fn set_text(&mut self, text: &str);
    fn set_click_target(&mut self, target: &str);
    /// Put the element back at the animation's start position.
    fn reset_transform(&mut self);
    fn play_slide_in(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Hidden,
    Animating,
    Settled,
}

/// Snapshot of what the user can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationState {
    pub revealed: bool,
    pub target_url: String,
}

pub struct ResultPresenter<E> {
    element: E,
    phase: RevealPhase,
    target_url: Option<String>,
}

impl<E: ResultElement> ResultPresenter<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            phase: RevealPhase::Hidden,
            target_url: None,
        }
    }

    /// Show `identifier`. Empty identifiers are refused and change nothing.
    pub fn reveal(&mut self, identifier: &str) -> bool {
        if identifier.is_empty() {
            tracing::warn!("refusing to reveal an empty identifier");
            return false;
        }
        if self.phase != RevealPhase::Hidden {
            self.element.reset_transform();
        }
        let target = click_target(identifier);
        self.element.set_click_target(&target);
        self.element.set_text(&display_path(identifier));
        self.element.play_slide_in();
        self.target_url = Some(target);
        self.phase = RevealPhase::Animating;
        true
    }

    /// The element finished its slide-in.
    pub fn on_animation_end(&mut self) {
        if self.phase == RevealPhase::Animating {
            self.phase = RevealPhase::Settled;
        }
    }

    /// Where a click on the element navigates, if it has been revealed.
    pub fn click(&self) -> Option<&str> {
        self.target_url.as_deref()
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// `None` until the first successful reveal.
    pub fn state(&self) -> Option<PresentationState> {
        self.target_url.as_ref().map(|target| PresentationState {
            revealed: self.phase != RevealPhase::Hidden,
            target_url: target.clone(),
        })
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::ResultElement;

    /// Records every call so tests can assert on order.
    #[derive(Debug, Default)]
    pub struct RecordingElement {
        pub text: String,
        pub target: String,
        pub calls: Vec<&'static str>,
    }

    impl ResultElement for RecordingElement {
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
            self.calls.push("text");
        }

        fn set_click_target(&mut self, target: &str) {
            self.target = target.to_string();
            self.calls.push("target");
        }

        fn reset_transform(&mut self) {
            self.calls.push("reset");
        }

        fn play_slide_in(&mut self) {
            self.calls.push("play");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::RecordingElement;
    use super::*;

    #[test]
    fn fixed_prefix_is_stripped_for_display() {
        assert_eq!(display_path("abcd1234xyz"), "xyz");
        assert_eq!(display_path("https://vite.lol/1"), "vite.lol/1");
        assert_eq!(display_path("short"), "");
        assert_eq!(display_path("http://127.0.0.1:8000/1"), "27.0.0.1:8000/1");
        assert_eq!(click_target("abcd1234xyz"), "/abcd1234xyz");
    }

    #[test]
    fn first_reveal_from_hidden() {
        let mut p = ResultPresenter::new(RecordingElement::default());
        assert_eq!(p.phase(), RevealPhase::Hidden);
        assert!(p.state().is_none());
        assert!(p.click().is_none());

        assert!(p.reveal("abcd1234xyz"));
        assert_eq!(p.phase(), RevealPhase::Animating);
        assert_eq!(p.element().text, "xyz");
        assert_eq!(p.element().target, "/abcd1234xyz");
        assert_eq!(p.element().calls, vec!["target", "text", "play"]);
        assert_eq!(p.click(), Some("/abcd1234xyz"));
        assert_eq!(
            p.state(),
            Some(PresentationState {
                revealed: true,
                target_url: "/abcd1234xyz".into()
            })
        );
    }

    #[test]
    fn animation_end_settles() {
        let mut p = ResultPresenter::new(RecordingElement::default());
        p.on_animation_end();
        assert_eq!(p.phase(), RevealPhase::Hidden);
        p.reveal("abcd1234xyz");
        p.on_animation_end();
        assert_eq!(p.phase(), RevealPhase::Settled);
    }

    #[test]
    fn re_reveal_resets_transform_and_replays() {
        let mut p = ResultPresenter::new(RecordingElement::default());
        p.reveal("abcd1234xyz");
        p.on_animation_end();
        p.element_mut().calls.clear();

        p.reveal("abcd1234xyz");
        assert_eq!(p.phase(), RevealPhase::Animating);
        assert_eq!(p.element().calls, vec!["reset", "target", "text", "play"]);
        // Same identifier twice: same final text and target.
        assert_eq!(p.element().text, "xyz");
        assert_eq!(p.click(), Some("/abcd1234xyz"));
    }

    #[test]
    fn reveal_while_animating_restarts() {
        let mut p = ResultPresenter::new(RecordingElement::default());
        p.reveal("https://vite.lol/1");
        p.reveal("https://vite.lol/2");
        assert_eq!(p.phase(), RevealPhase::Animating);
        assert_eq!(p.element().text, "vite.lol/2");
        assert_eq!(p.click(), Some("/https://vite.lol/2"));
        assert_eq!(p.element().calls.iter().filter(|c| **c == "reset").count(), 1);
    }

    #[test]
    fn empty_identifier_changes_nothing() {
        let mut p = ResultPresenter::new(RecordingElement::default());
        assert!(!p.reveal(""));
        assert_eq!(p.phase(), RevealPhase::Hidden);
        assert!(p.element().calls.is_empty());
    }
}
