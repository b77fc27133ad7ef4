use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{InteractionKind, InteractionSurface, MediaSurface, PlayFuture, PlaybackError};

/// Settings the controller reads once per session.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationConfig {
    /// Applied before every play request.
    pub music_volume: f64,
    /// Mount the prompt as soon as autoplay is refused instead of waiting
    /// silently for the first interaction.
    pub show_prompt_immediately_on_block: bool,
    pub prompt_fade_out: Duration,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            music_volume: 0.1,
            show_prompt_immediately_on_block: true,
            prompt_fade_out: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPhase {
    Idle,
    AutoplayPending,
    AwaitingInteraction,
    Playing,
}

/// Whether background music has been confirmed for this session.
///
/// Only ever moves from disabled to enabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackIntent {
    enabled: bool,
}

impl PlaybackIntent {
    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    fn confirm(&mut self) {
        self.enabled = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Absent,
    Visible,
    FadingOut,
}

/// Where a play request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    Autoplay,
    Interaction(InteractionKind),
    Prompt,
}

#[derive(Debug)]
pub enum ActivationEvent {
    PageReady,
    PlaySettled(Result<(), PlaybackError>),
    Interaction(InteractionKind),
    PromptActivated,
    PromptFadeElapsed,
}

/// Asynchronous work the host runs after a transition.
pub enum Followup {
    /// Await the request and dispatch [`ActivationEvent::PlaySettled`].
    AwaitPlay(PlayFuture),
    /// Sleep and dispatch [`ActivationEvent::PromptFadeElapsed`].
    RemovePromptAfter(Duration),
}

impl fmt::Debug for Followup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitPlay(_) => f.write_str("AwaitPlay(..)"),
            Self::RemovePromptAfter(delay) => f.debug_tuple("RemovePromptAfter").field(delay).finish(),
        }
    }
}

/// Gets background audio playing despite autoplay restrictions.
///
/// Owns the session's playback intent, the prompt lifecycle and the
/// interaction listeners. Every state change goes through [`Self::handle`].
pub struct ActivationController<M, S> {
    config: ActivationConfig,
    media: M,
    surface: S,
    phase: ActivationPhase,
    intent: PlaybackIntent,
    prompt: PromptState,
    listening: bool,
    in_flight: Option<PlayOrigin>,
}

impl<M: MediaSurface, S: InteractionSurface> ActivationController<M, S> {
    pub fn new(config: ActivationConfig, media: M, surface: S) -> Self {
        Self {
            config,
            media,
            surface,
            phase: ActivationPhase::Idle,
            intent: PlaybackIntent::default(),
            prompt: PromptState::Absent,
            listening: false,
            in_flight: None,
        }
    }

    pub fn phase(&self) -> ActivationPhase {
        self.phase
    }

    pub fn intent(&self) -> PlaybackIntent {
        self.intent
    }

    pub fn prompt(&self) -> PromptState {
        self.prompt
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn request_in_flight(&self) -> Option<PlayOrigin> {
        self.in_flight
    }

    pub fn handle(&mut self, event: ActivationEvent) -> Vec<Followup> {
        let mut followups = Vec::new();
        match event {
            ActivationEvent::PageReady => self.start_autoplay(&mut followups),
            ActivationEvent::PlaySettled(outcome) => self.settle(outcome, &mut followups),
            ActivationEvent::Interaction(kind) => {
                self.try_activate(PlayOrigin::Interaction(kind), &mut followups)
            }
            ActivationEvent::PromptActivated => self.try_activate(PlayOrigin::Prompt, &mut followups),
            ActivationEvent::PromptFadeElapsed => self.finish_prompt_fade(),
        }
        followups
    }

    fn start_autoplay(&mut self, followups: &mut Vec<Followup>) {
        if self.phase != ActivationPhase::Idle {
            debug!(phase = ?self.phase, "page ready after activation started; ignoring");
            return;
        }
        self.phase = ActivationPhase::AutoplayPending;
        self.request_play(PlayOrigin::Autoplay, followups);
    }

    fn try_activate(&mut self, origin: PlayOrigin, followups: &mut Vec<Followup>) {
        if self.phase != ActivationPhase::AwaitingInteraction {
            return;
        }
        if self.intent.is_enabled() || self.in_flight.is_some() || !self.media.is_paused() {
            return;
        }
        // Must run inside the gesture's event turn; nothing here may defer.
        self.request_play(origin, followups);
    }

    fn request_play(&mut self, origin: PlayOrigin, followups: &mut Vec<Followup>) {
        self.media.set_volume(self.config.music_volume);
        self.in_flight = Some(origin);
        followups.push(Followup::AwaitPlay(self.media.play()));
    }

    fn settle(&mut self, outcome: Result<(), PlaybackError>, followups: &mut Vec<Followup>) {
        let Some(origin) = self.in_flight.take() else {
            debug!("play outcome with no request in flight; ignoring");
            return;
        };

        match outcome {
            Ok(()) => self.confirm_playing(origin, followups),
            Err(err) if origin == PlayOrigin::Autoplay => {
                info!(
                    blocked_by_policy = err.is_autoplay_block(),
                    reason = %err,
                    "background music autoplay refused; waiting for interaction"
                );
                self.phase = ActivationPhase::AwaitingInteraction;
                self.listen();
                if self.config.show_prompt_immediately_on_block {
                    self.show_prompt();
                }
            }
            Err(err) => {
                warn!(?origin, reason = %err, "failed to play background music");
            }
        }
    }

    fn confirm_playing(&mut self, origin: PlayOrigin, followups: &mut Vec<Followup>) {
        info!(?origin, "background music playing");
        self.intent.confirm();
        self.phase = ActivationPhase::Playing;
        self.stop_listening();
        if self.prompt == PromptState::Visible {
            self.surface.fade_prompt(self.config.prompt_fade_out);
            self.prompt = PromptState::FadingOut;
            followups.push(Followup::RemovePromptAfter(self.config.prompt_fade_out));
        }
    }

    fn listen(&mut self) {
        if self.listening {
            return;
        }
        for kind in InteractionKind::ALL {
            self.surface.subscribe(kind);
        }
        self.listening = true;
    }

    fn stop_listening(&mut self) {
        if !self.listening {
            return;
        }
        for kind in InteractionKind::ALL {
            self.surface.unsubscribe(kind);
        }
        self.listening = false;
    }

    fn show_prompt(&mut self) {
        if self.prompt != PromptState::Absent {
            return;
        }
        self.surface.mount_prompt();
        self.prompt = PromptState::Visible;
        debug!("activation prompt mounted");
    }

    fn finish_prompt_fade(&mut self) {
        if self.prompt != PromptState::FadingOut {
            return;
        }
        self.surface.unmount_prompt();
        self.prompt = PromptState::Absent;
        debug!("activation prompt removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::{self, FutureExt};
    use std::cell::RefCell;
    use std::collections::{HashSet, VecDeque};
    use std::rc::Rc;

    #[derive(Default)]
    struct MediaLog {
        play_calls: usize,
        volumes: Vec<f64>,
        paused: bool,
        outcomes: VecDeque<Result<(), PlaybackError>>,
    }

    #[derive(Clone)]
    struct FakeMedia(Rc<RefCell<MediaLog>>);

    impl MediaSurface for FakeMedia {
        fn is_paused(&self) -> bool {
            self.0.borrow().paused
        }

        fn set_volume(&mut self, volume: f64) {
            self.0.borrow_mut().volumes.push(volume);
        }

        fn play(&mut self) -> PlayFuture {
            let mut log = self.0.borrow_mut();
            log.play_calls += 1;
            let outcome = log.outcomes.pop_front().unwrap_or(Ok(()));
            future::ready(outcome).boxed_local()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum SurfaceCall {
        Subscribe(InteractionKind),
        Unsubscribe(InteractionKind),
        Mount,
        Fade(Duration),
        Unmount,
    }

    #[derive(Default)]
    struct SurfaceLog {
        calls: Vec<SurfaceCall>,
        listeners: HashSet<InteractionKind>,
        prompts: usize,
        max_prompts: usize,
    }

    #[derive(Clone)]
    struct FakeSurface(Rc<RefCell<SurfaceLog>>);

    impl InteractionSurface for FakeSurface {
        fn subscribe(&mut self, kind: InteractionKind) {
            let mut log = self.0.borrow_mut();
            log.calls.push(SurfaceCall::Subscribe(kind));
            log.listeners.insert(kind);
        }

        fn unsubscribe(&mut self, kind: InteractionKind) {
            let mut log = self.0.borrow_mut();
            log.calls.push(SurfaceCall::Unsubscribe(kind));
            log.listeners.remove(&kind);
        }

        fn mount_prompt(&mut self) {
            let mut log = self.0.borrow_mut();
            log.calls.push(SurfaceCall::Mount);
            log.prompts += 1;
            log.max_prompts = log.max_prompts.max(log.prompts);
        }

        fn fade_prompt(&mut self, duration: Duration) {
            self.0.borrow_mut().calls.push(SurfaceCall::Fade(duration));
        }

        fn unmount_prompt(&mut self) {
            let mut log = self.0.borrow_mut();
            log.calls.push(SurfaceCall::Unmount);
            log.prompts -= 1;
        }
    }

    struct Harness {
        controller: ActivationController<FakeMedia, FakeSurface>,
        media: Rc<RefCell<MediaLog>>,
        surface: Rc<RefCell<SurfaceLog>>,
    }

    fn harness(show_prompt: bool, outcomes: Vec<Result<(), PlaybackError>>) -> Harness {
        let media = Rc::new(RefCell::new(MediaLog {
            paused: true,
            outcomes: outcomes.into(),
            ..MediaLog::default()
        }));
        let surface = Rc::new(RefCell::new(SurfaceLog::default()));
        let config = ActivationConfig {
            show_prompt_immediately_on_block: show_prompt,
            ..ActivationConfig::default()
        };
        Harness {
            controller: ActivationController::new(
                config,
                FakeMedia(media.clone()),
                FakeSurface(surface.clone()),
            ),
            media,
            surface,
        }
    }

    fn blocked() -> Result<(), PlaybackError> {
        Err(PlaybackError::AutoplayBlocked("NotAllowedError".to_string()))
    }

    /// Feed every ready play outcome back into the controller, the way the
    /// web host does once the promise settles.
    fn drive(controller: &mut ActivationController<FakeMedia, FakeSurface>, event: ActivationEvent) -> Vec<Followup> {
        let mut pending = controller.handle(event);
        let mut timers = Vec::new();
        while let Some(followup) = pending.pop() {
            match followup {
                Followup::AwaitPlay(request) => {
                    let outcome = request.now_or_never().expect("fake play settles immediately");
                    pending.extend(controller.handle(ActivationEvent::PlaySettled(outcome)));
                }
                timer @ Followup::RemovePromptAfter(_) => timers.push(timer),
            }
        }
        timers
    }

    #[test]
    fn successful_autoplay_never_prompts_or_listens() {
        let mut h = harness(true, vec![Ok(())]);
        let timers = drive(&mut h.controller, ActivationEvent::PageReady);

        assert!(timers.is_empty());
        assert_eq!(h.controller.phase(), ActivationPhase::Playing);
        assert!(h.controller.intent().is_enabled());
        assert_eq!(h.controller.prompt(), PromptState::Absent);
        assert!(h.surface.borrow().calls.is_empty());
        assert_eq!(h.media.borrow().play_calls, 1);
        assert_eq!(h.media.borrow().volumes, vec![0.1]);
    }

    #[test]
    fn blocked_autoplay_mounts_prompt_before_any_interaction() {
        let mut h = harness(true, vec![blocked()]);
        drive(&mut h.controller, ActivationEvent::PageReady);

        assert_eq!(h.controller.phase(), ActivationPhase::AwaitingInteraction);
        assert_eq!(h.controller.prompt(), PromptState::Visible);
        assert!(!h.controller.intent().is_enabled());
        let surface = h.surface.borrow();
        assert_eq!(surface.prompts, 1);
        assert_eq!(surface.listeners.len(), 3);
        assert!(surface.calls.contains(&SurfaceCall::Mount));
    }

    #[test]
    fn blocked_autoplay_waits_silently_then_click_plays_in_handler() {
        let mut h = harness(false, vec![blocked()]);
        drive(&mut h.controller, ActivationEvent::PageReady);

        assert_eq!(h.controller.phase(), ActivationPhase::AwaitingInteraction);
        assert_eq!(h.controller.prompt(), PromptState::Absent);
        assert_eq!(h.surface.borrow().prompts, 0);
        assert!(h.controller.is_listening());

        let followups = h
            .controller
            .handle(ActivationEvent::Interaction(InteractionKind::Click));
        // The request went out before handle returned.
        assert_eq!(h.media.borrow().play_calls, 2);
        assert_eq!(
            h.controller.request_in_flight(),
            Some(PlayOrigin::Interaction(InteractionKind::Click))
        );
        assert!(matches!(followups.as_slice(), [Followup::AwaitPlay(_)]));
    }

    #[test]
    fn keydown_activation_tears_down_prompt_and_listeners() {
        let mut h = harness(true, vec![blocked(), Ok(())]);
        drive(&mut h.controller, ActivationEvent::PageReady);

        let timers = drive(
            &mut h.controller,
            ActivationEvent::Interaction(InteractionKind::KeyDown),
        );
        assert_eq!(h.controller.phase(), ActivationPhase::Playing);
        assert!(h.controller.intent().is_enabled());
        assert!(h.surface.borrow().listeners.is_empty());
        assert_eq!(h.controller.prompt(), PromptState::FadingOut);
        assert!(matches!(
            timers.as_slice(),
            [Followup::RemovePromptAfter(d)] if *d == Duration::from_millis(500)
        ));
        assert!(h
            .surface
            .borrow()
            .calls
            .contains(&SurfaceCall::Fade(Duration::from_millis(500))));

        drive(&mut h.controller, ActivationEvent::PromptFadeElapsed);
        assert_eq!(h.controller.prompt(), PromptState::Absent);
        assert_eq!(h.surface.borrow().prompts, 0);
        assert_eq!(h.surface.borrow().calls.last(), Some(&SurfaceCall::Unmount));
    }

    #[test]
    fn rapid_interactions_issue_a_single_request() {
        let mut h = harness(true, vec![blocked(), Ok(())]);
        drive(&mut h.controller, ActivationEvent::PageReady);

        let first = h
            .controller
            .handle(ActivationEvent::Interaction(InteractionKind::TouchStart));
        let second = h
            .controller
            .handle(ActivationEvent::Interaction(InteractionKind::Click));
        let third = h.controller.handle(ActivationEvent::PromptActivated);

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert!(third.is_empty());
        assert_eq!(h.media.borrow().play_calls, 2);
    }

    #[test]
    fn failed_interaction_keeps_listening_and_next_one_retries() {
        let mut h = harness(
            false,
            vec![
                blocked(),
                Err(PlaybackError::PlaybackFailure("network".to_string())),
                Ok(()),
            ],
        );
        drive(&mut h.controller, ActivationEvent::PageReady);

        drive(
            &mut h.controller,
            ActivationEvent::Interaction(InteractionKind::Click),
        );
        assert_eq!(h.controller.phase(), ActivationPhase::AwaitingInteraction);
        assert!(h.controller.is_listening());
        assert_eq!(h.controller.request_in_flight(), None);
        assert_eq!(h.surface.borrow().listeners.len(), 3);
        // Failure after an interaction never mounts the prompt.
        assert_eq!(h.controller.prompt(), PromptState::Absent);

        drive(
            &mut h.controller,
            ActivationEvent::Interaction(InteractionKind::KeyDown),
        );
        assert_eq!(h.controller.phase(), ActivationPhase::Playing);
        assert_eq!(h.media.borrow().play_calls, 3);
        assert_eq!(h.media.borrow().volumes, vec![0.1, 0.1, 0.1]);
    }

    #[test]
    fn interactions_after_playing_do_nothing() {
        let mut h = harness(true, vec![blocked(), Ok(())]);
        drive(&mut h.controller, ActivationEvent::PageReady);
        drive(&mut h.controller, ActivationEvent::PromptActivated);
        let calls_before = h.surface.borrow().calls.len();

        for kind in InteractionKind::ALL {
            assert!(h.controller.handle(ActivationEvent::Interaction(kind)).is_empty());
        }
        assert!(h.controller.handle(ActivationEvent::PromptActivated).is_empty());
        assert!(h.controller.handle(ActivationEvent::PageReady).is_empty());

        assert_eq!(h.media.borrow().play_calls, 2);
        assert_eq!(h.surface.borrow().calls.len(), calls_before);
        assert!(h.controller.intent().is_enabled());
    }

    #[test]
    fn unpaused_media_suppresses_new_requests() {
        let mut h = harness(false, vec![blocked()]);
        drive(&mut h.controller, ActivationEvent::PageReady);
        h.media.borrow_mut().paused = false;

        let followups = h
            .controller
            .handle(ActivationEvent::Interaction(InteractionKind::Click));
        assert!(followups.is_empty());
        assert_eq!(h.media.borrow().play_calls, 1);
    }

    #[test]
    fn prompt_is_never_mounted_twice() {
        let mut h = harness(true, vec![blocked(), Ok(())]);
        drive(&mut h.controller, ActivationEvent::PageReady);
        // A second page-ready must not restart the protocol.
        drive(&mut h.controller, ActivationEvent::PageReady);
        drive(&mut h.controller, ActivationEvent::PromptActivated);
        drive(&mut h.controller, ActivationEvent::PromptFadeElapsed);
        drive(&mut h.controller, ActivationEvent::PromptFadeElapsed);

        let surface = h.surface.borrow();
        assert_eq!(surface.max_prompts, 1);
        assert_eq!(surface.prompts, 0);
        let mounts = surface.calls.iter().filter(|c| **c == SurfaceCall::Mount).count();
        let unmounts = surface.calls.iter().filter(|c| **c == SurfaceCall::Unmount).count();
        assert_eq!((mounts, unmounts), (1, 1));
    }

    #[test]
    fn stale_outcome_does_not_flip_intent() {
        let mut h = harness(true, vec![blocked()]);
        drive(&mut h.controller, ActivationEvent::PageReady);

        h.controller.handle(ActivationEvent::PlaySettled(Ok(())));
        assert!(!h.controller.intent().is_enabled());
        assert_eq!(h.controller.phase(), ActivationPhase::AwaitingInteraction);
    }

    #[test]
    fn listeners_are_removed_exactly_once() {
        let mut h = harness(false, vec![blocked(), Ok(())]);
        drive(&mut h.controller, ActivationEvent::PageReady);
        drive(
            &mut h.controller,
            ActivationEvent::Interaction(InteractionKind::Click),
        );

        let surface = h.surface.borrow();
        let subscribed: Vec<_> = surface
            .calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Subscribe(_)))
            .collect();
        let unsubscribed: Vec<_> = surface
            .calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Unsubscribe(_)))
            .collect();
        assert_eq!(subscribed.len(), 3);
        assert_eq!(unsubscribed.len(), 3);
        assert!(surface.listeners.is_empty());
        // Silent mode never had a prompt, so nothing to fade.
        assert!(!surface.calls.iter().any(|c| matches!(c, SurfaceCall::Fade(_))));
    }

    #[test]
    fn intent_stays_enabled_for_the_session() {
        let mut h = harness(true, vec![Ok(())]);
        drive(&mut h.controller, ActivationEvent::PageReady);
        h.media.borrow_mut().paused = true;

        for event in [
            ActivationEvent::PlaySettled(blocked()),
            ActivationEvent::Interaction(InteractionKind::Click),
            ActivationEvent::PromptFadeElapsed,
        ] {
            drive(&mut h.controller, event);
            assert!(h.controller.intent().is_enabled());
            assert_eq!(h.controller.phase(), ActivationPhase::Playing);
        }
    }
}
