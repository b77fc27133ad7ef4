// Browser bindings: the audio element, document listeners, and the session slot.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;
use futures_util::future::{self, FutureExt};
use gloo_timers::future::TimeoutFuture;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, AddEventListenerOptions, HtmlAudioElement};

use super::{
    ActivationConfig, ActivationController, ActivationEvent, Followup, InteractionKind,
    InteractionSurface, MediaSurface, PlayFuture, PlaybackError,
};
use crate::components::{PromptView, MUSIC_PROMPT_ID};

pub struct WebMediaSurface {
    audio: HtmlAudioElement,
}

impl WebMediaSurface {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self { audio }
    }
}

impl MediaSurface for WebMediaSurface {
    fn is_paused(&self) -> bool {
        self.audio.paused()
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume.clamp(0.0, 1.0));
    }

    fn play(&mut self) -> PlayFuture {
        match self.audio.play() {
            Ok(promise) => async move {
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| PlaybackError::from_js(&err))
            }
            .boxed_local(),
            // Older engines throw instead of rejecting.
            Err(err) => future::ready(Err(PlaybackError::from_js(&err))).boxed_local(),
        }
    }
}

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// Document listeners plus the prompt signal rendered by `ActivationPrompt`.
pub struct DomInteractionSurface {
    listeners: HashMap<InteractionKind, Listener>,
    prompt: Signal<PromptView>,
    runtime: Rc<Runtime>,
}

impl DomInteractionSurface {
    /// Must be called inside a component so the Dioxus runtime is current.
    pub fn new(prompt: Signal<PromptView>) -> Self {
        Self {
            listeners: HashMap::new(),
            prompt,
            runtime: Runtime::current(),
        }
    }

    fn set_prompt(&mut self, view: PromptView) {
        // Play outcomes and timers land outside the render cycle.
        let _guard = RuntimeGuard::new(self.runtime.clone());
        self.prompt.set(view);
    }
}

impl InteractionSurface for DomInteractionSurface {
    fn subscribe(&mut self, kind: InteractionKind) {
        if self.listeners.contains_key(&kind) {
            return;
        }
        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };

        let listener = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            dispatch(ActivationEvent::Interaction(kind));
        }) as Box<dyn FnMut(web_sys::Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);

        if let Err(err) = document.add_event_listener_with_callback_and_add_event_listener_options(
            kind.event_name(),
            listener.as_ref().unchecked_ref(),
            &options,
        ) {
            warn!(event = kind.event_name(), ?err, "failed to register interaction listener");
            return;
        }
        self.listeners.insert(kind, listener);
    }

    fn unsubscribe(&mut self, kind: InteractionKind) {
        let Some(listener) = self.listeners.remove(&kind) else {
            return;
        };
        if let Some(document) = window().and_then(|w| w.document()) {
            let _ = document.remove_event_listener_with_callback(
                kind.event_name(),
                listener.as_ref().unchecked_ref(),
            );
        }
    }

    fn mount_prompt(&mut self) {
        let already_mounted = window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(MUSIC_PROMPT_ID))
            .is_some();
        if already_mounted {
            debug!("activation prompt already in the document");
            return;
        }
        self.set_prompt(PromptView::Visible);
    }

    fn fade_prompt(&mut self, duration: Duration) {
        self.set_prompt(PromptView::FadingOut {
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        });
    }

    fn unmount_prompt(&mut self) {
        self.set_prompt(PromptView::Hidden);
    }
}

type WebController = ActivationController<WebMediaSurface, DomInteractionSurface>;

struct ActivationSession {
    controller: RefCell<WebController>,
}

thread_local! {
    static SESSION: RefCell<Option<Rc<ActivationSession>>> = RefCell::new(None);
}

/// Start the activation protocol for the audio element with id `audio_id`.
///
/// One session per page; later calls are ignored.
pub fn start_session(config: ActivationConfig, audio_id: &str, prompt: Signal<PromptView>) {
    if SESSION.with(|slot| slot.borrow().is_some()) {
        debug!("activation session already running");
        return;
    }

    let Some(audio) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(audio_id))
        .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
    else {
        warn!(id = audio_id, "background music element not found; music disabled");
        return;
    };

    let controller = ActivationController::new(
        config,
        WebMediaSurface::new(audio),
        DomInteractionSurface::new(prompt),
    );
    let session = Rc::new(ActivationSession {
        controller: RefCell::new(controller),
    });
    SESSION.with(|slot| *slot.borrow_mut() = Some(session.clone()));
    session.dispatch(ActivationEvent::PageReady);
}

/// Route an event into the running session, if any.
pub fn dispatch(event: ActivationEvent) {
    let session = SESSION.with(|slot| slot.borrow().clone());
    match session {
        Some(session) => session.dispatch(event),
        None => debug!(?event, "no activation session; dropping event"),
    }
}

impl ActivationSession {
    fn dispatch(self: &Rc<Self>, event: ActivationEvent) {
        let followups = match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                let followups = controller.handle(event);
                debug!(
                    phase = ?controller.phase(),
                    enabled = controller.intent().is_enabled(),
                    prompt = ?controller.prompt(),
                    listening = controller.is_listening(),
                    in_flight = ?controller.request_in_flight(),
                    "activation event handled"
                );
                followups
            }
            Err(_) => {
                debug!(?event, "activation controller busy; dropping event");
                return;
            }
        };

        for followup in followups {
            let session = Rc::clone(self);
            match followup {
                Followup::AwaitPlay(request) => spawn_local(async move {
                    let outcome = request.await;
                    session.dispatch(ActivationEvent::PlaySettled(outcome));
                }),
                Followup::RemovePromptAfter(delay) => spawn_local(async move {
                    TimeoutFuture::new(u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)).await;
                    session.dispatch(ActivationEvent::PromptFadeElapsed);
                }),
            }
        }
    }
}
