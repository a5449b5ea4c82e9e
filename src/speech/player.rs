use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rand::Rng;
use serde::Serialize;

use super::catalog::{Subscription, VoiceCatalog};
use super::voice::{select_voice, selection_label, Voice};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtteranceRequest {
    pub text: String,
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl UtteranceRequest {
    pub fn new(text: impl Into<String>, voice: Option<Voice>) -> Self {
        Self {
            text: text.into(),
            voice,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Host speech-synthesis engine. Playback is fire-and-forget.
pub trait SpeechPlayer: Send + Sync {
    fn is_speaking(&self) -> bool;
    fn cancel(&self);
    fn speak(&self, utterance: UtteranceRequest);
}

/// Picks a voice for each utterance and keeps at most one utterance active.
pub struct SpeechController<P: SpeechPlayer> {
    player: P,
    voices: Arc<RwLock<Vec<Voice>>>,
    last_voice: RwLock<String>,
    // Held across cancel, select and submit so concurrent callers cannot overlap
    playback: Mutex<()>,
    _subscription: Subscription,
}

impl<P: SpeechPlayer> SpeechController<P> {
    pub fn new(catalog: &dyn VoiceCatalog, player: P) -> Self {
        let voices = Arc::new(RwLock::new(catalog.list_voices()));

        let target = Arc::clone(&voices);
        let subscription = catalog.subscribe(Arc::new(move |updated: Vec<Voice>| {
            *target.write().unwrap_or_else(PoisonError::into_inner) = updated;
        }));

        Self {
            player,
            voices,
            last_voice: RwLock::new(String::new()),
            playback: Mutex::new(()),
            _subscription: subscription,
        }
    }

    pub fn speak(&self, text: &str) -> UtteranceRequest {
        self.speak_with(text, &mut rand::thread_rng())
    }

    /// Cancel whatever is playing, then speak `text` with a randomly chosen voice.
    pub fn speak_with<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> UtteranceRequest {
        let _playback = self.playback.lock().unwrap_or_else(PoisonError::into_inner);

        if self.player.is_speaking() {
            self.player.cancel();
        }

        let chosen = {
            let voices = self.voices.read().unwrap_or_else(PoisonError::into_inner);
            select_voice(&voices, rng).cloned()
        };

        let label = selection_label(chosen.as_ref());
        tracing::info!(voice = %label, "Speaking");
        *self.last_voice.write().unwrap_or_else(PoisonError::into_inner) = label;

        let utterance = UtteranceRequest::new(text, chosen);
        self.player.speak(utterance.clone());
        utterance
    }

    pub fn stop(&self) {
        let _playback = self.playback.lock().unwrap_or_else(PoisonError::into_inner);
        if self.player.is_speaking() {
            self.player.cancel();
        }
    }

    pub fn voices(&self) -> Vec<Voice> {
        self.voices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Label of the most recent selection; empty before anything was spoken.
    pub fn last_voice_label(&self) -> String {
        self.last_voice
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::speech::catalog::InMemoryVoiceCatalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Event {
        Cancel,
        Speak(UtteranceRequest),
    }

    /// Records calls; an utterance stays active until cancelled or `finish` is called.
    #[derive(Clone, Default)]
    pub struct FakePlayer {
        events: Arc<Mutex<Vec<Event>>>,
        speaking: Arc<Mutex<bool>>,
    }

    impl FakePlayer {
        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        pub fn finish(&self) {
            *self.speaking.lock().unwrap() = false;
        }
    }

    impl SpeechPlayer for FakePlayer {
        fn is_speaking(&self) -> bool {
            *self.speaking.lock().unwrap()
        }

        fn cancel(&self) {
            *self.speaking.lock().unwrap() = false;
            self.events.lock().unwrap().push(Event::Cancel);
        }

        fn speak(&self, utterance: UtteranceRequest) {
            let mut speaking = self.speaking.lock().unwrap();
            assert!(!*speaking, "two utterances active at once");
            *speaking = true;
            self.events.lock().unwrap().push(Event::Speak(utterance));
        }
    }

    fn setup(
        voices: Vec<Voice>,
    ) -> (InMemoryVoiceCatalog, FakePlayer, SpeechController<FakePlayer>) {
        let catalog = InMemoryVoiceCatalog::new(voices);
        let player = FakePlayer::default();
        let controller = SpeechController::new(&catalog, player.clone());
        (catalog, player, controller)
    }

    #[test]
    fn utterance_uses_fixed_parameters() {
        let (_catalog, player, controller) = setup(vec![Voice::new("Samantha", "en-US")]);
        let utterance = controller.speak("Hello akash");

        assert_eq!(utterance.text, "Hello akash");
        assert_eq!(utterance.rate, 1.0);
        assert_eq!(utterance.pitch, 1.0);
        assert_eq!(utterance.volume, 1.0);
        assert_eq!(utterance.voice, Some(Voice::new("Samantha", "en-US")));
        assert_eq!(player.events(), vec![Event::Speak(utterance)]);
        assert_eq!(controller.last_voice_label(), "Samantha (en-US)");
    }

    #[test]
    fn new_speech_cancels_active_one() {
        let (_catalog, player, controller) = setup(vec![Voice::new("Samantha", "en-US")]);
        controller.speak("first");
        controller.speak("second");

        let events = player.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], Event::Speak(u) if u.text == "first"));
        assert_eq!(events[1], Event::Cancel);
        assert!(matches!(&events[2], Event::Speak(u) if u.text == "second"));
    }

    #[test]
    fn finished_speech_is_not_cancelled() {
        let (_catalog, player, controller) = setup(vec![]);
        controller.speak("first");
        player.finish();
        controller.speak("second");
        assert!(!player.events().contains(&Event::Cancel));
    }

    #[test]
    fn no_voices_uses_system_default() {
        let (_catalog, player, controller) = setup(vec![]);
        let utterance = controller.speak("hi");
        assert!(utterance.voice.is_none());
        assert_eq!(controller.last_voice_label(), "System default");
        assert_eq!(player.events().len(), 1);
    }

    #[test]
    fn prefers_english_voices() {
        let (_catalog, _player, controller) = setup(vec![
            Voice::new("Thomas", "fr-FR"),
            Voice::new("Daniel", "en-GB"),
            Voice::new("Anna", "de-DE"),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let utterance = controller.speak_with("hi", &mut rng);
            assert_eq!(utterance.voice.unwrap().name, "Daniel");
        }
    }

    #[test]
    fn concurrent_callers_never_overlap() {
        let (_catalog, player, controller) = setup(vec![Voice::new("Samantha", "en-US")]);

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let controller = &controller;
                scope.spawn(move || {
                    for i in 0..50 {
                        controller.speak(&format!("{}-{}", worker, i));
                        if i % 7 == 0 {
                            controller.stop();
                        }
                    }
                });
            }
        });

        let mut active = 0;
        for event in player.events() {
            match event {
                Event::Speak(_) => active += 1,
                Event::Cancel => active -= 1,
            }
            assert!(active <= 1, "more than one utterance active");
        }
    }

    #[test]
    fn stop_is_idempotent() {
        let (_catalog, player, controller) = setup(vec![]);
        controller.stop();
        assert!(player.events().is_empty());

        controller.speak("hi");
        controller.stop();
        controller.stop();
        let cancels = player.events().iter().filter(|e| **e == Event::Cancel).count();
        assert_eq!(cancels, 1);
    }

    #[test]
    fn picks_up_late_voice_list() {
        let (catalog, _player, controller) = setup(vec![]);
        assert!(controller.voices().is_empty());

        catalog.set_voices(vec![Voice::new("Karen", "en-AU")]);
        assert_eq!(controller.voices(), vec![Voice::new("Karen", "en-AU")]);

        let utterance = controller.speak("hi");
        assert_eq!(utterance.voice.unwrap().name, "Karen");
    }

    #[test]
    fn updates_replace_list_wholesale() {
        let (catalog, _player, controller) = setup(vec![
            Voice::new("A", "en-US"),
            Voice::new("B", "en-GB"),
        ]);
        catalog.set_voices(vec![Voice::new("C", "fr-FR")]);
        assert_eq!(controller.voices(), vec![Voice::new("C", "fr-FR")]);
    }

    #[test]
    fn dropping_controller_deregisters() {
        let (catalog, _player, controller) = setup(vec![]);
        assert_eq!(catalog.listener_count(), 1);
        drop(controller);
        assert_eq!(catalog.listener_count(), 0);
        catalog.set_voices(vec![Voice::new("A", "en-US")]);
    }

    #[test]
    fn label_is_empty_before_first_speech() {
        let (_catalog, _player, controller) = setup(vec![]);
        assert_eq!(controller.last_voice_label(), "");
    }
}
