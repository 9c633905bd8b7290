use voice_grocer::config::VoiceConfig;
use voice_grocer::engine::{ScriptedRecognizer, ScriptedSynthesizer};
use voice_grocer::error::VoiceError;
use voice_grocer::kernel::speech::{split_sentences, Voice};
use voice_grocer::kernel::{SessionController, SessionEvent, Tick};

type Controller = SessionController<ScriptedRecognizer, ScriptedSynthesizer>;

fn controller_with(synth: ScriptedSynthesizer) -> Controller {
    SessionController::new(VoiceConfig::default(), ScriptedRecognizer::new(), synth)
}

fn controller() -> Controller {
    controller_with(ScriptedSynthesizer::new())
}

fn at(ms: u64) -> Tick {
    Tick::from_millis(ms)
}

fn current_id(c: &Controller) -> uuid::Uuid {
    c.synthesizer().last_spoken().expect("a unit is playing").id
}

#[test]
fn test_split_keeps_terminal_punctuation() {
    assert_eq!(
        split_sentences("Hi! Really?? Yes"),
        vec!["Hi!", "Really??", "Yes"]
    );
    assert_eq!(
        split_sentences("Apples: Sweet apples. Price: $2.99."),
        vec!["Apples: Sweet apples.", "Price: $2.99."]
    );
    assert!(split_sentences("").is_empty());
    assert!(split_sentences(" \n ").is_empty());
}

#[test]
fn test_blank_speak_changes_nothing() {
    let mut c = controller();

    c.speak("");
    c.speak("   ");

    assert!(c.synthesizer().spoken.is_empty());
    assert_eq!(c.synthesizer().cancels, 0);
    assert!(!c.is_speaking());
}

#[test]
fn test_units_play_in_order_with_pause() {
    let mut c = controller();
    c.speak("Hello there. How are you?");

    assert_eq!(c.synthesizer().spoken_texts(), vec!["Hello there."]);
    assert!(c.is_speaking());

    // 1. First unit completes; the next waits for the inter-unit pause
    let first = current_id(&c);
    c.tick_step(at(0), vec![SessionEvent::finished(first)]);
    assert_eq!(c.synthesizer().spoken.len(), 1);
    assert!(c.is_speaking(), "still speaking between units");

    c.advance_to(at(49));
    assert_eq!(c.synthesizer().spoken.len(), 1);
    c.advance_to(at(50));
    assert_eq!(c.synthesizer().spoken_texts(), vec!["Hello there.", "How are you?"]);

    // 2. Last unit completes
    let second = current_id(&c);
    c.tick_step(at(60), vec![SessionEvent::finished(second)]);
    assert!(!c.is_speaking());
}

#[test]
fn test_second_speak_replaces_first() {
    let mut c = controller();

    c.speak("One. Two.");
    let stale = current_id(&c);
    c.speak("One. Two.");
    let fresh = current_id(&c);

    assert_ne!(stale, fresh);
    assert_eq!(c.synthesizer().cancels, 2);

    // Completion of the superseded unit is ignored
    c.tick_step(at(0), vec![SessionEvent::finished(stale)]);
    c.advance_to(at(100));
    assert_eq!(c.synthesizer().spoken.len(), 2, "nothing advanced on a stale event");

    c.tick_step(at(100), vec![SessionEvent::finished(fresh)]);
    c.advance_to(at(150));
    let last = current_id(&c);
    c.tick_step(at(200), vec![SessionEvent::finished(last)]);

    assert_eq!(c.synthesizer().spoken_texts(), vec!["One.", "One.", "Two."]);
    assert!(!c.is_speaking());
}

#[test]
fn test_failed_unit_advances_immediately() {
    let mut c = controller();
    c.speak("One. Two.");

    let first = current_id(&c);
    c.tick_step(at(0), vec![SessionEvent::failed(first, "synthesis-failed")]);

    assert_eq!(c.synthesizer().spoken_texts(), vec!["One.", "Two."]);
    assert_eq!(c.telemetry().snapshot().speech_stats.failed, 1);
}

#[test]
fn test_engine_rejecting_unit_skips_it() {
    let mut synth = ScriptedSynthesizer::new();
    synth.speak_failures.push_back(VoiceError::Engine("no audio device".to_string()));
    let mut c = controller_with(synth);

    c.speak("One. Two.");

    assert_eq!(c.synthesizer().spoken_texts(), vec!["Two."]);
    assert!(c.is_speaking());
}

#[test]
fn test_mute_blocks_and_silences() {
    let mut c = controller();
    c.speak("Taking you to checkout.");
    assert!(c.is_speaking());

    assert!(c.toggle_mute());
    assert!(!c.is_speaking());
    assert!(c.status().muted);

    c.speak("Opening your shopping cart.");
    assert_eq!(c.synthesizer().spoken.len(), 1);

    assert!(!c.toggle_mute());
    c.speak("Opening your shopping cart.");
    assert_eq!(c.synthesizer().spoken.len(), 2);
}

#[test]
fn test_units_carry_configured_settings() {
    let voices = vec![Voice::new("Alex", "en-US"), Voice::new("Samantha", "en-US")];
    let mut c = controller_with(ScriptedSynthesizer::with_voices(voices));
    c.init().expect("init");

    c.speak("Hello.");
    let unit = c.synthesizer().last_spoken().expect("spoken");

    assert_eq!(unit.settings.voice.as_ref().map(|v| v.name.as_str()), Some("Samantha"));
    assert!((unit.settings.rate - 1.1).abs() < f32::EPSILON);
    assert!((unit.settings.volume - 1.0).abs() < f32::EPSILON);
}

#[test]
fn test_voice_fallbacks() {
    let mut english = controller_with(ScriptedSynthesizer::with_voices(vec![
        Voice::new("Thomas", "fr-FR"),
        Voice::new("Moira", "en-IE"),
    ]));
    english.init().expect("init");
    assert_eq!(english.voice().map(|v| v.name.as_str()), Some("Moira"));

    let mut any = controller_with(ScriptedSynthesizer::with_voices(vec![Voice::new("Thomas", "fr-FR")]));
    any.init().expect("init");
    assert_eq!(any.voice().map(|v| v.name.as_str()), Some("Thomas"));
}

#[test]
fn test_voices_changed_reselects() {
    let mut c = controller();
    c.init().expect("init");
    assert!(c.voice().is_none());

    c.synthesizer_mut().voices = vec![Voice::new("Google US English", "en-US")];
    c.tick_step(at(0), vec![SessionEvent::voices_changed()]);

    assert_eq!(c.voice().map(|v| v.name.as_str()), Some("Google US English"));
}
