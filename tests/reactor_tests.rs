use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use voice_grocer::catalog::StaticCatalog;
use voice_grocer::config::VoiceConfig;
use voice_grocer::dispatch::{DispatchOutcome, EMPTY_CHECKOUT_RESPONSE};
use voice_grocer::engine::{ScriptedRecognizer, ScriptedSynthesizer};
use voice_grocer::intent::Action;
use voice_grocer::kernel::{Reactor, SessionController, SessionEvent, Tick};

type TestReactor = Reactor<ScriptedRecognizer, ScriptedSynthesizer, StaticCatalog>;

fn reactor() -> (mpsc::Sender<SessionEvent>, CancellationToken, TestReactor) {
    let (tx, rx) = mpsc::channel(100);
    let shutdown = CancellationToken::new();
    let controller = SessionController::new(
        VoiceConfig::default(),
        ScriptedRecognizer::new(),
        ScriptedSynthesizer::new(),
    );
    let reactor = Reactor::new(rx, controller, StaticCatalog::demo(), shutdown.clone());
    (tx, shutdown, reactor)
}

#[tokio::test]
async fn test_transcript_becomes_spoken_turn() {
    let (_tx, _shutdown, mut reactor) = reactor();
    reactor.controller.start_listening();

    // 1. Final result arrives; nothing happens until the quiet period ends
    let turns = reactor.tick_step(Tick::from_millis(0), vec![SessionEvent::transcript("add 2 pasta")]);
    assert!(turns.is_empty());

    // 2. Delivery: classify, dispatch, speak
    let turns = reactor.tick_step(Tick::from_millis(300), vec![]);
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].intent.action, Action::Add);
    assert_eq!(turns[0].outcome, DispatchOutcome::Added { id: 16, quantity: 2 });
    assert_eq!(reactor.shop.cart.quantity_of(16), 2);

    let spoken = reactor.controller.synthesizer().spoken_texts();
    assert_eq!(spoken, vec!["Added 2 Pasta to your cart."]);
}

#[tokio::test]
async fn test_empty_checkout_is_announced() {
    let (_tx, _shutdown, mut reactor) = reactor();
    reactor.controller.start_listening();

    reactor.tick_step(Tick::from_millis(0), vec![SessionEvent::transcript("checkout")]);
    let turns = reactor.tick_step(Tick::from_millis(300), vec![]);

    assert_eq!(turns[0].reply, EMPTY_CHECKOUT_RESPONSE);
    assert_eq!(
        reactor.controller.synthesizer().spoken_texts(),
        vec!["Your cart is empty."]
    );
}

#[tokio::test]
async fn test_turns_follow_delivery_order() {
    let (_tx, _shutdown, mut reactor) = reactor();
    reactor.controller.start_listening();

    reactor.tick_step(Tick::from_millis(0), vec![SessionEvent::transcript("add milk")]);
    let first = reactor.tick_step(Tick::from_millis(300), vec![]);
    reactor.tick_step(Tick::from_millis(400), vec![SessionEvent::transcript("go to cart")]);
    let second = reactor.tick_step(Tick::from_millis(700), vec![]);

    assert_eq!(first[0].intent.action, Action::Add);
    assert_eq!(second[0].intent.action, Action::Cart);
    assert!(matches!(second[0].outcome, DispatchOutcome::ShowCart { items: 1, .. }));
}

#[tokio::test]
async fn test_exhausted_reconnect_is_spoken() {
    let (_tx, _shutdown, mut reactor) = reactor();
    reactor.controller.start_listening();

    let mut t = 0;
    for _ in 0..10 {
        reactor.tick_step(Tick::from_millis(t), vec![SessionEvent::ended()]);
        t += 5000;
        reactor.tick_step(Tick::from_millis(t), vec![]);
    }

    let spoken = reactor.controller.synthesizer().spoken_texts();
    assert_eq!(spoken.first().copied(), Some("Failed to reconnect after 10 attempts."));
}

#[tokio::test]
async fn test_run_drains_channel_and_stops_on_cancel() {
    let (tx, shutdown, mut reactor) = reactor();
    reactor.controller.start_listening();

    tx.send(SessionEvent::transcript("add 3 onions")).await.unwrap();

    let stopper = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(600)).await;
        stopper.cancel();
    });

    tokio::time::timeout(Duration::from_secs(5), reactor.run())
        .await
        .expect("reactor stops on cancel");

    assert_eq!(reactor.shop.cart.quantity_of(17), 3);
    assert!(reactor.controller.recognizer().disposed);
    assert!(reactor.controller.synthesizer().disposed);
}
