//! Speech through the platform `say` command (macOS).

use std::process::Command as StdCommand;

use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::SynthesisEngine;
use crate::error::Result;
use crate::kernel::event::SessionEvent;
use crate::kernel::speech::{UtteranceUnit, Voice};

/// `say` default speaking rate in words per minute.
const BASE_WPM: f32 = 175.0;

pub struct SayCommandSynthesizer {
    events: mpsc::Sender<SessionEvent>,
    stop: Option<oneshot::Sender<()>>,
}

impl SayCommandSynthesizer {
    pub fn new(events: mpsc::Sender<SessionEvent>) -> Self {
        Self { events, stop: None }
    }
}

/// Parses `say -v ?` lines like `Samantha    en_US    # Hello, my name is Samantha.`
fn parse_voice_line(line: &str) -> Option<Voice> {
    let entry = line.split('#').next()?.trim_end();
    let (name, lang) = entry.rsplit_once(char::is_whitespace)?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(Voice::new(name, lang.replace('_', "-")))
}

impl SynthesisEngine for SayCommandSynthesizer {
    fn speak(&mut self, unit: &UtteranceUnit) -> Result<()> {
        self.cancel_all();

        let mut cmd = Command::new("say");
        if let Some(voice) = &unit.settings.voice {
            cmd.arg("-v").arg(&voice.name);
        }
        let wpm = (BASE_WPM * unit.settings.rate).round() as u32;
        cmd.arg("-r").arg(wpm.to_string()).arg(&unit.text).kill_on_drop(true);

        let mut child = cmd.spawn()?;
        let (stop_tx, mut stop_rx) = oneshot::channel();
        self.stop = Some(stop_tx);

        let tx = self.events.clone();
        let id = unit.id;
        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    let event = match status {
                        Ok(status) if status.success() => SessionEvent::finished(id),
                        Ok(status) => SessionEvent::failed(id, &format!("say exited with {}", status)),
                        Err(e) => SessionEvent::failed(id, &e.to_string()),
                    };
                    let _ = tx.send(event).await;
                }
                _ = &mut stop_rx => {
                    let _ = child.kill().await;
                    debug!("Playback of {} stopped", id);
                }
            }
        });
        Ok(())
    }

    fn cancel_all(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }

    fn list_available_voices(&self) -> Vec<Voice> {
        match StdCommand::new("say").args(["-v", "?"]).output() {
            Ok(out) => String::from_utf8_lossy(&out.stdout)
                .lines()
                .filter_map(parse_voice_line)
                .collect(),
            Err(e) => {
                warn!("Could not list voices: {}", e);
                Vec::new()
            }
        }
    }

    fn dispose(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_voice_listing() {
        let voice = parse_voice_line("Samantha            en_US    # Hello, my name is Samantha.").unwrap();
        assert_eq!(voice.name, "Samantha");
        assert_eq!(voice.lang, "en-US");

        let spaced = parse_voice_line("Good News           en_US    # Hello").unwrap();
        assert_eq!(spaced.name, "Good News");

        assert!(parse_voice_line("").is_none());
    }
}
