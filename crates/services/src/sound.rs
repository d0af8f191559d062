use std::fmt;
#[cfg(test)]
use std::sync::Mutex;

/// Audio cue emitted by the session. Delivery is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    Click,
    Transition,
    Correct,
    Incorrect,
    Timeout,
    Complete,
}

impl SoundEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SoundEvent::Click => "click",
            SoundEvent::Transition => "transition",
            SoundEvent::Correct => "correct",
            SoundEvent::Incorrect => "incorrect",
            SoundEvent::Timeout => "timeout",
            SoundEvent::Complete => "complete",
        }
    }
}

impl fmt::Display for SoundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Injected audio collaborator. Implementations must not block.
pub trait SoundSink: Send + Sync {
    fn play(&self, event: SoundEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play(&self, _event: SoundEvent) {}
}

/// Keeps every event in order for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSound {
    events: Mutex<Vec<SoundEvent>>,
}

#[cfg(test)]
impl RecordingSound {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn events(&self) -> Vec<SoundEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, event: SoundEvent) -> usize {
        self.events().into_iter().filter(|e| *e == event).count()
    }
}

#[cfg(test)]
impl SoundSink for RecordingSound {
    fn play(&self, event: SoundEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sound_keeps_order() {
        let sound = RecordingSound::new();
        sound.play(SoundEvent::Click);
        sound.play(SoundEvent::Correct);
        sound.play(SoundEvent::Click);
        assert_eq!(
            sound.events(),
            vec![SoundEvent::Click, SoundEvent::Correct, SoundEvent::Click]
        );
        assert_eq!(sound.count(SoundEvent::Click), 2);
    }

    #[test]
    fn event_names_are_lowercase() {
        assert_eq!(SoundEvent::Timeout.to_string(), "timeout");
        assert_eq!(SoundEvent::Complete.as_str(), "complete");
    }
}
