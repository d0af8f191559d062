use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use mind_core::Clock;
use mind_core::bank::{QuestionBank, QuestionCatalog};
use mind_core::model::{
    Answer, AssessmentMode, AssessmentSettings, MiniGameResult, MiniGameType, Question,
    ResultsModel, SessionId, SettingsError, TimeoutPolicy,
};
use mind_core::scoring;

use super::listeners::{Listeners, SubscriptionId};
use super::plan::QuestionPlanner;
use super::progress::SessionProgress;
use super::state::{SessionState, is_mini_game_slot};
use crate::error::SessionError;
use crate::mini_games::{MiniGameAdapter, MiniGamePicker};
use crate::sound::{NullSound, SoundEvent, SoundSink};
use crate::timer::{TimerController, TimerHandle};

//
// ─── SIGNALS ───────────────────────────────────────────────────────────────────
//

/// Callback traffic routed back into the session through its inbox.
#[derive(Debug, Clone, PartialEq)]
enum SessionSignal {
    Tick {
        question_index: usize,
        remaining: u32,
    },
    Expired {
        question_index: usize,
    },
    MiniGameCompleted {
        slot: usize,
        result: MiniGameResult,
    },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One assessment run: question position, answers, mini-game slots and the
/// transition rules between them.
///
/// Timer and mini-game callbacks never touch the session directly. They post
/// signals to an inbox that [`AssessmentSession::poll`] drains, so every
/// state change happens on the caller's thread, in order.
pub struct AssessmentSession {
    id: SessionId,
    catalog: QuestionCatalog,
    settings: AssessmentSettings,
    clock: Clock,
    sound: Arc<dyn SoundSink>,
    adapter: MiniGameAdapter,
    picker: MiniGamePicker,
    timer: TimerController,
    active_timer: Option<TimerHandle>,
    listeners: Listeners,
    inbox_tx: UnboundedSender<SessionSignal>,
    inbox_rx: UnboundedReceiver<SessionSignal>,

    state: SessionState,
    bank: Option<QuestionBank>,
    current: usize,
    furthest: usize,
    answers: Vec<Answer>,
    mini_game_slots: BTreeSet<usize>,
    mini_game_results: BTreeMap<MiniGameType, MiniGameResult>,
    results: Option<ResultsModel>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("current", &self.current)
            .field("answers", &self.answers.len())
            .field("mini_game_results", &self.mini_game_results.len())
            .finish_non_exhaustive()
    }
}

impl AssessmentSession {
    #[must_use]
    pub fn new(catalog: QuestionCatalog, adapter: MiniGameAdapter) -> Self {
        let settings = AssessmentSettings::default();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            id: SessionId::random(),
            catalog,
            picker: MiniGamePicker::new(&settings),
            settings,
            clock: Clock::default(),
            sound: Arc::new(NullSound),
            adapter,
            timer: TimerController::new(),
            active_timer: None,
            listeners: Listeners::default(),
            inbox_tx,
            inbox_rx,
            state: SessionState::NotStarted,
            bank: None,
            current: 0,
            furthest: 0,
            answers: Vec::new(),
            mini_game_slots: BTreeSet::new(),
            mini_game_results: BTreeMap::new(),
            results: None,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: AssessmentSettings) -> Self {
        self.picker = MiniGamePicker::new(&settings);
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_sound(mut self, sound: Arc<dyn SoundSink>) -> Self {
        self.sound = sound;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    //
    // ─── SUBSCRIPTIONS ─────────────────────────────────────────────────────────
    //

    /// Called with the chosen game whenever the session blocks on a mini-game.
    pub fn on_mini_game_trigger(
        &mut self,
        listener: impl FnMut(MiniGameType) + Send + 'static,
    ) -> SubscriptionId {
        self.listeners.add_mini_game(Box::new(listener))
    }

    /// Called once per run with the final results.
    pub fn on_complete(
        &mut self,
        listener: impl FnMut(&ResultsModel) + Send + 'static,
    ) -> SubscriptionId {
        self.listeners.add_complete(Box::new(listener))
    }

    /// Called with `(question_index, remaining_seconds)` for the countdown on screen.
    pub fn on_timer_tick(
        &mut self,
        listener: impl FnMut(usize, u32) + Send + 'static,
    ) -> SubscriptionId {
        self.listeners.add_tick(Box::new(listener))
    }

    /// Called whenever a question becomes the current one.
    pub fn on_question(
        &mut self,
        listener: impl FnMut(usize, &Question) + Send + 'static,
    ) -> SubscriptionId {
        self.listeners.add_question(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn settings(&self) -> &AssessmentSettings {
        &self.settings
    }

    #[must_use]
    pub fn mode(&self) -> Option<AssessmentMode> {
        self.bank.as_ref().map(QuestionBank::mode)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Furthest question index reached in this run.
    #[must_use]
    pub fn furthest_index(&self) -> usize {
        self.furthest
    }

    /// Question on screen; `None` unless the session is in progress.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if !self.state.is_in_progress() {
            return None;
        }
        self.bank.as_ref()?.get(self.current).ok()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.bank.as_ref().map_or(0, QuestionBank::count)
    }

    /// Recorded answers, one per question index from 0 upward.
    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, question_index: usize) -> Option<&Answer> {
        self.answers.get(question_index)
    }

    #[must_use]
    pub fn mini_game_results(&self) -> &BTreeMap<MiniGameType, MiniGameResult> {
        &self.mini_game_results
    }

    #[must_use]
    pub fn results(&self) -> Option<&ResultsModel> {
        self.results.as_ref()
    }

    /// Seconds left on the current question's countdown.
    #[must_use]
    pub fn timer_remaining(&self) -> Option<u32> {
        self.active_timer.and(self.timer.remaining())
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.question_count();
        SessionProgress {
            total,
            answered: self.answers.len(),
            remaining: total.saturating_sub(self.answers.len()),
            current_index: self.current,
            mini_games_played: self.mini_game_slots.len(),
            is_complete: self.state.is_completed(),
        }
    }

    //
    // ─── COMMANDS ──────────────────────────────────────────────────────────────
    //

    /// Begin a run in `mode` from its first question.
    ///
    /// Starting again after completion begins a fresh run.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` while a mini-game is in
    /// flight and `SessionError::Bank` if the catalog cannot fill the mode.
    pub fn start(&mut self, mode: AssessmentMode) -> Result<(), SessionError> {
        if self.state.is_awaiting_mini_game() {
            return Err(self.invalid("start a new run"));
        }
        let bank = QuestionPlanner::new(&self.catalog)
            .with_settings(&self.settings)
            .build(mode)?;

        self.cancel_timer();
        while self.inbox_rx.try_recv().is_ok() {}

        self.id = SessionId::random();
        self.picker = MiniGamePicker::new(&self.settings);
        info!(session = %self.id, %mode, questions = bank.count(), "assessment started");
        self.bank = Some(bank);
        self.current = 0;
        self.furthest = 0;
        self.answers.clear();
        self.mini_game_slots.clear();
        self.mini_game_results.clear();
        self.results = None;
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        self.state = SessionState::InProgress;

        self.sound.play(SoundEvent::Transition);
        self.present_current()?;
        self.poll()
    }

    /// Start from a mode name such as `quick` or `deep`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Mode` for an unknown name, otherwise as [`Self::start`].
    pub fn start_named(&mut self, mode: &str) -> Result<(), SessionError> {
        let mode: AssessmentMode = mode.parse()?;
        self.start(mode)
    }

    /// Record an answer for the current question.
    ///
    /// `None` records an expiry: the answer is marked timed out and carries
    /// the question's timeout default. Answering a question again after going
    /// back replaces the earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` unless the session is in
    /// progress and `SessionError::OptionOutOfRange` for a bad option index.
    pub fn submit_answer(&mut self, option: Option<usize>) -> Result<Answer, SessionError> {
        if !self.state.is_in_progress() {
            return Err(self.invalid("submit an answer"));
        }
        let index = self.current;
        let (count, correct, default) = {
            let question = self.question_at(index)?;
            (
                question.option_count(),
                question.correct_index(),
                self.timeout_default(question),
            )
        };

        let answer = match option {
            Some(option) if option >= count => {
                return Err(SessionError::OptionOutOfRange {
                    question_index: index,
                    option,
                    count,
                });
            }
            Some(option) => Answer::chosen(index, option),
            None => Answer::expired(index, default),
        };

        self.cancel_timer();
        if index < self.answers.len() {
            debug!(question_index = index, "overwriting earlier answer");
            self.answers[index] = answer;
        } else {
            self.answers.push(answer);
        }

        match option {
            Some(option) => {
                self.sound.play(SoundEvent::Click);
                if let Some(correct) = correct {
                    let event = if option == correct {
                        SoundEvent::Correct
                    } else {
                        SoundEvent::Incorrect
                    };
                    self.sound.play(event);
                }
            }
            None => self.sound.play(SoundEvent::Timeout),
        }
        debug!(
            question_index = index,
            selected = ?answer.selected,
            timed_out = answer.timed_out,
            "answer recorded"
        );
        Ok(answer)
    }

    /// Move past the current (answered) question.
    ///
    /// After every third question the session first blocks on a mini-game;
    /// leaving the last question completes the run and computes results.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStateTransition` unless in progress
    /// (notably while a mini-game is pending) and `SessionError::Unanswered`
    /// when the current question has no answer yet.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        self.advance_inner()?;
        self.poll()?;
        Ok(self.state)
    }

    /// Return to the previous question, keeping its recorded answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AtFirstQuestion` at index 0 and
    /// `SessionError::GoBackLocked` when a mini-game was played between the
    /// two questions.
    pub fn go_back(&mut self) -> Result<(), SessionError> {
        if !self.state.is_in_progress() {
            return Err(self.invalid("go back"));
        }
        if self.current == 0 {
            return Err(SessionError::AtFirstQuestion);
        }
        let target = self.current - 1;
        if self.mini_game_slots.contains(&target) {
            return Err(SessionError::GoBackLocked { slot: target });
        }

        self.cancel_timer();
        self.current = target;
        self.sound.play(SoundEvent::Click);
        debug!(question_index = target, "went back");
        self.present_current()?;
        self.poll()
    }

    /// Advance the countdown by one second and process the fallout.
    ///
    /// # Errors
    ///
    /// Propagates errors from handling an expiry (see [`Self::poll`]).
    pub fn tick(&mut self) -> Result<(), SessionError> {
        self.timer.tick();
        self.poll()
    }

    /// Process pending timer and mini-game signals.
    ///
    /// An expired question records its timeout answer and advances on its
    /// own; a finished mini-game records its result and moves on. Signals
    /// that no longer match the session are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the resulting transition fails.
    pub fn poll(&mut self) -> Result<(), SessionError> {
        while let Ok(signal) = self.inbox_rx.try_recv() {
            self.handle(signal)?;
        }
        Ok(())
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    fn handle(&mut self, signal: SessionSignal) -> Result<(), SessionError> {
        match signal {
            SessionSignal::Tick {
                question_index,
                remaining,
            } => {
                if self.state.is_in_progress() && question_index == self.current {
                    self.listeners.ticked(question_index, remaining);
                } else {
                    debug!(question_index, remaining, "dropping stale tick");
                }
            }
            SessionSignal::Expired { question_index } => {
                let live = self.state.is_in_progress()
                    && question_index == self.current
                    && question_index >= self.answers.len();
                if !live {
                    warn!(question_index, "dropping stale timer expiry");
                    return Ok(());
                }
                info!(question_index, "question timed out");
                self.submit_answer(None)?;
                self.advance_inner()?;
            }
            SessionSignal::MiniGameCompleted { slot, result } => match self.state {
                SessionState::AwaitingMiniGame {
                    game,
                    slot: pending,
                } if pending == slot && game == result.game_type => {
                    info!(%game, slot, score = result.score, "mini-game completed");
                    self.mini_game_results.insert(game, result);
                    self.state = SessionState::InProgress;
                    self.step_forward()?;
                }
                _ => {
                    warn!(
                        slot,
                        game = %result.game_type,
                        state = %self.state,
                        "dropping unexpected mini-game result"
                    );
                }
            },
        }
        Ok(())
    }

    fn advance_inner(&mut self) -> Result<(), SessionError> {
        if !self.state.is_in_progress() {
            return Err(self.invalid("advance"));
        }
        let index = self.current;
        if index >= self.answers.len() {
            return Err(SessionError::Unanswered { index });
        }

        self.cancel_timer();
        if is_mini_game_slot(index) && !self.mini_game_slots.contains(&index) {
            return self.trigger_mini_game(index);
        }
        self.step_forward()
    }

    fn trigger_mini_game(&mut self, slot: usize) -> Result<(), SessionError> {
        let game = self.picker.pick().ok_or(SettingsError::NoMiniGames)?;
        self.mini_game_slots.insert(slot);
        self.state = SessionState::AwaitingMiniGame { game, slot };
        info!(%game, slot, "mini-game triggered");

        self.sound.play(SoundEvent::Transition);
        self.listeners.mini_game_triggered(game);

        let inbox = self.inbox_tx.clone();
        self.adapter.run(
            game,
            Box::new(move |result| {
                let _ = inbox.send(SessionSignal::MiniGameCompleted { slot, result });
            }),
        );
        Ok(())
    }

    fn step_forward(&mut self) -> Result<(), SessionError> {
        self.current += 1;
        self.furthest = self.furthest.max(self.current);
        if self.current >= self.question_count() {
            return self.complete();
        }
        self.sound.play(SoundEvent::Transition);
        self.present_current()
    }

    fn complete(&mut self) -> Result<(), SessionError> {
        let Some(bank) = self.bank.as_ref() else {
            return Err(self.invalid("complete"));
        };
        let results = scoring::score(bank.questions(), &self.answers, &self.mini_game_results)?;

        self.state = SessionState::Completed;
        self.completed_at = Some(self.clock.now());
        info!(
            session = %self.id,
            answered = results.answered,
            timed_out = results.timed_out,
            mini_games = self.mini_game_results.len(),
            "assessment completed"
        );
        self.sound.play(SoundEvent::Complete);
        self.listeners.completed(&results);
        self.results = Some(results);
        Ok(())
    }

    /// Announce the current question and start its countdown if it is timed
    /// and not yet answered.
    fn present_current(&mut self) -> Result<(), SessionError> {
        let index = self.current;
        let question = match self.bank.as_ref() {
            Some(bank) => bank.get(index)?,
            None => return Err(self.invalid("present a question")),
        };
        let countdown = if index >= self.answers.len() {
            question.time_limit()
        } else {
            None
        };
        debug!(question_index = index, id = %question.id(), "question presented");
        self.listeners.question_presented(index, question);

        if let Some(seconds) = countdown {
            self.start_timer(index, seconds);
        }
        Ok(())
    }

    fn start_timer(&mut self, question_index: usize, seconds: u32) {
        let tick_inbox = self.inbox_tx.clone();
        let expire_inbox = self.inbox_tx.clone();
        let handle = self.timer.start(
            seconds,
            Box::new(move |remaining| {
                let _ = tick_inbox.send(SessionSignal::Tick {
                    question_index,
                    remaining,
                });
            }),
            Box::new(move || {
                let _ = expire_inbox.send(SessionSignal::Expired { question_index });
            }),
        );
        self.active_timer = Some(handle);
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.active_timer.take() {
            self.timer.cancel(handle);
        }
    }

    fn question_at(&self, index: usize) -> Result<&Question, SessionError> {
        match self.bank.as_ref() {
            Some(bank) => Ok(bank.get(index)?),
            None => Err(self.invalid("read a question")),
        }
    }

    fn timeout_default(&self, question: &Question) -> Option<usize> {
        match self.settings.timeout_policy() {
            TimeoutPolicy::MarkedOrLast => Some(question.timeout_default()),
            TimeoutPolicy::MarkedOnly => question.marked_timeout_default(),
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidStateTransition {
            state: self.state,
            action,
        }
    }
}
