use mind_core::model::{MiniGameType, Question, ResultsModel};

pub type MiniGameListener = Box<dyn FnMut(MiniGameType) + Send>;
pub type CompleteListener = Box<dyn FnMut(&ResultsModel) + Send>;
pub type TickListener = Box<dyn FnMut(usize, u32) + Send>;
pub type QuestionListener = Box<dyn FnMut(usize, &Question) + Send>;

/// Returned by every `on_*` registration; pass it to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    mini_game: Vec<(SubscriptionId, MiniGameListener)>,
    complete: Vec<(SubscriptionId, CompleteListener)>,
    tick: Vec<(SubscriptionId, TickListener)>,
    question: Vec<(SubscriptionId, QuestionListener)>,
}

impl Listeners {
    fn next(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn add_mini_game(&mut self, listener: MiniGameListener) -> SubscriptionId {
        let id = self.next();
        self.mini_game.push((id, listener));
        id
    }

    pub(crate) fn add_complete(&mut self, listener: CompleteListener) -> SubscriptionId {
        let id = self.next();
        self.complete.push((id, listener));
        id
    }

    pub(crate) fn add_tick(&mut self, listener: TickListener) -> SubscriptionId {
        let id = self.next();
        self.tick.push((id, listener));
        id
    }

    pub(crate) fn add_question(&mut self, listener: QuestionListener) -> SubscriptionId {
        let id = self.next();
        self.question.push((id, listener));
        id
    }

    /// Drop the listener registered under `id`; returns false if none was.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.len();
        self.mini_game.retain(|(sub, _)| *sub != id);
        self.complete.retain(|(sub, _)| *sub != id);
        self.tick.retain(|(sub, _)| *sub != id);
        self.question.retain(|(sub, _)| *sub != id);
        self.len() != before
    }

    fn len(&self) -> usize {
        self.mini_game.len() + self.complete.len() + self.tick.len() + self.question.len()
    }

    pub(crate) fn mini_game_triggered(&mut self, game: MiniGameType) {
        for (_, listener) in &mut self.mini_game {
            listener(game);
        }
    }

    pub(crate) fn completed(&mut self, results: &ResultsModel) {
        for (_, listener) in &mut self.complete {
            listener(results);
        }
    }

    pub(crate) fn ticked(&mut self, question_index: usize, remaining: u32) {
        for (_, listener) in &mut self.tick {
            listener(question_index, remaining);
        }
    }

    pub(crate) fn question_presented(&mut self, index: usize, question: &Question) {
        for (_, listener) in &mut self.question {
            listener(index, question);
        }
    }
}
