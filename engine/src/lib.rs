pub mod countdown;

/// Result of feeding one input through a [`GameLogic`].
///
/// The next state plus every side effect the host should perform, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<State, Effect> {
    pub state: State,
    pub effects: Vec<Effect>,
}

impl<State, Effect> Step<State, Effect> {
    pub fn new(state: State) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

pub trait GameLogic {
    type State;
    type Input;
    type Effect;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Step<Self::State, Self::Effect>;
}

/// Drives a [`GameLogic`] without any host attached, keeping every state and
/// effect it produced so callers can inspect the whole run afterwards.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    states: Vec<G::State>,
    effects: Vec<G::Effect>,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let initial_state = game.initial_state();
        Self {
            game,
            states: vec![initial_state],
            effects: Vec::new(),
        }
    }

    /// Number of inputs applied so far.
    pub fn frame(&self) -> usize {
        self.states.len() - 1
    }

    pub fn state(&self) -> &G::State {
        &self.states[self.states.len() - 1]
    }

    pub fn state_at(&self, frame: usize) -> Option<&G::State> {
        self.states.get(frame)
    }

    pub fn history(&self) -> &[G::State] {
        &self.states
    }

    pub fn effects(&self) -> &[G::Effect] {
        &self.effects
    }

    /// Applies `input` and returns the effects emitted by this step only.
    pub fn step(&mut self, input: G::Input) -> &[G::Effect] {
        let Step { state, effects } = self.game.step(self.state(), input);
        let first_new = self.effects.len();
        self.states.push(state);
        self.effects.extend(effects);
        &self.effects[first_new..]
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        for input in inputs {
            self.step(input);
        }
        self.frame()
    }

    /// Drops the recorded run and starts over from the initial state.
    pub fn reset(&mut self) {
        self.states.clear();
        self.states.push(self.game.initial_state());
        self.effects.clear();
    }
}
