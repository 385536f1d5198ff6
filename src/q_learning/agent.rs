//! Q-learning agent
//!
//! Implements ε-greedy action selection, the self-play episode loop, and the
//! trajectory fold that applies the temporal difference update at game end.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::Result,
    q_learning::q_table::QTable,
    tictactoe::{Board, GameStatus, Player},
    types::{Hyperparameters, StateKey, reward},
};

/// One recorded step of a self-play episode.
///
/// `next` holds the successor state key and its legal moves; `None` marks the
/// terminal transition.
#[derive(Debug, Clone)]
struct Transition {
    state: StateKey,
    action: usize,
    player: Player,
    next: Option<(StateKey, Vec<usize>)>,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Owns the value table and the episode counter. Both sides of a self-play
/// game act through the same agent and the same table; hyperparameters are
/// fixed at construction.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    params: Hyperparameters,
    total_episodes: u64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a new agent with an empty table
    pub fn new(params: Hyperparameters) -> Self {
        Self {
            q_table: QTable::new(params.alpha, params.gamma),
            params,
            total_episodes: 0,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Seed the agent's random number generator for deterministic replay
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    /// Re-seed the random number generator in place
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// The agent's fixed hyperparameters
    pub fn params(&self) -> Hyperparameters {
        self.params
    }

    /// Number of self-play episodes completed so far
    pub fn total_episodes(&self) -> u64 {
        self.total_episodes
    }

    /// Number of distinct states in the value table
    pub fn known_states(&self) -> usize {
        self.q_table.len()
    }

    /// Read-only access to the value table
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// ε-greedy action selection.
    ///
    /// With `explore` enabled, a uniform draw below ε picks a uniformly
    /// random legal move; otherwise (and always when `explore` is disabled)
    /// the move with the highest table value is chosen, breaking ties
    /// uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalMoves`] if the board has no empty cell.
    pub fn choose_action(&mut self, board: &Board, explore: bool) -> Result<usize> {
        let legal = board.available_moves();
        if legal.is_empty() {
            return Err(crate::Error::NoLegalMoves);
        }

        let state = board.state_key();
        self.q_table.ensure(&state, &legal);

        if explore && self.rng.random::<f64>() < self.params.epsilon {
            // Explore: uniformly random legal move
            return Ok(*legal.choose(&mut self.rng).unwrap());
        }

        // Exploit: greedy with uniform tie-breaking
        let best = self.q_table.best_actions(&state, &legal);
        Ok(*best.choose(&mut self.rng).unwrap())
    }

    /// Apply the one-step Q-learning update rule.
    ///
    /// `next` is the successor state and its legal moves, or `None` for a
    /// terminal transition.
    pub fn update(
        &mut self,
        state: &StateKey,
        action: usize,
        reward: f64,
        next: Option<(&StateKey, &[usize])>,
    ) {
        self.q_table.update(state, action, reward, next);
    }

    /// Simulate one full self-play game and fold it through the update rule.
    ///
    /// Both sides act via [`choose_action`] with exploration enabled, sharing
    /// the same table. At the terminal state the winner's transition is
    /// rewarded +1.0 (−1.0 for a loss, 0.0 for a draw); every earlier
    /// transition carries reward 0.0 and credit flows backward through the
    /// bootstrapped future value. Returns the outcome from X's perspective
    /// and increments the episode counter.
    ///
    /// [`choose_action`]: Self::choose_action
    pub fn run_self_play_episode(&mut self) -> Result<f64> {
        let mut board = Board::new();
        let mut current = Player::X;
        let mut history: Vec<Transition> = Vec::new();

        loop {
            let action = self.choose_action(&board, true)?;
            let next_board = board.apply_move(action, current)?;
            let status = next_board.status();

            if status.is_terminal() {
                history.push(Transition {
                    state: board.state_key(),
                    action,
                    player: current,
                    next: None,
                });

                let (x_reward, o_reward) = match status {
                    GameStatus::Won(Player::X) => (reward::WIN, reward::LOSS),
                    GameStatus::Won(Player::O) => (reward::LOSS, reward::WIN),
                    GameStatus::Draw | GameStatus::InProgress => (reward::DRAW, reward::DRAW),
                };

                self.fold_trajectory(history, x_reward, o_reward);
                self.total_episodes += 1;
                return Ok(x_reward);
            }

            history.push(Transition {
                state: board.state_key(),
                action,
                player: current,
                next: Some((next_board.state_key(), next_board.available_moves())),
            });
            board = next_board;
            current = current.opponent();
        }
    }

    /// Replay a finished trajectory through the update rule, in order.
    ///
    /// Terminal-marked transitions receive the acting player's terminal
    /// reward; all others receive 0.0.
    fn fold_trajectory(&mut self, history: Vec<Transition>, x_reward: f64, o_reward: f64) {
        for transition in history {
            let step_reward = if transition.next.is_none() {
                match transition.player {
                    Player::X => x_reward,
                    Player::O => o_reward,
                }
            } else {
                0.0
            };

            let next = transition
                .next
                .as_ref()
                .map(|(state, moves)| (state, moves.as_slice()));
            self.update(&transition.state, transition.action, step_reward, next);
        }
    }

    /// Run `episodes` self-play episodes sequentially.
    ///
    /// `train(0)` is a no-op and leaves the table and episode count
    /// untouched.
    pub fn train(&mut self, episodes: u64) -> Result<()> {
        for _ in 0..episodes {
            self.run_self_play_episode()?;
        }
        Ok(())
    }

    /// Best known move for a board, without exploration or table mutation.
    ///
    /// Uses the same greedy tie-break rule as [`choose_action`], but falls
    /// back to a uniformly random legal move when the state is entirely
    /// unseen or no legal move has a recorded value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalMoves`] if the board has no empty cell.
    ///
    /// [`choose_action`]: Self::choose_action
    pub fn best_move(&mut self, board: &Board) -> Result<usize> {
        let legal = board.available_moves();
        if legal.is_empty() {
            return Err(crate::Error::NoLegalMoves);
        }

        let state = board.state_key();
        if !self.q_table.contains_state(&state) {
            return Ok(*legal.choose(&mut self.rng).unwrap());
        }

        let known = self.q_table.known_actions(&state, &legal);
        if known.is_empty() {
            return Ok(*legal.choose(&mut self.rng).unwrap());
        }

        let best = self.q_table.best_actions(&state, &known);
        Ok(*best.choose(&mut self.rng).unwrap())
    }

    /// Discard all learned values and reset the episode counter
    pub fn reset(&mut self) {
        self.q_table.clear();
        self.total_episodes = 0;
    }

    pub(crate) fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub(crate) fn set_total_episodes(&mut self, episodes: u64) {
        self.total_episodes = episodes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> QLearningAgent {
        QLearningAgent::new(Hyperparameters::default()).with_seed(42)
    }

    #[test]
    fn test_choose_action_returns_legal_move() {
        let mut agent = agent();
        let board = Board::new();

        for _ in 0..20 {
            let action = agent.choose_action(&board, true).unwrap();
            assert!(action < 9);
        }
    }

    #[test]
    fn test_choose_action_fails_on_full_board() {
        let mut agent = agent();
        let board = Board::from_string("XOXXOOOXX").unwrap();

        assert!(agent.choose_action(&board, false).is_err());
    }

    #[test]
    fn test_greedy_selection_prefers_highest_value() {
        let mut agent = QLearningAgent::new(
            Hyperparameters::new(0.5, 0.9, 0.0).expect("valid hyperparameters"),
        )
        .with_seed(7);
        let board = Board::new();
        let state = board.state_key();

        agent.q_table_mut().ensure(&state, &board.available_moves());
        agent.q_table_mut().update(&state, 4, 1.0, None);

        // With epsilon 0 the greedy branch always runs and 4 is the unique max
        for _ in 0..10 {
            assert_eq!(agent.choose_action(&board, true).unwrap(), 4);
        }
    }

    #[test]
    fn test_episode_reaches_terminal_and_counts() {
        let mut agent = agent();
        let outcome = agent.run_self_play_episode().unwrap();

        assert!(outcome == 1.0 || outcome == -1.0 || outcome == 0.0);
        assert_eq!(agent.total_episodes(), 1);
        assert!(agent.known_states() > 0);
    }

    #[test]
    fn test_train_accumulates_episodes() {
        let mut agent = agent();
        agent.train(25).unwrap();
        assert_eq!(agent.total_episodes(), 25);

        agent.train(0).unwrap();
        assert_eq!(agent.total_episodes(), 25);
    }

    #[test]
    fn test_best_move_unseen_state_falls_back_to_random() {
        let mut agent = agent();
        let board = Board::from_string("XO.......").unwrap();

        let action = agent.best_move(&board).unwrap();
        assert!(board.available_moves().contains(&action));
    }

    #[test]
    fn test_best_move_fails_without_legal_moves() {
        let mut agent = agent();
        let board = Board::from_string("XOXXOOOXX").unwrap();

        assert!(agent.best_move(&board).is_err());
    }

    #[test]
    fn test_seeded_agents_replay_identically() {
        let mut first = QLearningAgent::new(Hyperparameters::default()).with_seed(123);
        let mut second = QLearningAgent::new(Hyperparameters::default()).with_seed(123);

        for _ in 0..10 {
            assert_eq!(
                first.run_self_play_episode().unwrap(),
                second.run_self_play_episode().unwrap()
            );
        }
        assert_eq!(first.known_states(), second.known_states());
    }
}
