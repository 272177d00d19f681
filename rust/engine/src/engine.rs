use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::cards::Card;
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{self_label, CheckResult, GameStatus, Phase};
use crate::hand::Hand;
use crate::logger::{MoveRecord, RoundLogger, RoundRecord};
use crate::player::{Player, PlayerId};
use crate::rules::{claim_holds, validate_move};

// Separates the seat-picking stream from the deck's shuffle stream.
const SEAT_STREAM_SALT: u64 = 0x5EA7_0F0F;

/// Rules engine for one Bluff match.
/// Owns the roster, the deck, the pooled cards and the move log; every
/// player action goes through [`Engine::process_action`].
///
/// The engine is a plain single-writer value: callers sharing it between
/// tasks must serialize access to the whole engine (one owner task, or a
/// mutex around it).
///
/// # Examples
///
/// ```
/// use bluff_engine::config::GameConfig;
/// use bluff_engine::engine::Engine;
/// use bluff_engine::game::Phase;
///
/// let mut engine = Engine::new(GameConfig::with_seed(12345)).unwrap();
/// engine.add_player(1).unwrap();
/// engine.add_player(2).unwrap();
/// engine.process_action(1, "name Alice").unwrap();
/// engine.process_action(2, "name Bob").unwrap();
///
/// engine.process_action(1, "Start").unwrap();
/// let status = engine.process_action(2, "Start").unwrap();
///
/// assert_eq!(engine.phase(), Phase::InRound);
/// assert!(status.start);
/// assert_eq!(status.hand.len(), 1);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
    /// Seed the deck and seat streams were derived from
    seed: u64,
    /// Seats in join order
    players: Vec<Player>,
    deck: Deck,
    rng: ChaCha20Rng,
    /// Every card dealt this round; checks resolve against it
    cards_in_use: Vec<Card>,
    /// Moves declared this round, oldest first
    moves: Vec<MoveRecord>,
    /// Seat index of the player to act
    turn: usize,
    phase: Phase,
    /// Cards are dealt for the current round
    has_started: bool,
    /// The pool is revealed after a check
    revealed: bool,
    check_result: CheckResult,
    winner: Option<String>,
    round: u32,
    last_round: Option<RoundRecord>,
    /// Receives every checked round when set
    round_log: Option<RoundLogger>,
}

impl Engine {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config
            .validate()
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self::build(config, seed))
    }

    /// Engine with the default configuration and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(GameConfig::with_seed(seed), seed)
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        Self {
            seed,
            players: Vec::with_capacity(config.max_players),
            deck: Deck::new_with_seed(seed),
            rng: ChaCha20Rng::seed_from_u64(seed ^ SEAT_STREAM_SALT),
            cards_in_use: Vec::new(),
            moves: Vec::new(),
            turn: 0,
            phase: Phase::Lobby,
            has_started: false,
            revealed: false,
            check_result: CheckResult::default(),
            winner: None,
            round: 0,
            last_round: None,
            round_log: None,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub fn turn_index(&self) -> usize {
        self.turn
    }
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.turn)
    }
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }
    pub fn cards_in_use(&self) -> &[Card] {
        &self.cards_in_use
    }
    pub fn check_result(&self) -> &CheckResult {
        &self.check_result
    }
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }
    pub fn round(&self) -> u32 {
        self.round
    }
    /// Record of the most recently checked round.
    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.last_round.as_ref()
    }
    /// Sends every future round record to `logger`.
    pub fn set_round_logger(&mut self, logger: RoundLogger) {
        self.round_log = Some(logger);
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn all_players_num(&self) -> usize {
        self.players.len()
    }

    pub fn active_players_num(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    pub fn ready_players(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.is_active() && p.is_ready())
            .count()
    }

    /// All active players are ready and there are enough of them.
    pub fn players_are_ready(&self) -> bool {
        let ready = self.ready_players();
        ready == self.active_players_num() && ready >= self.config.min_players
    }

    /// Every seat counts, eliminated or not: a new game reactivates them all.
    pub fn is_full(&self) -> bool {
        self.all_players_num() >= self.config.max_players
    }

    /// Seats a new player at the end of the turn order.
    pub fn add_player(&mut self, id: PlayerId) -> Result<(), GameError> {
        if self.seat_of(id).is_some() {
            return Err(GameError::DuplicatePlayer(id));
        }
        if matches!(self.phase, Phase::InRound | Phase::Checked) {
            return Err(GameError::GameInProgress);
        }
        if self.is_full() {
            return Err(GameError::GameFull);
        }
        self.players.push(Player::new(id));
        info!(player = id, seat = self.players.len() - 1, "player joined");
        Ok(())
    }

    /// Removes a seat entirely. Mid-round the turn pointer follows the
    /// remaining seats, and a lone survivor wins.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), GameError> {
        let seat = self.seat_of(id).ok_or(GameError::UnknownPlayer(id))?;
        self.players.remove(seat);
        if seat < self.turn {
            self.turn -= 1;
        }
        if self.turn >= self.players.len() {
            self.turn = 0;
        }
        info!(player = id, seat, "player left");

        match self.phase {
            Phase::InRound | Phase::Checked => {
                if self.active_players_num() == 0 {
                    self.clear_round();
                    self.phase = Phase::Lobby;
                } else if self.active_players_num() == 1 {
                    self.crown_last_player();
                } else if self.phase == Phase::InRound {
                    self.skip_to_active();
                }
            }
            Phase::Lobby | Phase::GameOver => {}
        }
        Ok(())
    }

    /// Applies one wire action and returns the sender's view of the match.
    ///
    /// Malformed and illegal actions leave the match untouched and still
    /// return a snapshot.
    ///
    /// # Errors
    ///
    /// Roster and structural errors ([`GameError::UnknownPlayer`],
    /// [`GameError::DeckExhausted`], ...) are returned to the caller.
    pub fn process_action(&mut self, id: PlayerId, action: &str) -> Result<GameStatus, GameError> {
        let outcome = action
            .parse::<Action>()
            .map_err(GameError::from)
            .and_then(|a| self.apply_action(id, a));
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                debug!(player = id, action, error = %e, "action ignored");
            }
            Err(e) => {
                warn!(player = id, action, error = %e, "action failed");
                return Err(e);
            }
        }
        self.game_status(id)
    }

    /// Applies an already parsed action, reporting why it was refused.
    pub fn apply_action(&mut self, id: PlayerId, action: Action) -> Result<(), GameError> {
        let seat = self.seat_of(id).ok_or(GameError::UnknownPlayer(id))?;

        if let Action::Name(name) = action {
            self.rename(seat, &name);
            return Ok(());
        }

        match self.phase {
            Phase::GameOver => match action {
                Action::Start => {
                    self.new_game();
                    Ok(())
                }
                Action::Check | Action::Move(_) => Err(GameError::NoRoundInProgress),
                _ => Ok(()),
            },
            Phase::Lobby | Phase::Checked => {
                let player = &mut self.players[seat];
                match action {
                    Action::Start | Action::Wait if player.is_eliminated() => {
                        Err(GameError::PlayerEliminated(id))
                    }
                    Action::Start => {
                        player.set_ready(true);
                        self.start_round_if_ready()
                    }
                    Action::Wait => {
                        player.set_ready(false);
                        Ok(())
                    }
                    Action::Check | Action::Move(_) => Err(GameError::NoRoundInProgress),
                    _ => Ok(()),
                }
            }
            Phase::InRound => match action {
                Action::Check => {
                    self.ensure_may_act(seat)?;
                    if self.moves.is_empty() {
                        return Err(GameError::NothingToCheck);
                    }
                    self.resolve_check(seat);
                    Ok(())
                }
                Action::Move(hand) => {
                    self.ensure_may_act(seat)?;
                    validate_move(self.moves.last().map(|m| &m.hand), &hand)?;
                    self.declare(seat, hand);
                    Ok(())
                }
                _ => Ok(()),
            },
        }
    }

    /// Snapshot of the match as seen by `id`.
    pub fn game_status(&self, id: PlayerId) -> Result<GameStatus, GameError> {
        let seat = self.seat_of(id).ok_or(GameError::UnknownPlayer(id))?;
        let me = &self.players[seat];

        let moves = self
            .moves
            .iter()
            .map(|m| {
                let who = if m.player_id == id {
                    self_label(&m.player)
                } else {
                    m.player.clone()
                };
                (who, m.hand.to_string())
            })
            .collect();

        let players = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(i, p)| {
                let name = if i == seat {
                    self_label(p.name())
                } else {
                    p.name().to_string()
                };
                (name, p.hand_size())
            })
            .collect();

        Ok(GameStatus {
            start: self.has_started,
            lost: me.is_eliminated(),
            hand: me.hand().to_vec(),
            win: self.winner.clone(),
            moves,
            check_result: self.check_result.clone(),
            checked: if self.revealed {
                self.cards_in_use.clone()
            } else {
                Vec::new()
            },
            ready: format!(
                "Waiting for players {}/{}",
                self.ready_players(),
                self.active_players_num()
            ),
            players,
            is_turn: self.phase == Phase::InRound && me.is_active() && self.turn == seat,
            turn: self
                .players
                .get(self.turn)
                .map(|p| p.name().to_string())
                .unwrap_or_default(),
        })
    }

    /// Clears eliminations and penalty cards and returns to the lobby.
    pub fn new_game(&mut self) {
        for p in &mut self.players {
            p.reset_for_new_game();
        }
        self.clear_round();
        self.winner = None;
        self.check_result = CheckResult::default();
        self.turn = 0;
        self.phase = Phase::Lobby;
        info!(players = self.players.len(), "new game");
    }

    fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    fn ensure_may_act(&self, seat: usize) -> Result<(), GameError> {
        let player = &self.players[seat];
        if player.is_eliminated() {
            return Err(GameError::PlayerEliminated(player.id()));
        }
        if seat != self.turn {
            let expected = self.players.get(self.turn).map(|p| p.id()).unwrap_or_default();
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: player.id(),
            });
        }
        Ok(())
    }

    fn rename(&mut self, seat: usize, requested: &str) {
        let max_len = self.config.name_max_len;
        let base: String = requested.chars().take(max_len).collect();
        let taken = |candidate: &str| {
            self.players
                .iter()
                .enumerate()
                .any(|(i, p)| i != seat && p.name() == candidate)
        };

        let name = if taken(&base) {
            let named = self
                .players
                .iter()
                .enumerate()
                .filter(|(i, p)| *i != seat && !p.name().is_empty())
                .count();
            let mut suffix = named.max(1);
            loop {
                let digits = suffix.to_string();
                let keep = max_len.saturating_sub(digits.len());
                let candidate: String = base.chars().take(keep).chain(digits.chars()).collect();
                if !taken(&candidate) {
                    break candidate;
                }
                suffix += 1;
            }
        } else {
            base
        };

        debug!(seat, name = %name, "player renamed");
        self.players[seat].set_name(name);
    }

    fn start_round_if_ready(&mut self) -> Result<(), GameError> {
        if !self.players_are_ready() {
            return Ok(());
        }
        let opening = self.phase == Phase::Lobby;
        self.start_round(opening)
    }

    // Deals a fresh round. The deal is built aside and committed only once
    // every hand is complete.
    fn start_round(&mut self, opening: bool) -> Result<(), GameError> {
        let active = self.active_players_num();
        if active < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                minimum: self.config.min_players,
                active,
            });
        }

        self.deck.shuffle();
        let mut hands: Vec<Vec<Card>> = Vec::with_capacity(self.players.len());
        for p in &self.players {
            let mut hand = Vec::with_capacity(p.hand_size());
            if p.is_active() {
                for _ in 0..p.hand_size() {
                    let card = self.deck.pop_card().ok_or(GameError::DeckExhausted)?;
                    hand.push(card);
                }
            }
            hands.push(hand);
        }

        self.clear_round();
        for (p, hand) in self.players.iter_mut().zip(hands) {
            p.set_ready(false);
            for c in hand {
                self.cards_in_use.push(c);
                p.give_card(c);
            }
        }

        if opening {
            let seats: Vec<usize> = self.active_seats().collect();
            self.turn = seats[self.rng.random_range(0..seats.len())];
        }
        self.skip_to_active();
        self.has_started = true;
        self.phase = Phase::InRound;
        self.round += 1;
        info!(
            round = self.round,
            players = active,
            cards = self.cards_in_use.len(),
            turn = self.turn,
            "round started"
        );
        Ok(())
    }

    fn clear_round(&mut self) {
        self.cards_in_use.clear();
        self.moves.clear();
        self.has_started = false;
        self.revealed = false;
        for p in &mut self.players {
            p.clear_cards();
        }
    }

    fn declare(&mut self, seat: usize, hand: Hand) {
        let player = &self.players[seat];
        debug!(round = self.round, player = player.id(), hand = %hand, "move declared");
        self.moves.push(MoveRecord {
            player_id: player.id(),
            player: player.name().to_string(),
            hand,
        });
        self.next_turn();
    }

    fn resolve_check(&mut self, checker: usize) {
        let n = self.players.len();
        let accused = (1..n)
            .map(|i| (self.turn + n - i) % n)
            .find(|&s| self.players[s].is_active())
            .unwrap_or(checker);

        let claim = match self.moves.last() {
            Some(m) => m.hand,
            None => return,
        };
        let holds = claim_holds(&self.cards_in_use, &claim);
        let penalized = if holds { checker } else { accused };

        self.players[penalized].add_penalty_card();
        let eliminated = self.players[penalized].hand_size() >= self.config.max_cards;
        self.check_result = CheckResult {
            checker: self.players[checker].name().to_string(),
            accused: self.players[accused].name().to_string(),
            penalized: self.players[penalized].name().to_string(),
            eliminated,
        };
        info!(
            round = self.round,
            claim = %claim,
            holds,
            checker = self.players[checker].id(),
            accused = self.players[accused].id(),
            penalized = self.players[penalized].id(),
            "check resolved"
        );

        self.turn = penalized;
        self.revealed = true;
        self.phase = Phase::Checked;
        if eliminated {
            self.players[penalized].eliminate();
            info!(player = self.players[penalized].id(), "player eliminated");
            self.next_turn();
        }

        let record = RoundRecord {
            id: None,
            round: self.round,
            seed: Some(self.seed),
            moves: self.moves.clone(),
            pool: self.cards_in_use.clone(),
            check: self.check_result.clone(),
            winner: self.winner.clone(),
            ts: None,
        };
        self.last_round = Some(self.log_round(record));
    }

    // A failed history write never blocks the match.
    fn log_round(&mut self, record: RoundRecord) -> RoundRecord {
        let Some(log) = self.round_log.as_mut() else {
            return record;
        };
        match log.write(&record) {
            Ok(written) => written,
            Err(e) => {
                warn!(round = record.round, error = %e, "round log write failed");
                record
            }
        }
    }

    fn active_seats(&self) -> impl Iterator<Item = usize> + '_ {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(i, _)| i)
    }

    /// Advances to the next active seat, or crowns the winner when only one
    /// active player is left.
    fn next_turn(&mut self) {
        match self.active_players_num() {
            0 => {}
            1 => self.crown_last_player(),
            _ => {
                let n = self.players.len();
                loop {
                    self.turn = (self.turn + 1) % n;
                    if self.players[self.turn].is_active() {
                        break;
                    }
                }
            }
        }
    }

    fn skip_to_active(&mut self) {
        if self.players.get(self.turn).is_some_and(|p| p.is_active()) {
            return;
        }
        if self.active_players_num() > 0 {
            self.next_turn();
        }
    }

    fn crown_last_player(&mut self) {
        let survivor = self.active_seats().next();
        if let Some(seat) = survivor {
            let name = self.players[seat].name().to_string();
            info!(player = self.players[seat].id(), name = %name, "game won");
            self.turn = seat;
            self.winner = Some(name);
            self.phase = Phase::GameOver;
        }
    }
}
