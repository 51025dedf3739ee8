use anchor_lang::prelude::*;

use crate::constants::MAX_PLAYERS;
use crate::error::RaffleError;

/// Lifecycle of a raffle round. Entries are only accepted while `Open`;
/// `Calculating` marks the window between a randomness request and its
/// fulfillment, during which at most one draw can be outstanding.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug)]
pub enum RaffleState {
    Open,
    Calculating,
}

/// Per-condition result of the eligibility evaluation, so callers can see
/// exactly which requirement blocked a draw.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UpkeepCheck {
    pub is_open: bool,
    pub interval_elapsed: bool,
    pub has_balance: bool,
    pub has_players: bool,
}

impl UpkeepCheck {
    /// A draw may be initiated only when all four conditions hold.
    pub fn upkeep_needed(&self) -> bool {
        self.is_open && self.interval_elapsed && self.has_balance && self.has_players
    }
}

#[account]
#[derive(InitSpace)]
pub struct Raffle {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The account that initialized the raffle.
    pub authority: Pubkey,

    /// The minimum amount (in lamports) a player must send to enter.
    pub entrance_fee: u64,

    /// The minimum number of seconds between draws.
    pub interval: i64,

    /// The program expected to own committed randomness accounts.
    pub switchboard_program: Pubkey,

    /// The oracle queue the randomness accounts are billed against.
    /// Opaque to this program; exposed for clients and off-chain tooling.
    pub oracle_queue: Pubkey,

    /// Current phase of the round.
    pub raffle_state: RaffleState,

    /// The UNIX timestamp of the last reset (initialization or payout).
    pub last_draw_timestamp: i64,

    /// The total amount of SOL (in lamports) accumulated in the pot since
    /// the last reset. Must equal the sum of accepted entry amounts exactly,
    /// since this is what the winner is paid.
    pub pot_amount: u64,

    /// Correlation identifier of the outstanding draw: the key of the
    /// randomness account committed by `perform_upkeep`. `Pubkey::default()`
    /// while no draw is in flight.
    pub randomness_account: Pubkey,

    /// The winner of the most recent completed draw.
    pub recent_winner: Pubkey,

    /// Ordered entry ledger. An address appears once per accepted entry, so
    /// a player's win probability is proportional to their entry count.
    #[max_len(MAX_PLAYERS)]
    pub players: Vec<Pubkey>,
}

impl Raffle {
    /// Evaluates draw eligibility against the ledger and the given clock
    /// reading. Pure; safe to call arbitrarily often.
    pub fn check_upkeep(&self, now: i64) -> UpkeepCheck {
        UpkeepCheck {
            is_open: self.raffle_state == RaffleState::Open,
            interval_elapsed: now.saturating_sub(self.last_draw_timestamp) >= self.interval,
            has_balance: self.pot_amount > 0,
            has_players: !self.players.is_empty(),
        }
    }

    /// Records a paid entry in the ledger. The lamport transfer itself is a
    /// CPI in the instruction handler; this does the bookkeeping and all of
    /// the rejection checks. Nothing is mutated on failure.
    pub fn register_entry(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(
            self.raffle_state == RaffleState::Open,
            RaffleError::RaffleNotOpen
        );
        require!(
            amount >= self.entrance_fee,
            RaffleError::InsufficientEntranceFee
        );
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);

        self.pot_amount = self
            .pot_amount
            .checked_add(amount)
            .ok_or(RaffleError::MathOverflow)?;
        self.players.push(player);
        Ok(())
    }

    /// Transitions Open -> Calculating and records the correlation
    /// identifier of the randomness request. Rejected without any state
    /// change when the round is not eligible, so the trigger caller may
    /// invoke this speculatively.
    pub fn commit_draw(&mut self, randomness_account: Pubkey, now: i64) -> Result<()> {
        require!(
            self.check_upkeep(now).upkeep_needed(),
            RaffleError::UpkeepNotNeeded
        );
        self.raffle_state = RaffleState::Calculating;
        self.randomness_account = randomness_account;
        Ok(())
    }

    /// Maps a revealed random value onto the live ledger. Entry is blocked
    /// while Calculating, so the ledger cannot change between request and
    /// fulfillment, but the lookup still reads it live rather than a
    /// snapshot taken at request time.
    pub fn select_winner(&self, random_value: u64) -> Result<Pubkey> {
        let count = self.players.len() as u64;
        let index = random_value
            .checked_rem(count)
            .ok_or(RaffleError::NoPlayers)?;
        Ok(self.players[index as usize])
    }

    /// Reinitializes the round after a completed payout. Callers must have
    /// transferred the pot already; this clears the ledger, the correlation
    /// identifier, and reopens entry.
    pub fn reset(&mut self, winner: Pubkey, now: i64) {
        self.players.clear();
        self.pot_amount = 0;
        self.randomness_account = Pubkey::default();
        self.recent_winner = winner;
        self.last_draw_timestamp = now;
        self.raffle_state = RaffleState::Open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use solana_program::native_token::LAMPORTS_PER_SOL;

    const FEE: u64 = 100;
    const INTERVAL: i64 = 30;

    fn open_raffle() -> Raffle {
        Raffle {
            bump: 255,
            authority: Pubkey::new_unique(),
            entrance_fee: FEE,
            interval: INTERVAL,
            switchboard_program: Pubkey::new_unique(),
            oracle_queue: Pubkey::new_unique(),
            raffle_state: RaffleState::Open,
            last_draw_timestamp: 0,
            pot_amount: 0,
            randomness_account: Pubkey::default(),
            recent_winner: Pubkey::default(),
            players: Vec::new(),
        }
    }

    #[test]
    fn entries_accumulate_pot_and_ledger() {
        let mut raffle = open_raffle();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        raffle.register_entry(a, FEE).unwrap();
        raffle.register_entry(b, FEE + 50).unwrap();
        raffle.register_entry(a, FEE).unwrap();

        assert_eq!(raffle.pot_amount, 3 * FEE + 50);
        assert_eq!(raffle.players, vec![a, b, a]);
    }

    #[test]
    fn entry_rejected_below_fee() {
        let mut raffle = open_raffle();
        let err = raffle
            .register_entry(Pubkey::new_unique(), FEE - 1)
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::InsufficientEntranceFee));
        assert_eq!(raffle.pot_amount, 0);
        assert!(raffle.players.is_empty());
    }

    #[test]
    fn entry_rejected_while_calculating() {
        let mut raffle = open_raffle();
        raffle.register_entry(Pubkey::new_unique(), FEE).unwrap();
        raffle
            .commit_draw(Pubkey::new_unique(), INTERVAL + 1)
            .unwrap();

        let err = raffle
            .register_entry(Pubkey::new_unique(), FEE)
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::RaffleNotOpen));
        assert_eq!(raffle.pot_amount, FEE);
        assert_eq!(raffle.players.len(), 1);
    }

    #[test]
    fn entry_rejected_at_capacity() {
        let mut raffle = open_raffle();
        let player = Pubkey::new_unique();
        for _ in 0..MAX_PLAYERS {
            raffle.register_entry(player, FEE).unwrap();
        }

        let err = raffle.register_entry(player, FEE).unwrap_err();

        assert_eq!(err, Error::from(RaffleError::RaffleFull));
        assert_eq!(raffle.players.len(), MAX_PLAYERS);
        assert_eq!(raffle.pot_amount, FEE * MAX_PLAYERS as u64);
    }

    #[test]
    fn entry_rejected_on_pot_overflow() {
        let mut raffle = open_raffle();
        raffle.pot_amount = u64::MAX - FEE + 1;

        let err = raffle.register_entry(Pubkey::new_unique(), FEE).unwrap_err();

        assert_eq!(err, Error::from(RaffleError::MathOverflow));
        assert!(raffle.players.is_empty());
        assert_eq!(raffle.pot_amount, u64::MAX - FEE + 1);
    }

    #[test]
    fn upkeep_is_the_exact_conjunction() {
        let mut raffle = open_raffle();
        raffle.register_entry(Pubkey::new_unique(), FEE).unwrap();
        let now = INTERVAL + 1;

        assert!(raffle.check_upkeep(now).upkeep_needed());

        // No balance / no players.
        let empty = open_raffle();
        let check = empty.check_upkeep(now);
        assert!(!check.has_balance);
        assert!(!check.has_players);
        assert!(check.is_open);
        assert!(check.interval_elapsed);
        assert!(!check.upkeep_needed());

        // Interval not yet elapsed.
        let check = raffle.check_upkeep(INTERVAL - 1);
        assert!(!check.interval_elapsed);
        assert!(!check.upkeep_needed());

        // Not open.
        raffle.raffle_state = RaffleState::Calculating;
        let check = raffle.check_upkeep(now);
        assert!(!check.is_open);
        assert!(!check.upkeep_needed());
    }

    #[test]
    fn upkeep_interval_boundary_is_inclusive() {
        let mut raffle = open_raffle();
        raffle.register_entry(Pubkey::new_unique(), FEE).unwrap();

        assert!(raffle.check_upkeep(INTERVAL).upkeep_needed());
        assert!(!raffle.check_upkeep(INTERVAL - 1).upkeep_needed());
    }

    #[test]
    fn commit_records_correlation_and_flips_state() {
        let mut raffle = open_raffle();
        raffle.register_entry(Pubkey::new_unique(), FEE).unwrap();
        let randomness = Pubkey::new_unique();

        raffle.commit_draw(randomness, INTERVAL).unwrap();

        assert_eq!(raffle.raffle_state, RaffleState::Calculating);
        assert_eq!(raffle.randomness_account, randomness);
    }

    #[test]
    fn commit_rejected_when_ineligible() {
        let mut raffle = open_raffle();

        let err = raffle
            .commit_draw(Pubkey::new_unique(), INTERVAL)
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::UpkeepNotNeeded));
        assert_eq!(raffle.raffle_state, RaffleState::Open);
        assert_eq!(raffle.randomness_account, Pubkey::default());
    }

    #[test]
    fn second_commit_rejected_while_calculating() {
        let mut raffle = open_raffle();
        raffle.register_entry(Pubkey::new_unique(), FEE).unwrap();
        let first = Pubkey::new_unique();
        raffle.commit_draw(first, INTERVAL).unwrap();

        let err = raffle
            .commit_draw(Pubkey::new_unique(), INTERVAL * 2)
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::UpkeepNotNeeded));
        assert_eq!(raffle.raffle_state, RaffleState::Calculating);
        assert_eq!(raffle.randomness_account, first);
    }

    #[test]
    fn winner_is_random_value_mod_player_count() {
        let mut raffle = open_raffle();
        let players: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        for p in &players {
            raffle.register_entry(*p, FEE).unwrap();
        }

        // 17 % 4 == 1
        assert_eq!(raffle.select_winner(17).unwrap(), players[1]);
        // 42 % 4 == 2
        assert_eq!(raffle.select_winner(42).unwrap(), players[2]);
    }

    #[test]
    fn single_player_always_wins() {
        let mut raffle = open_raffle();
        let only = Pubkey::new_unique();
        raffle.register_entry(only, FEE).unwrap();

        assert_eq!(raffle.select_winner(42).unwrap(), only);
        assert_eq!(raffle.select_winner(0).unwrap(), only);
        assert_eq!(raffle.select_winner(u64::MAX).unwrap(), only);
    }

    #[test]
    fn winner_lookup_reads_the_live_ledger() {
        let mut raffle = open_raffle();
        let a = Pubkey::new_unique();
        raffle.register_entry(a, FEE).unwrap();
        assert_eq!(raffle.select_winner(5).unwrap(), a);

        let b = Pubkey::new_unique();
        raffle.register_entry(b, FEE).unwrap();
        assert_eq!(raffle.select_winner(5).unwrap(), b);
    }

    #[test]
    fn empty_ledger_selection_is_rejected() {
        let raffle = open_raffle();
        assert_eq!(
            raffle.select_winner(7).unwrap_err(),
            Error::from(RaffleError::NoPlayers)
        );
    }

    #[test]
    fn reset_reopens_with_an_empty_ledger() {
        let mut raffle = open_raffle();
        raffle.register_entry(Pubkey::new_unique(), FEE).unwrap();
        let randomness = Pubkey::new_unique();
        raffle.commit_draw(randomness, INTERVAL).unwrap();
        let winner = raffle.players[0];

        raffle.reset(winner, INTERVAL + 5);

        assert!(raffle.players.is_empty());
        assert_eq!(raffle.pot_amount, 0);
        assert_eq!(raffle.randomness_account, Pubkey::default());
        assert_eq!(raffle.recent_winner, winner);
        assert_eq!(raffle.last_draw_timestamp, INTERVAL + 5);
        assert_eq!(raffle.raffle_state, RaffleState::Open);
    }

    #[test]
    fn full_round_with_one_player() {
        let mut raffle = open_raffle();
        let a = Pubkey::new_unique();
        raffle.register_entry(a, FEE).unwrap();
        assert_eq!(raffle.pot_amount, FEE);
        assert_eq!(raffle.players, vec![a]);

        let randomness = Pubkey::new_unique();
        raffle.commit_draw(randomness, INTERVAL + 1).unwrap();
        assert_eq!(raffle.raffle_state, RaffleState::Calculating);

        // 42 % 1 == 0
        let winner = raffle.select_winner(42).unwrap();
        assert_eq!(winner, a);

        raffle.reset(winner, INTERVAL + 2);
        assert_eq!(raffle.recent_winner, a);
        assert_eq!(raffle.raffle_state, RaffleState::Open);
        assert!(raffle.players.is_empty());

        // The next round starts from a clean ledger and a fresh timer.
        assert!(!raffle.check_upkeep(INTERVAL + 2).upkeep_needed());
    }

    #[test]
    fn pot_tracks_large_entry_amounts_exactly() {
        let mut raffle = open_raffle();
        raffle.entrance_fee = LAMPORTS_PER_SOL / 10;

        raffle
            .register_entry(Pubkey::new_unique(), LAMPORTS_PER_SOL / 10)
            .unwrap();
        raffle
            .register_entry(Pubkey::new_unique(), LAMPORTS_PER_SOL)
            .unwrap();

        assert_eq!(raffle.pot_amount, LAMPORTS_PER_SOL + LAMPORTS_PER_SOL / 10);
    }
}
