use anchor_lang::prelude::*;

#[constant]
pub const SEED_RAFFLE: &[u8] = b"raffle";

/// Upper bound on ledger entries per round. Keeps the raffle account within
/// the runtime's single-allocation limit (32 bytes per entry).
pub const MAX_PLAYERS: usize = 300;
