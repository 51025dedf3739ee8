use anchor_lang::prelude::*;

use crate::constants::SEED_RAFFLE;
use crate::state::{Raffle, RaffleState};

/// Accounts required to initialize the raffle configuration.
/// This sets up the single raffle account on-chain with its immutable
/// parameters.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account holding configuration and the ledger.
    #[account(
        init,
        payer = payer,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [SEED_RAFFLE],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Initializes the raffle with its entrance fee, draw interval, and the
/// identity of the randomness provider. The round starts Open with an empty
/// ledger and the draw timer running from now.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeConfig accounts
/// * `entrance_fee` - Minimum entry amount in lamports
/// * `interval` - Minimum seconds between draws
/// * `switchboard_program` - Expected owner of committed randomness accounts
/// * `oracle_queue` - Queue the randomness accounts are billed against
pub fn process_initialize_config(
    ctx: Context<InitializeConfig>,
    entrance_fee: u64,
    interval: i64,
    switchboard_program: Pubkey,
    oracle_queue: Pubkey,
) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;

    raffle.bump = ctx.bumps.raffle;
    raffle.authority = ctx.accounts.payer.key();
    raffle.entrance_fee = entrance_fee;
    raffle.interval = interval;
    raffle.switchboard_program = switchboard_program;
    raffle.oracle_queue = oracle_queue;
    raffle.raffle_state = RaffleState::Open;
    raffle.last_draw_timestamp = clock.unix_timestamp;
    raffle.pot_amount = 0;
    raffle.randomness_account = Pubkey::default();
    raffle.recent_winner = Pubkey::default();
    raffle.players = Vec::new();

    Ok(())
}
