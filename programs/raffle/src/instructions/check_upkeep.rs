use anchor_lang::prelude::*;

use crate::constants::SEED_RAFFLE;
use crate::state::Raffle;

/// Read-only view of the raffle for the eligibility query.
#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [SEED_RAFFLE],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,
}

/// Reports whether a draw may be initiated right now. Has no side effects;
/// the trigger caller polls this and cranks `perform_upkeep` when it returns
/// true. Each failed condition is logged for observability.
pub fn process_check_upkeep(ctx: Context<CheckUpkeep>) -> Result<bool> {
    let clock = Clock::get()?;
    let check = ctx.accounts.raffle.check_upkeep(clock.unix_timestamp);

    if !check.is_open {
        msg!("Upkeep blocked: raffle is not open");
    }
    if !check.interval_elapsed {
        msg!("Upkeep blocked: interval has not elapsed");
    }
    if !check.has_balance {
        msg!("Upkeep blocked: pot is empty");
    }
    if !check.has_players {
        msg!("Upkeep blocked: no players");
    }

    Ok(check.upkeep_needed())
}
