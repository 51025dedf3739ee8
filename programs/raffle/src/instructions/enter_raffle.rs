use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::SEED_RAFFLE;
use crate::events::RaffleEntered;
use crate::state::Raffle;

/// Accounts required to enter the raffle.
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The player entering the raffle; pays the entrance fee.
    #[account(mut)]
    pub player: Signer<'info>,

    /// The raffle account receiving the entry and holding the pot.
    #[account(
        mut,
        seeds = [SEED_RAFFLE],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// System program for the lamport transfer.
    pub system_program: Program<'info, System>,
}

/// Enters the caller into the current round.
///
/// Steps performed:
/// 1. Validate the round is open and the amount covers the entrance fee.
/// 2. Append the player to the ledger and grow the pot by `amount` exactly.
/// 3. Transfer `amount` lamports from the player to the raffle account.
///
/// Any failure aborts the transaction, so a rejected entry never moves
/// funds or touches the ledger.
///
/// # Arguments
/// * `ctx` - Context containing EnterRaffle accounts
/// * `amount` - Lamports sent with the entry; must be >= the entrance fee
pub fn process_enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    ctx.accounts
        .raffle
        .register_entry(ctx.accounts.player.key(), amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.raffle.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(RaffleEntered {
        player: ctx.accounts.player.key(),
        amount,
    });

    Ok(())
}
