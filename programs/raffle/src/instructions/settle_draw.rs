use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::SEED_RAFFLE;
use crate::error::RaffleError;
use crate::events::WinnerPicked;
use crate::state::{Raffle, RaffleState};

/// Accounts required to settle an outstanding draw.
#[derive(Accounts)]
pub struct SettleDraw<'info> {
    /// The account paying transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account.
    #[account(
        mut,
        seeds = [SEED_RAFFLE],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// The randomness account committed by `perform_upkeep`.
    /// CHECK: Must match the recorded correlation identifier; validated in
    /// the handler.
    pub randomness_account: UncheckedAccount<'info>,

    /// The player selected by the revealed random value.
    /// CHECK: Validated against the ledger lookup in the handler.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Settles the outstanding draw: validates the correlation identifier,
/// reads the revealed random value, selects the winner from the live
/// ledger, pays out the whole pot, and reopens the round.
///
/// Replayed, stale, or foreign randomness accounts are rejected with no
/// state change. The pot moves before any state is reset; a failed
/// transfer aborts the transaction and leaves the round Calculating so the
/// draw stays visible and can be settled again.
pub fn process_settle_draw(ctx: Context<SettleDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;

    require!(
        raffle.raffle_state == RaffleState::Calculating,
        RaffleError::IncorrectRandomnessAccount
    );
    if ctx.accounts.randomness_account.key() != raffle.randomness_account {
        msg!(
            "Rejecting fulfillment for unknown request {}",
            ctx.accounts.randomness_account.key()
        );
        return Err(RaffleError::IncorrectRandomnessAccount.into());
    }

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account.data.borrow())
            .map_err(|_| RaffleError::InvalidRandomnessAccount)?;
    let revealed = randomness_data
        .get_value(&clock)
        .map_err(|_| RaffleError::RandomnessNotResolved)?;

    let mut raw = [0u8; 8];
    raw.copy_from_slice(&revealed[..8]);
    let random_value = u64::from_le_bytes(raw);

    let winner = raffle.select_winner(random_value)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        winner,
        RaffleError::WinnerAccountMismatch
    );

    let amount = raffle.pot_amount;
    msg!("Winner: {} receives {} lamports", winner, amount);

    let raffle_info = raffle.to_account_info();
    let winner_info = ctx.accounts.winner.to_account_info();
    **raffle_info.try_borrow_mut_lamports()? = raffle_info
        .lamports()
        .checked_sub(amount)
        .ok_or(RaffleError::TransferFailed)?;
    **winner_info.try_borrow_mut_lamports()? = winner_info
        .lamports()
        .checked_add(amount)
        .ok_or(RaffleError::TransferFailed)?;

    raffle.reset(winner, clock.unix_timestamp);

    emit!(WinnerPicked { winner, amount });

    Ok(())
}
