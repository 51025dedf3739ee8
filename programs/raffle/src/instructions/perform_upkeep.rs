use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::SEED_RAFFLE;
use crate::error::RaffleError;
use crate::events::DrawRequested;
use crate::state::Raffle;

/// Accounts required to initiate a draw. Permissionless: the trigger caller
/// is untrusted automation, so eligibility is re-checked here rather than
/// gated on an authority.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
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

    /// Freshly seeded randomness account from Switchboard. Its key becomes
    /// the correlation identifier the fulfillment must present.
    /// CHECK: Ownership and seed freshness are validated in the handler.
    pub randomness_account: UncheckedAccount<'info>,
}

/// Initiates a draw when the round is eligible.
///
/// Rejected with `UpkeepNotNeeded` and no state change otherwise, so the
/// trigger caller may invoke this speculatively and repeatedly. On success
/// the round flips to Calculating and the randomness account key is
/// recorded as the outstanding correlation identifier; entry and further
/// draws are blocked until `settle_draw` resolves it.
pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;

    let check = raffle.check_upkeep(clock.unix_timestamp);
    if !check.upkeep_needed() {
        msg!(
            "Upkeep not needed: state={:?} pot={} players={} interval_elapsed={}",
            raffle.raffle_state,
            raffle.pot_amount,
            raffle.players.len(),
            check.interval_elapsed
        );
        return Err(RaffleError::UpkeepNotNeeded.into());
    }

    if ctx.accounts.randomness_account.owner != &raffle.switchboard_program {
        return Err(RaffleError::InvalidRandomnessAccount.into());
    }

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account.data.borrow())
            .map_err(|_| RaffleError::InvalidRandomnessAccount)?;

    // A randomness account seeded before the previous slot has already had
    // a chance to be revealed; committing to it would let the caller pick a
    // known value.
    if randomness_data.seed_slot != clock.slot - 1 {
        return Err(RaffleError::RandomnessAlreadyRevealed.into());
    }

    raffle.commit_draw(ctx.accounts.randomness_account.key(), clock.unix_timestamp)?;

    emit!(DrawRequested {
        randomness_account: ctx.accounts.randomness_account.key(),
    });

    Ok(())
}
