use anchor_lang::prelude::*;
use instructions::*;

mod constants;
mod error;
mod events;
mod instructions;
mod state;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod raffle {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        entrance_fee: u64,
        interval: i64,
        switchboard_program: Pubkey,
        oracle_queue: Pubkey,
    ) -> Result<()> {
        process_initialize_config(ctx, entrance_fee, interval, switchboard_program, oracle_queue)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        process_enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<bool> {
        process_check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        process_perform_upkeep(ctx)
    }

    pub fn settle_draw(ctx: Context<SettleDraw>) -> Result<()> {
        process_settle_draw(ctx)
    }
}
