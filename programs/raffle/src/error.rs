use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    #[msg("Raffle is not open")]
    RaffleNotOpen,
    #[msg("Amount sent is below the entrance fee")]
    InsufficientEntranceFee,
    #[msg("Player list is at capacity")]
    RaffleFull,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Invalid randomness account")]
    InvalidRandomnessAccount,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Incorrect randomness account")]
    IncorrectRandomnessAccount,
    #[msg("Randomness not resolved")]
    RandomnessNotResolved,
    #[msg("No players in the raffle")]
    NoPlayers,
    #[msg("Winner account does not match the drawn player")]
    WinnerAccountMismatch,
    #[msg("Prize transfer failed")]
    TransferFailed,
    #[msg("Math overflow")]
    MathOverflow,
}
