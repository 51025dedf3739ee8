use anchor_lang::prelude::*;

/// Emitted once per accepted entry. The ledger itself lives on the raffle
/// account; the event stream lets an off-chain indexer rebuild entry history.
#[event]
pub struct RaffleEntered {
    pub player: Pubkey,
    pub amount: u64,
}

/// Emitted when a draw is committed to a randomness account. The account key
/// is the correlation identifier the fulfillment must present.
#[event]
pub struct DrawRequested {
    pub randomness_account: Pubkey,
}

/// Emitted after the pot has been paid out and the ledger reset.
#[event]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub amount: u64,
}
