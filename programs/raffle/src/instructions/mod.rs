pub mod check_upkeep;
pub mod enter_raffle;
pub mod initialize_config;
pub mod perform_upkeep;
pub mod settle_draw;

pub use check_upkeep::*;
pub use enter_raffle::*;
pub use initialize_config::*;
pub use perform_upkeep::*;
pub use settle_draw::*;
