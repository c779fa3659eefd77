#![allow(ambiguous_glob_reexports)]

pub mod add_token;
pub mod allocation;
pub mod claim_lp;
pub mod claim_reward;
pub mod deposit;
pub mod flush_to_treasury;
pub mod fund_reward;
pub mod initialize;
pub mod initialize_pool;
pub mod initialize_reward_pool;

pub use add_token::*;
pub use allocation::*;
pub use claim_lp::*;
pub use claim_reward::*;
pub use deposit::*;
pub use flush_to_treasury::*;
pub use fund_reward::*;
pub use initialize::*;
pub use initialize_pool::*;
pub use initialize_reward_pool::*;
