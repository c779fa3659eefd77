use anchor_lang::prelude::*;

// Audit log. LpQueued is the canonical record for reconstructing
// batch state off-chain.

#[event]
pub struct TokenAdded {
    pub token: Pubkey,
    pub pair: Pubkey,
    pub reward_pool: Pubkey,
}

#[event]
pub struct LpQueued {
    pub holder: Pubkey,
    pub pair: Pubkey,
    pub lp_amount: u64,
    pub token_amount: u64,
    pub armor_amount: u64,
    pub maturity: i64,
}

#[event]
pub struct LpClaimed {
    pub holder: Pubkey,
    pub pair: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardClaimed {
    pub holder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ArmorAllocationIncreased {
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ArmorAllocationDecreased {
    pub user: Pubkey,
    pub amount: u64,
}
