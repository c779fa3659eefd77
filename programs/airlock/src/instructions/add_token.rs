use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use crate::{
    constants::*,
    error::AirlockError,
    events::TokenAdded,
    state::{Airlock, PairInfo, Pool, RewardPool},
};

/// Whitelist an asset for deposits. Authority only.
/// The asset's pool must already exist with non-zero reserves and the reward
/// pool must be bound to that pool.
pub fn handler(ctx: Context<AddToken>) -> Result<()> {
    require!(
        ctx.accounts.pool.lp_supply > 0,
        AirlockError::PairNotFound
    );

    let pair = &mut ctx.accounts.pair;
    pair.asset_mint = ctx.accounts.asset_mint.key();
    pair.pool = ctx.accounts.pool.key();
    pair.reward_pool = ctx.accounts.reward_pool.key();
    pair.lp_staked = 0;
    pair.reward = 0;
    pair.acc_armor_per_lp = 0;
    pair.bump = ctx.bumps.pair;

    emit!(TokenAdded {
        token: pair.asset_mint,
        pair: pair.pool,
        reward_pool: pair.reward_pool,
    });
    msg!("Token added: {}", pair.asset_mint);
    Ok(())
}

#[derive(Accounts)]
pub struct AddToken<'info> {
    #[account(
        mut,
        constraint = authority.key() == airlock.authority @ AirlockError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(seeds = [AIRLOCK_SEED], bump = airlock.bump)]
    pub airlock: Account<'info, Airlock>,

    pub asset_mint: Account<'info, Mint>,

    // Missing pool account surfaces as "pair does not exist"
    #[account(
        seeds = [POOL_SEED, asset_mint.key().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        constraint = reward_pool.pool == pool.key() @ AirlockError::InvalidRewardPool,
    )]
    pub reward_pool: Account<'info, RewardPool>,

    #[account(
        init,
        payer = authority,
        space = PairInfo::LEN,
        seeds = [PAIR_SEED, asset_mint.key().as_ref()],
        bump,
    )]
    pub pair: Account<'info, PairInfo>,

    pub system_program: Program<'info, System>,
}
