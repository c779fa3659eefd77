use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::{constants::*, error::AirlockError, state::{Airlock, Pool, RewardPool}};

/// Create the reward pool bound to a liquidity pool. Yield arrives as ARMOR
/// via fund_reward; the airlock harvests it lazily during settlement.
pub fn handler(ctx: Context<InitializeRewardPool>) -> Result<()> {
    let reward_pool = &mut ctx.accounts.reward_pool;
    reward_pool.pool = ctx.accounts.pool.key();
    reward_pool.reward_vault = ctx.accounts.reward_vault.key();
    reward_pool.staked = 0;
    reward_pool.unharvested = 0;
    reward_pool.authority_bump = ctx.bumps.reward_authority;
    reward_pool.bump = ctx.bumps.reward_pool;

    msg!("Reward pool created for pool {}", ctx.accounts.pool.key());
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRewardPool<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(seeds = [AIRLOCK_SEED], bump = airlock.bump)]
    pub airlock: Account<'info, Airlock>,

    pub pool: Account<'info, Pool>,

    #[account(constraint = armor_mint.key() == airlock.armor_mint @ AirlockError::MintMismatch)]
    pub armor_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        space = RewardPool::LEN,
        seeds = [REWARD_POOL_SEED, pool.key().as_ref()],
        bump,
    )]
    pub reward_pool: Account<'info, RewardPool>,

    /// CHECK: PDA reward authority — owns the reward vault, holds no data
    #[account(
        seeds = [REWARD_AUTHORITY_SEED, pool.key().as_ref()],
        bump,
    )]
    pub reward_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        token::mint = armor_mint,
        token::authority = reward_authority,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
