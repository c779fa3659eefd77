use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::{constants::*, error::AirlockError, state::Airlock};

/// Create the airlock configuration and its ARMOR treasury vault.
/// lock_period and vesting_period are immutable after this call.
pub fn handler(ctx: Context<Initialize>, lock_period: i64, vesting_period: i64) -> Result<()> {
    require!(lock_period > 0 && vesting_period > 0, AirlockError::InvalidPeriod);

    let airlock = &mut ctx.accounts.airlock;
    airlock.authority = ctx.accounts.authority.key();
    airlock.armor_mint = ctx.accounts.armor_mint.key();
    airlock.armor_vault = ctx.accounts.armor_vault.key();
    airlock.vault_authority_bump = ctx.bumps.vault_authority;
    airlock.lock_period = lock_period;
    airlock.vesting_period = vesting_period;
    airlock.undistributed_reward = 0;
    airlock.bump = ctx.bumps.airlock;

    msg!(
        "Airlock initialized: lock_period={}s vesting_period={}s",
        lock_period,
        vesting_period
    );
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    pub armor_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = Airlock::LEN,
        seeds = [AIRLOCK_SEED],
        bump,
    )]
    pub airlock: Account<'info, Airlock>,

    /// CHECK: PDA treasury authority — owns the ARMOR vault, holds no data
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        token::mint = armor_mint,
        token::authority = vault_authority,
    )]
    pub armor_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
