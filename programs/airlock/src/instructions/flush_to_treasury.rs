use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, error::AirlockError, state::Airlock};

/// Withdraw spendable ARMOR from the airlock. Authority only.
/// Cannot touch harvested-but-undistributed reward.
pub fn handler(ctx: Context<FlushToTreasury>, amount: u64) -> Result<()> {
    require!(amount > 0, AirlockError::ZeroAmount);
    let spendable = ctx
        .accounts
        .armor_vault
        .amount
        .saturating_sub(ctx.accounts.airlock.undistributed_reward);
    require!(spendable >= amount, AirlockError::InsufficientArmor);

    let bump = ctx.accounts.airlock.vault_authority_bump;
    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, &[bump]];
    let signer = &[seeds];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.armor_vault.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer,
        ),
        amount,
    )?;

    msg!("Flushed {} ARMOR to {}", amount, ctx.accounts.destination.key());
    Ok(())
}

#[derive(Accounts)]
pub struct FlushToTreasury<'info> {
    #[account(
        constraint = authority.key() == airlock.authority @ AirlockError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(seeds = [AIRLOCK_SEED], bump = airlock.bump)]
    pub airlock: Account<'info, Airlock>,

    /// CHECK: PDA treasury authority
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump = airlock.vault_authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = armor_vault.key() == airlock.armor_vault @ AirlockError::MintMismatch,
    )]
    pub armor_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = destination.mint == airlock.armor_mint @ AirlockError::MintMismatch,
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
