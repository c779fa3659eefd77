use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::AirlockError,
    events::{ArmorAllocationDecreased, ArmorAllocationIncreased},
    state::{Airlock, Allocation},
};

// Owner-gated allocation ledger. Credits are backed 1:1 by ARMOR moved into
// the treasury vault; decreasing moves it back out.

pub fn increase_handler(ctx: Context<IncreaseAllocation>, amount: u64) -> Result<()> {
    require!(amount > 0, AirlockError::ZeroAmount);

    let allocation = &mut ctx.accounts.allocation;
    if allocation.amount == 0 && allocation.batch_count == 0 {
        allocation.user = ctx.accounts.user.key();
        allocation.bump = ctx.bumps.allocation;
    }
    allocation.amount = allocation
        .amount
        .checked_add(amount)
        .ok_or(AirlockError::MathOverflow)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.authority_armor.to_account_info(),
                to: ctx.accounts.armor_vault.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(ArmorAllocationIncreased {
        user: ctx.accounts.user.key(),
        amount,
    });
    msg!("Allocation increased: user={} amount={}", ctx.accounts.user.key(), amount);
    Ok(())
}

pub fn decrease_handler(ctx: Context<DecreaseAllocation>, amount: u64) -> Result<()> {
    require!(amount > 0, AirlockError::ZeroAmount);
    require!(
        ctx.accounts.allocation.amount >= amount,
        AirlockError::InsufficientAllocation
    );
    // Undistributed reward in the vault is owed to stakers, never to the ledger
    let spendable = ctx
        .accounts
        .armor_vault
        .amount
        .saturating_sub(ctx.accounts.airlock.undistributed_reward);
    require!(spendable >= amount, AirlockError::InsufficientArmor);

    ctx.accounts.allocation.amount -= amount;

    let bump = ctx.accounts.airlock.vault_authority_bump;
    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, &[bump]];
    let signer = &[seeds];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.armor_vault.to_account_info(),
                to: ctx.accounts.authority_armor.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer,
        ),
        amount,
    )?;

    emit!(ArmorAllocationDecreased {
        user: ctx.accounts.user.key(),
        amount,
    });
    msg!("Allocation decreased: user={} amount={}", ctx.accounts.user.key(), amount);
    Ok(())
}

#[derive(Accounts)]
pub struct IncreaseAllocation<'info> {
    #[account(
        mut,
        constraint = authority.key() == airlock.authority @ AirlockError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(seeds = [AIRLOCK_SEED], bump = airlock.bump)]
    pub airlock: Account<'info, Airlock>,

    /// CHECK: user being credited; any address
    pub user: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        space = Allocation::LEN,
        seeds = [ALLOCATION_SEED, user.key().as_ref()],
        bump,
    )]
    pub allocation: Account<'info, Allocation>,

    #[account(
        mut,
        constraint = armor_vault.key() == airlock.armor_vault @ AirlockError::MintMismatch,
    )]
    pub armor_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = authority_armor.mint == airlock.armor_mint @ AirlockError::MintMismatch,
        constraint = authority_armor.owner == authority.key(),
    )]
    pub authority_armor: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct DecreaseAllocation<'info> {
    #[account(
        constraint = authority.key() == airlock.authority @ AirlockError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(seeds = [AIRLOCK_SEED], bump = airlock.bump)]
    pub airlock: Account<'info, Airlock>,

    /// CHECK: user being debited
    pub user: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [ALLOCATION_SEED, user.key().as_ref()],
        bump = allocation.bump,
        constraint = allocation.user == user.key(),
    )]
    pub allocation: Account<'info, Allocation>,

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
        constraint = authority_armor.mint == airlock.armor_mint @ AirlockError::MintMismatch,
        constraint = authority_armor.owner == authority.key(),
    )]
    pub authority_armor: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
