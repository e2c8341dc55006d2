//! Type-prefixed account code generation.
//!
//! Codes are four-digit numerics in a block per account type: assets get
//! 1000-1999, liabilities 2000-2999, and so on. Generation is a pure
//! function over the codes that already exist in the scope; the store
//! re-checks uniqueness immediately before insert and retries with
//! [`bump_code`] on collision.

use super::account::AccountType;
use super::error::ChartError;

/// Generates the next account code for a type within a scope.
///
/// Finds the maximum existing numeric code under the type's prefix and
/// increments it, falling back to `{prefix}001` when none exist.
///
/// # Errors
///
/// Returns [`ChartError::CodeSpaceExhausted`] when the type's thousand-block
/// is full.
pub fn next_account_code<'a, I>(account_type: AccountType, existing: I) -> Result<String, ChartError>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = account_type.code_prefix();
    let max = existing
        .into_iter()
        .filter(|code| code.starts_with(prefix))
        .filter_map(|code| code.parse::<u32>().ok())
        .max();

    let next = match max {
        Some(value) => value + 1,
        None => first_code_value(account_type),
    };
    code_from_value(account_type, next)
}

/// Returns the next candidate code after a collision.
///
/// # Errors
///
/// Returns [`ChartError::CodeSpaceExhausted`] when the increment would leave
/// the type's block.
pub fn bump_code(account_type: AccountType, code: &str) -> Result<String, ChartError> {
    let value = code
        .parse::<u32>()
        .map_err(|_| ChartError::CodeSpaceExhausted {
            prefix: account_type.code_prefix(),
        })?;
    code_from_value(account_type, value + 1)
}

/// Value of the first code in a type's block, e.g. 1001 for assets.
fn first_code_value(account_type: AccountType) -> u32 {
    account_type.prefix_digit() * 1000 + 1
}

/// Formats a numeric code value, guarding against leaving the type's block.
fn code_from_value(account_type: AccountType, value: u32) -> Result<String, ChartError> {
    if value / 1000 != account_type.prefix_digit() {
        return Err(ChartError::CodeSpaceExhausted {
            prefix: account_type.code_prefix(),
        });
    }
    Ok(value.to_string())
}
