//! Moving input tokens from whoever pays for a leg.

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::error::Result;
use crate::traits::TokenLedger;

/// Transfers `amount` of `token` from `payer` to `recipient` on behalf of
/// the engine at `engine`.
///
/// Legs paid out of the engine's own custody are plain transfers; any
/// other payer is debited through its allowance to the engine.  Returns
/// the amount the recipient actually received.
///
/// # Errors
///
/// [`RouterError::InsufficientBalance`] or
/// [`RouterError::InsufficientAllowance`] from the ledger.
///
/// [`RouterError::InsufficientBalance`]: crate::error::RouterError::InsufficientBalance
/// [`RouterError::InsufficientAllowance`]: crate::error::RouterError::InsufficientAllowance
pub fn pay(
    ledger: &mut dyn TokenLedger,
    engine: Address,
    token: Address,
    payer: Address,
    recipient: Address,
    amount: U256,
) -> Result<U256> {
    let received = if payer == engine {
        ledger.transfer(token, engine, recipient, amount)?
    } else {
        ledger.transfer_from(token, engine, payer, recipient, amount)?
    };
    debug!(%token, %payer, %recipient, %amount, %received, "leg paid");
    Ok(received)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::chain::InMemoryLedger;
    use crate::domain::TokenDescriptor;
    use crate::error::RouterError;

    const TOKEN: Address = Address::repeat_byte(0x11);
    const ENGINE: Address = Address::repeat_byte(0xe0);
    const TRADER: Address = Address::repeat_byte(0xa1);
    const POOL: Address = Address::repeat_byte(0xee);

    fn ledger() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        ledger.register_token(TokenDescriptor::new("A", "Token A", TOKEN, 18));
        ledger.mint(TOKEN, TRADER, U256::from(100u64));
        ledger.mint(TOKEN, ENGINE, U256::from(100u64));
        ledger
    }

    #[test]
    fn engine_custody_pays_directly() {
        let mut ledger = ledger();
        assert_eq!(
            pay(&mut ledger, ENGINE, TOKEN, ENGINE, POOL, U256::from(40u64)),
            Ok(U256::from(40u64))
        );
        assert_eq!(ledger.balance_of(TOKEN, POOL), Ok(U256::from(40u64)));
    }

    #[test]
    fn trader_pays_through_allowance() {
        let mut ledger = ledger();
        assert_eq!(
            pay(&mut ledger, ENGINE, TOKEN, TRADER, POOL, U256::from(40u64)),
            Err(RouterError::InsufficientAllowance {
                token: TOKEN,
                owner: TRADER,
                spender: ENGINE,
            })
        );
        ledger.approve(TOKEN, TRADER, ENGINE, U256::from(40u64));
        assert_eq!(
            pay(&mut ledger, ENGINE, TOKEN, TRADER, POOL, U256::from(40u64)),
            Ok(U256::from(40u64))
        );
        assert_eq!(ledger.allowance(TOKEN, TRADER, ENGINE), U256::ZERO);
    }
}
