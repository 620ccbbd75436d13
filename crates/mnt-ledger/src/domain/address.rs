//! Null-address screening for balance-affecting parties.

use super::errors::{LedgerError, Party};
use super::value_objects::Address;

/// Rejects the null address in the given role.
pub fn validate(address: &Address, party: Party) -> Result<(), LedgerError> {
    if address.is_zero() {
        return Err(LedgerError::InvalidAddress { party });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_null() {
        assert_eq!(
            validate(&Address::ZERO, Party::Delegate),
            Err(LedgerError::InvalidAddress {
                party: Party::Delegate
            })
        );
    }

    #[test]
    fn test_accepts_non_null() {
        assert!(validate(&Address::repeat_byte(7), Party::Sender).is_ok());
    }
}
