//! User confirmation.
//!
//! The device screen and buttons are behind the [`Ux`] trait. Handlers only
//! proceed when it returns true.

/// Fields of a spend transaction presented for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReview<'a> {
    pub recipient: &'a str,
    pub amount: &'a str,
    pub fee: &'a str,
}

impl<'a> TxReview<'a> {
    /// Tag/value pairs in display order.
    pub fn pairs(&self) -> [(&'static str, &'a str); 3] {
        [
            ("Recipient", self.recipient),
            ("Amount", self.amount),
            ("Fee", self.fee),
        ]
    }
}

pub trait Ux {
    /// Shows the transaction and waits for approval or rejection.
    fn confirm_transaction(&mut self, review: &TxReview) -> bool;

    /// Shows the address so the user can compare it with the host.
    fn confirm_address(&mut self, address: &str) -> bool;
}

/// Approves everything without user interaction. Testing builds only.
#[cfg(feature = "autoapprove")]
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoApprove;

#[cfg(feature = "autoapprove")]
impl Ux for AutoApprove {
    fn confirm_transaction(&mut self, review: &TxReview) -> bool {
        for (tag, value) in review.pairs() {
            log::info!("{}: {}", tag, value);
        }
        true
    }

    fn confirm_address(&mut self, _address: &str) -> bool {
        true
    }
}
