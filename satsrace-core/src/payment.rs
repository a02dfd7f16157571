use crate::Result;
use bitcoin::Amount;
use serde::{Deserialize, Serialize};

/// What a payment code has to carry to pay out the winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Opaque destination, never parsed here
    pub payout_address: String,
    pub amount_sats: u64,
    pub label: String,
}

impl PaymentRequest {
    pub fn new(payout_address: impl Into<String>, amount: Amount, label: impl Into<String>) -> Self {
        Self {
            payout_address: payout_address.into(),
            amount_sats: amount.to_sat(),
            label: label.into(),
        }
    }

    pub fn amount(&self) -> Amount {
        Amount::from_sat(self.amount_sats)
    }
}

/// Turns a payment request into something a phone can scan.
///
/// The encoding is entirely up to the implementation; the game only hands
/// over the request and the target size in pixels.
pub trait PaymentCodeRenderer {
    fn render(&self, request: &PaymentRequest, size_px: u32) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RaceError;

    struct AddressOnly;

    impl PaymentCodeRenderer for AddressOnly {
        fn render(&self, request: &PaymentRequest, size_px: u32) -> Result<String> {
            if size_px == 0 {
                return Err(RaceError::render("size must be positive"));
            }
            Ok(request.payout_address.clone())
        }
    }

    #[test]
    fn test_request_amount() {
        let request = PaymentRequest::new("bob@ln.example", Amount::from_sat(10_000), "Bob");
        assert_eq!(request.amount(), Amount::from_sat(10_000));
        assert_eq!(request.amount_sats, 10_000);
    }

    #[test]
    fn test_renderer_is_object_safe() {
        let renderer: Box<dyn PaymentCodeRenderer> = Box::new(AddressOnly);
        let request = PaymentRequest::new("not even an address", Amount::ONE_SAT, "x");

        assert_eq!(renderer.render(&request, 200).unwrap(), "not even an address");
        assert!(matches!(
            renderer.render(&request, 0),
            Err(RaceError::Render(_))
        ));
    }
}
