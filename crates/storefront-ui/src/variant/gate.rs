//! Validation run before add-to-cart and buy-now.

use storefront_core::attributes::parse_integer;
use storefront_core::settings::ToastSettings;
use storefront_core::Variant;
use thiserror::Error;

use crate::toast::Toast;

/// A purchase that passed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub variant_id: u64,
    pub quantity: u32,
}

/// Why a purchase was refused. The display text is shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseRejection {
    #[error("Please select an available variant.")]
    UnavailableVariant,
    /// No compare-at price is configured, which the theme treats as an
    /// unpriced product.
    #[error("This product cannot be purchased because the price is zero.")]
    ZeroPrice,
    #[error("Please enter a valid quantity.")]
    InvalidQuantity,
}

impl PurchaseRejection {
    #[must_use]
    pub fn toast(self, settings: &ToastSettings) -> Toast {
        Toast::error(self.to_string(), settings)
    }
}

pub struct PurchaseGate;

impl PurchaseGate {
    /// Checks, in order: a resolved available variant, a configured
    /// compare-at price, then a positive integer quantity.
    ///
    /// # Errors
    ///
    /// The first failed check as a [`PurchaseRejection`].
    pub fn check(
        variant: Option<&Variant>,
        raw_quantity: &str,
    ) -> Result<PurchaseRequest, PurchaseRejection> {
        let variant = variant
            .filter(|v| v.available)
            .ok_or(PurchaseRejection::UnavailableVariant)?;

        if variant.compare_at_price.is_none() {
            return Err(PurchaseRejection::ZeroPrice);
        }

        let quantity = parse_integer(raw_quantity)
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(PurchaseRejection::InvalidQuantity)?;

        Ok(PurchaseRequest {
            variant_id: variant.id,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(available: bool, compare_at_price: Option<i64>) -> Variant {
        Variant {
            id: 9,
            title: "Blue".to_string(),
            options: vec!["Blue".to_string()],
            price: 1200,
            compare_at_price,
            available,
            featured_media: None,
        }
    }

    #[test]
    fn accepts_available_priced_variant() {
        let v = variant(true, Some(1500));
        assert_eq!(
            PurchaseGate::check(Some(&v), "2"),
            Ok(PurchaseRequest {
                variant_id: 9,
                quantity: 2
            })
        );
    }

    #[test]
    fn unavailable_rejected_regardless_of_quantity() {
        let v = variant(false, Some(1500));
        for qty in ["1", "5", "0", "abc"] {
            assert_eq!(
                PurchaseGate::check(Some(&v), qty),
                Err(PurchaseRejection::UnavailableVariant)
            );
        }
        assert_eq!(
            PurchaseGate::check(None, "1"),
            Err(PurchaseRejection::UnavailableVariant)
        );
    }

    #[test]
    fn missing_compare_at_price_is_zero_price() {
        let v = variant(true, None);
        assert_eq!(
            PurchaseGate::check(Some(&v), "1"),
            Err(PurchaseRejection::ZeroPrice)
        );
    }

    #[test]
    fn non_positive_or_non_numeric_quantity_rejected() {
        let v = variant(true, Some(1500));
        for qty in ["0", "-1", "", "two", "1.5"] {
            assert_eq!(
                PurchaseGate::check(Some(&v), qty),
                Err(PurchaseRejection::InvalidQuantity),
                "quantity {qty:?}"
            );
        }
    }

    #[test]
    fn rejection_toast_is_danger_with_error_duration() {
        let toast = PurchaseRejection::InvalidQuantity.toast(&ToastSettings::default());
        assert_eq!(toast.message, "Please enter a valid quantity.");
        assert_eq!(toast.kind, crate::toast::ToastKind::Danger);
        assert_eq!(toast.duration.as_millis(), 6000);
    }
}
