use storefront_client::ClientError;
use thiserror::Error;

use crate::variant::gate::PurchaseRejection;

/// Failure of a widget action. By the time a caller sees one, the widget
/// has already logged it and, for shopper-initiated actions, shown a toast.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("purchase rejected: {0}")]
    Rejected(#[from] PurchaseRejection),

    #[error(transparent)]
    Client(#[from] ClientError),
}
