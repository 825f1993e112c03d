use serde::{Deserialize, Serialize};
use tshirt_payment_engine::helpers::SignedPaymentRequest;

/// Query parameters accepted by the payment form route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentFormParams {
    /// Set to `false` when a declined payment sends the customer back here.
    pub authorized: Option<String>,
}

/// Everything the purchase page needs to render the hidden fields of the gateway payment form.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentForm {
    /// The gateway's hosted payment page. The form must be posted here.
    pub form_url: String,
    #[serde(flatten)]
    pub request: SignedPaymentRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized: Option<String>,
}
