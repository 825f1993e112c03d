pub mod callback_hash;
pub mod clock;
pub mod payment_signature;

pub use callback_hash::{hashes_match, integrity_hash, integrity_message};
pub use clock::{Clock, FixedClock, SystemClock};
pub use payment_signature::{
    keyed_signature,
    sign_payment_request,
    signature_message,
    SignedPaymentRequest,
    Signer,
    SEQUENCE_RANGE,
};
