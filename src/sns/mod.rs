/// Amazon SNS (source bus) side of the relay
///
/// Envelope decoding, the origin check and the subscription handshake.

pub mod envelope;
pub mod origin;
pub mod confirm;

pub use envelope::{CallbackKind, DecodeError, SnsEnvelope};
pub use origin::OriginGate;
pub use confirm::{ConfirmError, Confirmer, HttpConfirmer};
