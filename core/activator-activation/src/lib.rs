//! Machine activation.
//!
//! A client presents a one-time install-session token, a list of hardware
//! identifiers and an RSA public key. [`Activator::activate`]:
//!
//! 1. Checks the token exists, is unused and has not expired
//! 2. Fetches the token's script from the [`ScriptStore`](activator_artifacts::ScriptStore)
//! 3. Seals the script for the client's key
//! 4. Resolves how the client should run it on its platform
//! 5. Marks the token activated and records a hash of the hardware ids,
//!    in one transaction
//!
//! The sealed payload is returned only after step 5 commits. Any failure
//! leaves the token unused.

mod activator;
mod clock;
mod error;
mod hardware;
mod platform;
mod wire;

pub use activator::{Activator, DEFAULT_FETCH_TIMEOUT};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ActivationError, ActivationResult};
pub use hardware::{activation_record, hash_hardware_ids, HARDWARE_ID_DELIMITER};
pub use platform::{platform_key, resolve_metadata, PLATFORM_RULES};
pub use wire::{ActivationRequest, ActivationResponse, STATUS_SUCCESS};
