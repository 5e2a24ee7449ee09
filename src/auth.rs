//! Auth-domain secrets, decoded claim sets, and user identity projection.

pub mod claims;
pub mod identity;
pub mod secret;

pub use claims::*;
pub use identity::*;
pub use secret::*;
