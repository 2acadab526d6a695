//! Version requests and their resolution against the tags of a clone.

pub mod request;
pub mod resolve;

pub use request::{LATEST, VersionRequest};
pub use resolve::{CheckoutTarget, available_versions, resolve};
