pub mod secret;

pub use secret::secrets_match;
