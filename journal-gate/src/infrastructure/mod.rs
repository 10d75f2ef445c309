pub(crate) mod logging;
pub(crate) mod settings;
pub(crate) mod token;
pub(crate) mod verifier;
