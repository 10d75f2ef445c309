pub(crate) mod auth_gate;
pub(crate) mod trace;
