//! Inbound message model and the outbound port handlers talk to.

pub mod port;
pub mod types;
