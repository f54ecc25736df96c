// the breaker state machine and its accounting
pub mod circuitbreaker;
pub mod config;
