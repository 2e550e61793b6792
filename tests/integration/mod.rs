//! Integration test modules.

mod enrichment_gate_test;
mod gateway_test;
mod mocks;
mod roster_subscription_test;
mod sign_up_test;
