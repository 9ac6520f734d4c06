//! Repository layout guards for the test suite

mod coverage;
