//! Library half of the mdrich binary, shared with its integration tests.

pub mod transforms;
