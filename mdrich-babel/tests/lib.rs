// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod markdown;

#[cfg(test)]
mod model;
