//! Cross-crate integration tests.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod concurrency;

#[cfg(test)]
mod end_to_end;
