//! API handlers module

pub mod contact;
pub mod content;
pub mod health;

#[cfg(test)]
pub(crate) mod test_support;
