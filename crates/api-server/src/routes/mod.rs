//! Route handlers

pub mod chat;
pub mod health;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;
