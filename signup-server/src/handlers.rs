#![expect(clippy::missing_docs_in_private_items)]

pub mod business;
pub mod health;
pub mod individual;

#[cfg(test)]
mod test;
