mod arena;
pub mod arrays;
pub mod error;
pub mod ids;
mod inference;
pub mod node;
pub mod rules;
pub mod tree;

#[cfg(test)]
mod tests;
