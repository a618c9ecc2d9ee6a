#[cfg(test)]
pub(crate) mod memory;
pub mod postgres;
