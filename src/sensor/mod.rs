#[cfg(test)]
pub mod impl_fake;
pub mod impl_simulated;
pub mod interface;
pub mod log;
