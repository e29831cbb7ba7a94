#[cfg(test)]
pub mod impl_fake;
pub mod impl_fs;
pub mod interface;
