pub mod impl_fake;
pub mod impl_opencv;
pub mod interface;
