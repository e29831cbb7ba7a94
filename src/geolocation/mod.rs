pub mod impl_fake;
pub mod impl_ipinfo;
pub mod interface;
