pub mod impl_fake;
pub mod impl_gui;
pub mod impl_highgui;
pub mod interface;
