#[cfg(feature = "left")]
pub mod left;
pub mod locks;
#[cfg(feature = "right")]
pub mod right;
pub mod shared;
