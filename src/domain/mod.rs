pub mod analysis;
pub mod device;
pub mod property;
pub mod reading;

pub use analysis::*;
pub use device::*;
pub use property::*;
pub use reading::*;
