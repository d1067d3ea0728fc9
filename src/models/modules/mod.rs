mod controllers;
mod heads;
mod separable_conv;
mod utils;

pub use controllers::*;
pub use heads::*;
pub use separable_conv::*;
pub use utils::*;
