mod contact;
mod health;
mod spa;

pub use contact::*;
pub use health::*;
pub use spa::*;
