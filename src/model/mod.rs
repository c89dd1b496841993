pub mod answer;
pub mod field;
mod id;
pub mod plan;
pub mod rule;
pub mod step;

pub use answer::*;
pub use field::*;
pub use plan::*;
pub use rule::*;
pub use step::*;
