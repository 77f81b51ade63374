pub mod extract;

pub use extract::{FormInput, QueryInput};
