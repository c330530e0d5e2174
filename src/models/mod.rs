pub mod facility;
pub mod time;

pub use facility::*;
pub use time::*;
