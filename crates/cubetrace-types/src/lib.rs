pub mod baseline;
pub mod event;
pub mod job;
pub mod memory;
pub mod record;

pub use baseline::*;
pub use event::*;
pub use job::*;
pub use memory::*;
pub use record::*;
