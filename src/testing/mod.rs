pub mod fixtures;
pub mod spies;
pub mod stubs;
