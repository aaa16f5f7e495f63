pub mod spawn;
pub mod time;
