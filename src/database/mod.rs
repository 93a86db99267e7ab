pub mod memory;
pub mod pool;
pub mod record;
pub mod sink;
pub mod table;
