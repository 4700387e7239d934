pub mod codec;
pub mod scalars;
