pub mod buffer;
pub mod buffer_mut;
mod read_op;
mod write_op;

pub use buffer::SaveBuffer;
pub use buffer_mut::SaveBufferMut;
pub use read_op::SaveReadable;
