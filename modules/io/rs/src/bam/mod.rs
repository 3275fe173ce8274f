pub use reader::{Reader, ReaderBuilder};
pub use record::Alignment;

mod indexed_reader;
mod query;
mod reader;
mod record;

pub mod strdeductor;
