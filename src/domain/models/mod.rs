mod attached_file;
mod completion;
mod message;
mod settings;
mod transcript;

pub use attached_file::*;
pub use completion::*;
pub use message::*;
pub use settings::*;
pub use transcript::*;
