pub mod book;
pub mod choseo;
pub mod pause;
pub mod session;

pub use book::Book;
pub use choseo::{Choseo, Reader};
pub use pause::Pause;
pub use session::{ReadingSession, SessionStatus};
