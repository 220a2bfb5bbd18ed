pub mod protocol;
pub mod upload;

pub use protocol::{Incoming, IncomingKind};
pub use upload::spawn_upload;
