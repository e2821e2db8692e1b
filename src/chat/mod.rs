pub mod replies;
pub mod session;
pub mod typewriter;

pub use replies::{CannedReplies, ReplySource, CANNED_REPLIES};
pub use session::{ChatError, ChatMessage, ChatSession, Sender, SessionEvent};
pub use typewriter::{Typewriter, TypewriterEvent};
