//! Chat session layer on top of the local search.

pub mod completion;
pub mod conversation;
pub mod orchestrator;
pub mod rate_limit;

pub use completion::{CompletionError, CompletionProvider};
pub use conversation::{Conversation, GREETING, Message, Role};
pub use orchestrator::{Orchestrator, render_results, user_message};
pub use rate_limit::{Clock, ManualClock, RateLimiter, SystemClock};
