pub mod bank;
pub mod session;

pub use bank::{load_questions, QuestionBank};
pub use session::SessionState;
