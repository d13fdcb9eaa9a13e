mod ask;
mod error;
mod health;
mod prompts;
mod upload;

pub use ask::{AnswerResponse, AskDirectRequest, AskRagRequest, ask_direct_handler, ask_rag_handler};
pub use error::ErrorResponse;
pub use health::health_handler;
pub use prompts::prompts_handler;
pub use upload::upload_handler;
