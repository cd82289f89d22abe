pub mod evaluator;
pub mod session;
pub mod validator;

pub use evaluator::GuessEvaluator;
pub use session::GameService;
pub use validator::{canonicalize, WordValidator};
