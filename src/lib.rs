pub mod error;
pub mod eval;
pub mod format;
pub mod lex;
pub mod parse;
pub mod state;

pub use error::{CalcError, ErrorKind};
pub use eval::{eval_rpn, evaluate};
pub use lex::Lexer;
pub use parse::{Op, Parser, RpnExpr};
pub use state::{CalcState, Key};
