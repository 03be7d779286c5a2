mod builtin;
mod command;
mod external;
mod interpreter;
mod ring;
mod session;
mod tokenizer;

pub use command::{Action, CommandFactory, ExecutableCommand, ExitCode};
pub use interpreter::Shell;
pub use ring::Ring;
pub use session::{RING_CAPACITY, Session};
pub use tokenizer::{MAX_ARGS, MAX_COMMAND_SIZE, Token, tokenize};
