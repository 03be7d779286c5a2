use crate::builtin::{Cd, History, ListPids};
use crate::command::{Action, CommandFactory};
use crate::external;
use crate::session::Session;
use crate::tokenizer::{MAX_COMMAND_SIZE, Token, leading_args, tokenize};
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

const PROMPT: &str = "msh> ";

/// Names the not-found advisory recognizes. `ls` and `ps` are listed but not
/// handled in-process; they run externally like any other program.
const RECOGNIZED_NAMES: [&str; 5] = ["ls", "ps", "listpids", "history", "cd"];

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — the builtins dispatched
/// in-process.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interactive command interpreter.
///
/// Owns the per-session rings and the set of builtin factories queried during
/// dispatch. Each accepted line is recorded into history, tokenized, and
/// dispatched either to a builtin (in-process) or to the external launcher.
pub struct Shell {
    session: Session,
    builtins: Vec<Box<dyn CommandFactory>>,
}

impl Shell {
    /// Create a shell with a custom set of builtin factories.
    pub fn new(builtins: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            session: Session::new(),
            builtins,
        }
    }

    /// Accepts one raw input line: truncates it, records it into history
    /// (blank lines included), tokenizes it, and dispatches it.
    pub fn accept_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Action> {
        let line: String = line.chars().take(MAX_COMMAND_SIZE).collect();
        self.session.history.record(line.clone());
        let tokens = tokenize(&line);
        self.dispatch(&tokens, out)
    }

    /// Decides what to do with a parsed token sequence.
    ///
    /// Blank input continues the loop; `exit`/`quit` terminate it; builtins
    /// run in-process; everything else goes to the launcher. Names outside the
    /// recognized set get an advisory not-found message first but are still
    /// attempted externally.
    fn dispatch(&mut self, tokens: &[Token], out: &mut dyn Write) -> Result<Action> {
        let Some(name) = tokens.first().and_then(|t| t.as_deref()) else {
            return Ok(Action::Continue);
        };
        log::debug!("dispatching {:?}", name);

        if name == "exit" || name == "quit" {
            return Ok(Action::Exit);
        }

        if !RECOGNIZED_NAMES.contains(&name) {
            writeln!(out, "{}: Command not found.\n", name)?;
        }

        let args = leading_args(&tokens[1..]);
        if let Some(cmd) = self
            .builtins
            .iter()
            .find_map(|factory| factory.try_create(name, &args))
        {
            let code = cmd.execute(out, &mut self.session)?;
            log::debug!("builtin {} exited with {}", name, code);
            return Ok(Action::RanBuiltin);
        }

        external::launch(tokens, &mut self.session)?;
        Ok(Action::RanExternal)
    }

    /// The read-eval loop: prompt, read one line, accept it, repeat.
    ///
    /// Ends cleanly on `exit`/`quit`, end of input, or interrupt.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut stdout = std::io::stdout();

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    if self.accept_line(&line, &mut stdout)? == Action::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

impl Default for Shell {
    /// Create a shell with the builtin set: `cd`, `history`, `listpids`.
    fn default() -> Self {
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<History>::default()),
            Box::new(Factory::<ListPids>::default()),
        ])
    }
}
