//! REPL (Read-Eval-Print Loop) for MyLisp

use crate::config::Config;
use crate::error::{Result, report_error};
use crate::interp::{Interpreter, Value};
use crate::parser::parse_source;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const SOURCE_NAME: &str = "<repl>";

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    config: Config,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL
    pub fn new(config: Config) -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let interpreter = Interpreter::new().with_max_depth(config.max_depth);
        let history_path = config.history_path();

        let mut repl = Repl {
            editor,
            interpreter,
            config,
            history_path,
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("MyLisp Version {}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(&self.config.prompt) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    if line.starts_with(':') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_input(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path
            && let Err(err) = self.editor.save_history(path)
        {
            tracing::warn!(path = %path.display(), %err, "could not save history");
        }

        Ok(())
    }

    /// Handle REPL commands (starting with :); returns true to quit
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye!");
                true
            }
            ":help" | ":h" | ":?" => {
                self.print_help();
                false
            }
            ":clear" => {
                print!("\x1B[2J\x1B[1;1H");
                false
            }
            ":ast" => {
                self.config.show_ast = !self.config.show_ast;
                let state = if self.config.show_ast { "on" } else { "off" };
                println!("Parse tree printing {state}");
                false
            }
            ":env" => {
                self.print_env();
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    fn print_help(&self) {
        println!("MyLisp REPL Commands:");
        println!("  :help, :h, :?   Show this help");
        println!("  :quit, :q       Exit the REPL");
        println!("  :clear          Clear the screen");
        println!("  :ast            Toggle parse tree printing");
        println!("  :env            List bindings");
        println!();
        println!("You can enter:");
        println!("  - Expressions: + 1 2, (* 2 (- 10 4))");
        println!("  - Quoted lists: {{1 2 3}}, eval {{+ 1 2}}");
        println!("  - Definitions: def {{x y}} 1 2");
        println!();
        println!("Built-in functions:");
        println!("  + - * / % ^ min max      Integer arithmetic");
        println!("  list head tail init len  List operations");
        println!("  join eval def            Concatenate, evaluate, bind");
    }

    fn print_env(&self) {
        for (name, value) in self.interpreter.env().sorted_bindings() {
            println!("  {name} = {value}");
        }
    }

    /// Evaluate one input line and print the result or the parse failure
    fn eval_input(&mut self, line: &str) {
        match self.eval_line(line) {
            Ok(value) => println!("{value}"),
            Err(err) => report_error(SOURCE_NAME, line, &err),
        }
    }

    /// Parse, read and evaluate one line in the session environment
    pub fn eval_line(&mut self, line: &str) -> Result<Value> {
        let tree = parse_source(SOURCE_NAME, line)?;
        if self.config.show_ast {
            print!("{tree}");
        }
        let value = self.interpreter.read(&tree);
        Ok(self.interpreter.eval(value))
    }
}
