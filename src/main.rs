use std::fs;

use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use mathbench::{
    ast::Statement,
    interpreter::workspace::{Binding, Settings, Workspace, DEFAULT_MAX_CALL_DEPTH, DEFAULT_TOLERANCE},
    parse, run,
};
use rustyline::{error::ReadlineError, DefaultEditor};

const HELP: &str = "\
Enter an expression, an assignment such as `x = 2`, a function definition
such as `f(x) = x^2`, or a comparison such as `f(3) > 8`.

Commands:
  help          show this message
  .vars         list the bound names
  .forget NAME  remove a binding
  exit, quit    leave";

/// mathbench simplifies mathematical notation over the complex numbers,
/// keeping unbound names symbolic.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells mathbench to read `contents` as a path to a script.
    #[arg(short, long)]
    file: bool,

    /// Relative tolerance for comparisons.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Maximum nesting of user function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Start without `pi`, `e` and `tau`.
    #[arg(long)]
    bare: bool,

    /// A script to run. Without it, mathbench reads lines interactively.
    contents: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = Settings { tolerance:      args.tolerance,
                              max_call_depth: args.max_depth, };
    let mut workspace = Workspace::with_settings(settings);
    if !args.bare {
        workspace = workspace.with_constants();
    }

    match args.contents {
        Some(contents) => {
            let script = if args.file {
                fs::read_to_string(&contents).unwrap_or_else(|_| {
                    eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                    std::process::exit(1);
                })
            } else {
                contents
            };
            run_script(&script, &mut workspace);
        },
        None => repl(&mut workspace),
    }
}

fn run_script(script: &str, workspace: &mut Workspace) {
    match run(script, workspace) {
        Ok(results) => {
            for result in results {
                println!("= {result}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}

fn repl(workspace: &mut Workspace) {
    info!("mathbench v{} starting", env!("CARGO_PKG_VERSION"));

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to initialize the line editor: {e}");
            std::process::exit(1);
        },
    };

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return,
            Err(e) => {
                eprintln!("Error: {e}");
                return;
            },
        };
        let line = line.trim();
        if !line.is_empty() {
            if let Err(e) = editor.add_history_entry(line) {
                warn!("could not record history: {e}");
            }
        }

        if handle_line(workspace, line) == Flow::Quit {
            return;
        }
    }
}

/// Whether the interactive loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs one trimmed line of interactive input.
fn handle_line(workspace: &mut Workspace, line: &str) -> Flow {
    match line {
        "" => {},
        "exit" | "quit" => return Flow::Quit,
        "help" => println!("{HELP}"),
        ".vars" => print_bindings(workspace),
        _ => {
            if let Some(name) = line.strip_prefix(".forget") {
                forget(workspace, name.trim());
            } else {
                evaluate(workspace, line);
            }
        },
    }
    Flow::Continue
}

fn evaluate(workspace: &mut Workspace, line: &str) {
    let result = parse(line).map_err(|e| e.to_string())
                            .and_then(|statement: Statement| {
                                statement.simplified(workspace).map_err(|e| e.to_string())
                            });
    match result {
        Ok(statement) => println!("= {statement}"),
        Err(message) => eprintln!("{message}"),
    }
}

fn forget(workspace: &mut Workspace, name: &str) {
    if workspace.remove(name).is_none() {
        eprintln!("'{name}' is not bound.");
    }
}

fn print_bindings(workspace: &Workspace) {
    for (name, binding) in workspace.iter() {
        match binding {
            Binding::Function { params, body } => println!("{name}({}) = {body}", params.join(", ")),
            Binding::Variable(value) | Binding::Argument(value) => println!("{name} = {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use mathbench::ast::Expression;

    use super::*;

    #[test]
    fn interactive_commands() {
        let mut workspace = Workspace::new();

        assert_eq!(handle_line(&mut workspace, "x = 2"), Flow::Continue);
        assert_eq!(workspace.get("x"), Some(&Expression::real(2.0)));

        assert_eq!(handle_line(&mut workspace, "help"), Flow::Continue);
        assert_eq!(handle_line(&mut workspace, ".vars"), Flow::Continue);
        assert_eq!(handle_line(&mut workspace, "1 +* 2"), Flow::Continue);

        assert_eq!(handle_line(&mut workspace, ".forget x"), Flow::Continue);
        assert!(!workspace.contains_key("x"));

        assert_eq!(handle_line(&mut workspace, "quit"), Flow::Quit);
        assert_eq!(handle_line(&mut workspace, "exit"), Flow::Quit);
    }
}
