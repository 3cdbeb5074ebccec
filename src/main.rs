// asmtty: step-through interpreter for a tiny register assembly language

use std::io;
use std::process::ExitCode;

use argh::FromArgs;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use asmtty::interpreter::constants::{DEFAULT_SNAPSHOT_LIMIT, DEFAULT_STEP_LIMIT};
use asmtty::interpreter::engine::{
    create_initial_state_with, ExecutionConfig, UninitializedReads,
};
use asmtty::parser::parse::ParseMode;
use asmtty::programs::{self, EXAMPLE_PROGRAMS};
use asmtty::snapshot::Session;
use asmtty::ui::App;

/// Step through a program written in the mov/inc/dec/jnz register language.
#[derive(FromArgs)]
struct Arguments {
    /// program lines, one argument per line;
    /// if none are given, a built-in example is loaded
    #[argh(positional)]
    lines: Vec<String>,

    /// index of the built-in example to load (see --list-examples)
    #[argh(option, short = 'e', default = "0")]
    example: usize,

    /// reject trailing tokens and numbers followed by other characters
    #[argh(switch)]
    strict: bool,

    /// stop with an error when a register is read before it is written
    #[argh(switch)]
    fail_on_uninitialized: bool,

    /// run to completion and print the registers instead of opening the TUI
    #[argh(switch, short = 'r')]
    run: bool,

    /// print the built-in example programs and exit
    #[argh(switch)]
    list_examples: bool,
}

fn list_examples() {
    for (index, example) in EXAMPLE_PROGRAMS.iter().enumerate() {
        println!("{}: {}", index, example.name);
        for line in example.lines {
            println!("    {}", line);
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Arguments = argh::from_env();

    if args.list_examples {
        list_examples();
        return Ok(ExitCode::SUCCESS);
    }

    let lines: Vec<String> = if args.lines.is_empty() {
        match programs::example(args.example) {
            Some(example) => {
                eprintln!("Loading example '{}'...", example.name);
                example.lines.iter().map(|line| line.to_string()).collect()
            }
            None => {
                eprintln!(
                    "Error: No example program with index {} (there are {})",
                    args.example,
                    EXAMPLE_PROGRAMS.len()
                );
                eprintln!("Try --list-examples to see them all.");
                return Ok(ExitCode::FAILURE);
            }
        }
    } else {
        args.lines
    };

    let config = ExecutionConfig {
        parse_mode: if args.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        },
        uninitialized: if args.fail_on_uninitialized {
            UninitializedReads::Fail
        } else {
            UninitializedReads::Zero
        },
        step_limit: Some(DEFAULT_STEP_LIMIT),
    };

    // Parse the program, reporting every bad line at once
    let mut state = match create_initial_state_with(&lines[..], config.parse_mode) {
        Ok(state) => state,
        Err(errors) => {
            for error in &errors {
                eprintln!("{}", error);
            }
            eprintln!("{} line(s) failed to parse.", errors.len());
            return Ok(ExitCode::FAILURE);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} instruction(s).",
        state.instructions.len()
    );

    if args.run {
        if let Err(e) = state.run_to_end(&config) {
            eprintln!("Runtime error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
        for (name, value) in state.sorted_registers() {
            println!("{} = {}", name, value);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let session = Session::new(state, config.uninitialized, DEFAULT_SNAPSHOT_LIMIT)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session, config.step_limit);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(ExitCode::SUCCESS)
}
