use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use stdio_fixtures_core::elapsed::{self, Format, RunOptions, DEFAULT_FORMAT};

/// Run a command and show how long it has been running.
#[derive(Parser, Debug, Clone)]
#[command(name = "elapsed", version)]
pub struct ElapsedArgs {
    /// Keep the final elapsed time on screen after the command exits.
    #[arg(short, long)]
    pub total: bool,

    /// Status line template: %H %M %S %s %f %Nf, %n %t %e %%, \n \t \e \\.
    #[arg(short = 'F', long, default_value = DEFAULT_FORMAT)]
    pub format: Format,

    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<OsString>,
}

impl ElapsedArgs {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            format: self.format.clone(),
            total: self.total,
        }
    }
}

/// Runs the command and maps the outcome to this process's exit status: the
/// child's code (low 8 bits), or a spawn/relay failure code.
pub async fn run(args: &ElapsedArgs) -> ExitCode {
    let Some((program, rest)) = args.command.split_first() else {
        return ExitCode::FAILURE;
    };

    let code = match elapsed::run_command(program, rest, &args.options()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "elapsed failed");
            eprintln!("elapsed: {e}");
            e.exit_code()
        }
    };
    exit_status(code)
}

pub fn exit_status(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code & 0xff).unwrap_or(1))
}
