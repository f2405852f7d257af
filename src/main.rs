//! Dockyter CLI - run shell commands inside containers

use clap::Parser;
use dockyter::cli::{command_line, Args, SubCommand};
use dockyter::output::emit_result;
use dockyter::{format_status, logging, server, OutputFormat, Session, Settings};

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.log_level) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        if e.is_remote() {
            eprintln!("Hint: `dockyter status` checks whether the execution API is up.");
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> dockyter::Result<()> {
    let settings = Settings::from_args(&args);
    let output_format = if args.json { OutputFormat::Json } else { OutputFormat::Human };

    match args.command {
        SubCommand::Exec {
            args: runtime_args,
            require_healthy,
            command,
        } => {
            let session = Session::new(settings.build_backend()?);
            if require_healthy {
                session.ensure_available()?;
            }
            let result = session.run_with_args(&command_line(&command), &runtime_args)?;
            emit_result(&result, &output_format);
            Ok(())
        }

        SubCommand::Status { args: runtime_args } => {
            let mut session = Session::new(settings.build_backend()?);
            session.set_args(&runtime_args)?;
            let report = session.status(false);
            println!("{}", format_status(&report, &output_format));
            Ok(())
        }

        SubCommand::Serve { bind, port } => {
            settings.validate()?;
            let backend = dockyter::DockerBackend::with_runtime(settings.runtime.trim());
            server::serve(&format!("{}:{}", bind, port), backend)
        }

        #[cfg(feature = "repl")]
        SubCommand::Repl { args: runtime_args } => {
            dockyter::repl::run_repl(&settings, runtime_args.as_deref())
        }
        #[cfg(not(feature = "repl"))]
        SubCommand::Repl { .. } => {
            eprintln!("REPL support not enabled. Rebuild with --features repl");
            std::process::exit(1);
        }
    }
}
