//! Interactive REPL implementation
//!
//! Plain lines run through the shell host's current handler. Lines starting
//! with `:` are REPL commands.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::backend::BackendKind;
use crate::config::Settings;
use crate::error::{DockyterError, Result};
use crate::output::{format_status, print_result, OutputFormat};
use crate::session::Session;
use crate::shell::ShellHost;

/// A parsed `:` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    Help,
    Connect(String),
    RedirectOn,
    RedirectOff,
    Status,
    Backend { kind: BackendKind, url: Option<String> },
    BeginCell(String),
    EndCell,
}

/// Parse a line starting with `:`. Returns `None` for plain shell lines.
pub fn parse_repl_command(line: &str) -> Option<Result<ReplCommand>> {
    let rest = line.strip_prefix(':')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name.to_lowercase().as_str() {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "docker" => Ok(ReplCommand::Connect(arg.to_string())),
        "on" => Ok(ReplCommand::RedirectOn),
        "off" => Ok(ReplCommand::RedirectOff),
        "status" => Ok(ReplCommand::Status),
        "cell" => Ok(ReplCommand::BeginCell(arg.to_string())),
        "end" => Ok(ReplCommand::EndCell),
        "backend" => parse_backend(arg),
        other => Err(DockyterError::Shell(format!(
            "unknown command ':{}', type :help",
            other
        ))),
    };
    Some(command)
}

fn parse_backend(arg: &str) -> Result<ReplCommand> {
    let mut parts = arg.split_whitespace();
    let kind = parts
        .next()
        .ok_or_else(|| DockyterError::Shell("usage: :backend <docker|api> [api_url]".to_string()))?
        .parse::<BackendKind>()?;
    let url = parts.next().map(String::from);

    if kind == BackendKind::Api && url.is_none() {
        return Err(DockyterError::Shell("usage: :backend api <api_url>".to_string()));
    }
    Ok(ReplCommand::Backend { kind, url })
}

/// Run the REPL. `:backend` switches are built from `settings`, so the
/// configured runtime and timeout carry over.
pub fn run_repl(settings: &Settings, connect_args: Option<&str>) -> Result<()> {
    let session = Session::new(settings.build_backend()?);
    let mut rl = DefaultEditor::new().map_err(|e| DockyterError::Shell(e.to_string()))?;

    println!("Dockyter v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
    println!("Type ':help' for commands, ':exit' to quit\n");

    let mut host = ShellHost::new(session);
    if let Some(args) = connect_args {
        report(host.connect(args));
    }

    // Pending `:cell` block: its runtime arguments and collected lines.
    let mut cell: Option<(String, Vec<String>)> = None;

    loop {
        let prompt = match (&cell, host.is_redirected()) {
            (Some(_), _) => "...> ".to_string(),
            (None, true) => format!("dockyter [{}]> ", host.session().backend().kind()),
            (None, false) => "dockyter> ".to_string(),
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() && cell.is_none() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match parse_repl_command(trimmed) {
                    Some(Ok(ReplCommand::EndCell)) => match cell.take() {
                        Some((args, lines)) => report(host.run_block(&args, &lines.join("\n"))),
                        None => eprintln!("Error: no :cell block is open\n"),
                    },
                    _ if cell.is_some() => {
                        if let Some((_, lines)) = cell.as_mut() {
                            lines.push(line.to_string());
                        }
                    }
                    Some(Ok(command)) => {
                        if !handle_command(&mut host, settings, command, &mut cell) {
                            println!("Goodbye!");
                            break;
                        }
                    }
                    Some(Err(e)) => eprintln!("Error: {}\n", e),
                    None => report(host.dispatch(trimmed)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if cell.take().is_some() {
                    println!("^C (block cancelled)");
                } else {
                    println!("^C");
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Returns false when the REPL should exit.
fn handle_command(
    host: &mut ShellHost,
    settings: &Settings,
    command: ReplCommand,
    cell: &mut Option<(String, Vec<String>)>,
) -> bool {
    match command {
        ReplCommand::Exit => return false,
        ReplCommand::Help => print_help(),
        ReplCommand::Connect(args) => report(host.connect(&args)),
        ReplCommand::RedirectOn => {
            host.redirect_on();
            println!("Redirection on: commands now run in the container.\n");
        }
        ReplCommand::RedirectOff => match host.redirect_off() {
            Ok(0) => println!("Redirection off: commands run on the host.\n"),
            Ok(depth) => println!("Redirection still on ({} outstanding).\n", depth),
            Err(e) => report_error(&e),
        },
        ReplCommand::Status => println!("{}\n", format_status(&host.status(), &OutputFormat::Human)),
        ReplCommand::Backend { kind, url } => {
            match settings.build(kind, url.as_deref()) {
                Ok(backend) => {
                    println!("Switched backend to {}.", backend.describe());
                    host.switch_backend(backend);
                    println!("{}\n", format_status(&host.status(), &OutputFormat::Human));
                }
                Err(e) => report_error(&e),
            }
        }
        ReplCommand::BeginCell(args) => *cell = Some((args, Vec::new())),
        ReplCommand::EndCell => {}
    }
    true
}

fn report(result: Result<crate::backend::CommandResult>) {
    match result {
        Ok(result) => print_result(&result),
        Err(e) => report_error(&e),
    }
}

fn report_error(e: &DockyterError) {
    eprintln!("Error: {}", e);
    if e.is_remote() {
        eprintln!("Hint: run :status to check the execution API.");
    }
    eprintln!();
}

fn print_help() {
    println!(
        r#"
Dockyter Commands
=================

  <command>                   - Run on the host, or in the container when redirected
  :docker <args>              - Set docker args, turn redirection on, test the container
  :on                         - Turn redirection on
  :off                        - Turn redirection off (one level)
  :status                     - Show backend status
  :backend docker             - Use the local docker runtime
  :backend api <url>          - Use a remote execution API
  :cell <args>                - Start a multi-line block run in one container
  :end                        - Run the open block
  :help, :?                   - Show this help
  :exit, :quit, :q            - Exit REPL

Switching backend clears the docker args; set them again with :docker.
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_are_not_commands() {
        assert!(parse_repl_command("ls -la").is_none());
    }

    #[test]
    fn test_parse_docker_args() {
        let cmd = parse_repl_command(":docker -v /a:/a  ubuntu ").unwrap().unwrap();
        assert_eq!(cmd, ReplCommand::Connect("-v /a:/a  ubuntu".to_string()));
    }

    #[test]
    fn test_parse_backend() {
        let cmd = parse_repl_command(":backend api http://h:8000").unwrap().unwrap();
        assert_eq!(
            cmd,
            ReplCommand::Backend {
                kind: BackendKind::Api,
                url: Some("http://h:8000".to_string())
            }
        );
        assert!(parse_repl_command(":backend api").unwrap().is_err());
        assert!(parse_repl_command(":backend k8s").unwrap().is_err());
        assert!(parse_repl_command(":backend").unwrap().is_err());
    }

    #[test]
    fn test_backend_switch_uses_settings() {
        let settings = Settings {
            runtime: "podman".to_string(),
            ..Settings::default()
        };
        let mut host = ShellHost::new(Session::new(settings.build_backend().unwrap()));
        let mut cell = None;

        let command = parse_repl_command(":backend docker").unwrap().unwrap();
        assert!(handle_command(&mut host, &settings, command, &mut cell));
        assert_eq!(host.session().backend().describe(), "Docker (podman)");

        // A malformed URL is refused and the current backend stays.
        let command = parse_repl_command(":backend api localhost:8000").unwrap().unwrap();
        assert!(handle_command(&mut host, &settings, command, &mut cell));
        assert_eq!(host.session().backend().kind(), BackendKind::Docker);
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_repl_command(":frobnicate").unwrap().is_err());
    }
}
