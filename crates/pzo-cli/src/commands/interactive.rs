//! `pzo interactive`: line-driven form session.
//!
//! Each input line is one event; the form is re-rendered after every
//! mutation or submit. Bad input is reported with a `?` line and the
//! session continues. A gateway fault ends the session with an error.

use std::io::Write;

use anyhow::Result;
use pzo_config::FormConfig;
use pzo_form::view::FormView;
use pzo_form::{FieldName, OrderFormController, OrderGateway, SubmitError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::check_topping_offered;
use crate::render::render_text;

const HELP: &str = "\
commands:
  name <text>         set full name (empty clears)
  size <S|M|L>        choose size (empty clears)
  topping <id> on|off select or deselect a topping
  show                print the form
  submit              submit the order
  quit                end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Name(String),
    Size(String),
    Topping { id: String, selected: bool },
    Show,
    Submit,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (verb, rest) = match line.split_once(' ') {
        Some((v, r)) => (v, r),
        None => (line, ""),
    };

    match verb {
        "name" => Ok(Command::Name(rest.to_string())),
        "size" => Ok(Command::Size(rest.to_string())),
        "topping" => {
            let mut parts = rest.split_whitespace();
            let (Some(id), Some(state), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err("usage: topping <id> on|off".to_string());
            };
            let selected = match state {
                "on" => true,
                "off" => false,
                other => return Err(format!("expected on|off, got '{other}'")),
            };
            Ok(Command::Topping {
                id: id.to_string(),
                selected,
            })
        }
        "show" => Ok(Command::Show),
        "submit" => Ok(Command::Submit),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("empty command (type `help`)".to_string()),
        other => Err(format!("unknown command '{other}' (type `help`)")),
    }
}

/// Run a session until `quit` or end of input.
pub async fn run_session<G, R, W>(
    cfg: &FormConfig,
    gateway: &G,
    input: R,
    out: &mut W,
) -> Result<()>
where
    G: OrderGateway + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut form = OrderFormController::new();
    let mut lines = input.lines();

    write!(out, "{}", render_text(&FormView::build(&form, &cfg.toppings)))?;
    out.flush()?;

    while let Some(line) = lines.next_line().await? {
        let cmd = match parse_command(&line) {
            Ok(c) => c,
            Err(msg) => {
                writeln!(out, "? {msg}")?;
                out.flush()?;
                continue;
            }
        };

        match cmd {
            Command::Name(v) => form.set_field(FieldName::FullName, &v),
            Command::Size(v) => form.set_field(FieldName::Size, &v),
            Command::Topping { id, selected } => {
                if let Err(e) = check_topping_offered(cfg, &id) {
                    writeln!(out, "? {e}")?;
                    out.flush()?;
                    continue;
                }
                form.toggle_topping(&id, selected);
            }
            Command::Show => {}
            Command::Submit => match form.submit(gateway).await {
                Ok(_) => {}
                Err(SubmitError::Rejected(r)) => {
                    writeln!(out, "? {r}")?;
                    out.flush()?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            },
            Command::Help => {
                writeln!(out, "{HELP}")?;
                out.flush()?;
                continue;
            }
            Command::Quit => break,
        }

        write!(out, "{}", render_text(&FormView::build(&form, &cfg.toppings)))?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pzo_form::GatewayError;
    use pzo_testkit::ScriptedGateway;

    async fn session(gw: &ScriptedGateway, script: &str) -> Result<String> {
        let mut buf = Vec::new();
        run_session(&FormConfig::default(), gw, script.as_bytes(), &mut buf).await?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_command("name Alice Smith"),
            Ok(Command::Name("Alice Smith".to_string()))
        );
        assert_eq!(parse_command("name"), Ok(Command::Name(String::new())));
        assert_eq!(parse_command("size L"), Ok(Command::Size("L".to_string())));
        assert_eq!(parse_command("size"), Ok(Command::Size(String::new())));
        assert_eq!(
            parse_command("topping 3 on"),
            Ok(Command::Topping {
                id: "3".to_string(),
                selected: true
            })
        );
        assert_eq!(parse_command("quit\r"), Ok(Command::Quit));
        assert!(parse_command("topping 3").is_err());
        assert!(parse_command("topping 3 maybe").is_err());
        assert!(parse_command("order").is_err());
    }

    #[test]
    fn values_are_passed_through_untrimmed() {
        assert_eq!(
            parse_command("name   Al  "),
            Ok(Command::Name("  Al  ".to_string()))
        );
        assert_eq!(parse_command("size  M"), Ok(Command::Size(" M".to_string())));
    }

    #[tokio::test]
    async fn padded_size_is_stored_as_typed() {
        let gw = ScriptedGateway::new();
        let out = session(&gw, "name Alice Smith\nsize  M\nsubmit\n")
            .await
            .unwrap();

        // " M" passes the trimmed field rule but not the whole-draft check.
        let last = out.rsplit("== Order Your Pizza ==").next().unwrap();
        assert!(last.contains("Size: <invalid>"));
        assert!(!last.contains("  ! size"));
        assert!(last.contains("[ Submit ] (disabled)\n"));
        assert!(out.contains("? submit disabled"));
        assert_eq!(gw.calls(), 0);
    }

    #[tokio::test]
    async fn fill_and_submit_resets_form_with_banner() {
        let gw = ScriptedGateway::new().then_success("Order placed");
        let out = session(
            &gw,
            "name Alice Smith\nsize M\ntopping 1 on\ntopping 5 on\ntopping 1 off\nsubmit\nquit\n",
        )
        .await
        .unwrap();

        let sent = gw.submitted();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].full_name, "Alice Smith");
        assert_eq!(sent[0].size, "M");
        assert_eq!(sent[0].toppings.iter().collect::<Vec<_>>(), vec!["5"]);

        // Last render: banner shown, draft cleared, submit disabled again.
        let last = out.rsplit("== Order Your Pizza ==").next().unwrap();
        assert!(last.contains("[success] Order placed\n"));
        assert!(last.contains("Full Name: <Type full name>\n"));
        assert!(last.contains("[ Submit ] (disabled)\n"));
    }

    #[tokio::test]
    async fn disabled_submit_and_bad_input_keep_session_alive() {
        let gw = ScriptedGateway::new();
        let out = session(&gw, "name Al\nsubmit\ntopping 9 on\nbake\nshow\n")
            .await
            .unwrap();

        assert!(out.contains("? submit disabled"));
        assert!(out.contains("? unknown topping '9'"));
        assert!(out.contains("? unknown command 'bake'"));
        assert!(out.contains("  ! full name must be at least 3 characters\n"));
        assert_eq!(gw.calls(), 0);
    }

    #[tokio::test]
    async fn gateway_fault_ends_session() {
        let gw = ScriptedGateway::new()
            .then(Err(GatewayError::Transport("connection refused".to_string())));
        let err = session(&gw, "name Alice Smith\nsize L\nsubmit\nshow\n")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
