//! Apply a sequence of commands to a fresh storefront.

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use storefront_core::command::{Command, Outcome};
use storefront_core::handle::StorefrontHandle;
use storefront_core::StorefrontSnapshot;

use super::RunArgs;
use crate::context::Context;
use crate::output::outcome_badge;

#[derive(Serialize)]
struct Step {
    command: Command,
    #[serde(flatten)]
    outcome: Outcome,
}

#[derive(Serialize)]
struct Report {
    steps: Vec<Step>,
    state: StorefrontSnapshot,
}

/// Run the run command.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let script = match args.script {
        Some(ref path) => {
            let resolved = ctx.resolve_path(path);
            std::fs::read_to_string(&resolved)
                .with_context(|| format!("Failed to read script: {}", resolved.display()))?
        }
        None => String::new(),
    };

    let commands = parse_commands(&command_lines(&script, &args.commands))?;
    if commands.is_empty() {
        ctx.output.warn("No commands given");
    }

    let handle = StorefrontHandle::spawn(ctx.storefront()?);

    ctx.output.header("Applying commands");
    let total = commands.len();
    let mut steps = Vec::with_capacity(total);
    for (i, command) in commands.into_iter().enumerate() {
        let outcome = handle.apply(command).await?;
        let line = format!("{command} {}", outcome_badge(&outcome));
        ctx.output.step(i + 1, total, &line);

        let ignored = !outcome.is_applied();
        steps.push(Step { command, outcome });
        if ignored && args.strict {
            bail!("Stopped at ignored command: {command}");
        }
    }

    let state = handle.snapshot().await?;
    handle.shutdown().await?;

    if ctx.output.is_json() {
        ctx.output.json(&Report { steps, state });
        return Ok(());
    }

    ctx.output.header("Cart");
    if state.cart.is_empty() {
        ctx.output.info("Cart is empty");
    } else {
        ctx.output.products(&state.cart, true);
    }
    ctx.output.blank();
    ctx.output.kv("items", &state.item_count.to_string());
    ctx.output.totals(&state.totals);

    ctx.output.debug(&format!("Detail product: {}", state.selected_product.title));
    if state.modal_open {
        ctx.output.debug(&format!("Modal open on: {}", state.modal_product.title));
    }

    let applied = steps.iter().filter(|s| s.outcome.is_applied()).count();
    ctx.output
        .success(&format!("{} of {} commands applied", applied, steps.len()));

    Ok(())
}

/// Command lines from a script, skipping blanks and `#` comments.
fn script_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Script lines first, then the positional commands.
fn command_lines<'a>(script: &'a str, commands: &'a [String]) -> Vec<&'a str> {
    script_lines(script)
        .chain(commands.iter().map(String::as_str))
        .collect()
}

fn parse_commands(lines: &[&str]) -> Result<Vec<Command>> {
    lines
        .iter()
        .map(|line| {
            line.parse::<Command>()
                .with_context(|| format!("Invalid command: {}", line))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ProductId;

    #[test]
    fn test_script_lines_skip_comments_and_blanks() {
        let script = "# warm up\nadd:1\n\n   inc:1  \n# done\nclose\n";
        let lines: Vec<&str> = script_lines(script).collect();
        assert_eq!(lines, vec!["add:1", "inc:1", "close"]);
    }

    #[test]
    fn test_command_lines_put_script_first() {
        let script = String::from("add:1\n# bump\ninc:1\n");
        let positional = vec!["dec:1".to_string(), "close".to_string()];
        let lines = command_lines(&script, &positional);
        assert_eq!(lines, vec!["add:1", "inc:1", "dec:1", "close"]);
        assert!(command_lines("", &[]).is_empty());
    }

    #[test]
    fn test_parse_commands() {
        let commands = parse_commands(&["add:2", "dec:2", "clear"]).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::AddToCart(ProductId::new(2)),
                Command::Decrement(ProductId::new(2)),
                Command::ClearCart,
            ]
        );
    }

    #[test]
    fn test_parse_commands_reports_bad_line() {
        let err = parse_commands(&["add:1", "buy:1"]).unwrap_err();
        assert!(format!("{:#}", err).contains("buy:1"));
    }
}
