//! Command declarations, argument parsing, and dispatch.
//!
//! The registry is a plain table built once at startup and handed to the
//! entry point as a value; nothing registers into globals.

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Context;
use futures::future::BoxFuture;
use thiserror::Error;

use macpilot::Automation;

/// How one argument is supplied on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Filled from bare tokens, in declaration order.
    Positional,
    /// `--name`, boolean presence.
    Flag,
    /// `--name <value>`.
    Option,
}

/// Declaration of one command argument.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
    pub default: Option<&'static str>,
}

impl ArgSpec {
    pub const fn positional(name: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Positional,
            required: true,
            default: None,
        }
    }

    pub const fn flag(name: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Flag,
            required: false,
            default: None,
        }
    }

    pub const fn option(name: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Option,
            required: true,
            default: None,
        }
    }

    pub const fn option_with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Option,
            required: false,
            default: Some(default),
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Option,
            required: false,
            default: None,
        }
    }
}

/// A resolved argument value. Absence is a missing map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Switch,
}

/// Everything a handler gets for one invocation. Built per dispatch and
/// dropped when the handler returns.
pub struct CommandContext {
    pub automation: Automation,
    args: HashMap<String, ArgValue>,
    raw: Vec<String>,
}

impl CommandContext {
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.args.get(name) {
            Some(ArgValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether a flag (or any argument) was supplied.
    pub fn has(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// String argument that dispatch has already validated as present.
    pub fn require(&self, name: &str) -> anyhow::Result<&str> {
        self.get(name)
            .with_context(|| format!("missing value for --{name}"))
    }

    /// Parsed argument, e.g. a coordinate or a window index.
    pub fn require_parse<T>(&self, name: &str) -> anyhow::Result<T>
    where
        T: FromStr,
    {
        let raw = self.require(name)?;
        raw.trim()
            .parse()
            .ok()
            .with_context(|| format!("--{name} must be a number, got \"{raw}\""))
    }

    /// The unparsed token sequence, verbatim.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }
}

pub type CommandResult = anyhow::Result<i32>;
pub type Handler = fn(CommandContext) -> BoxFuture<'static, CommandResult>;

/// Declaration of one command: identity, argument schema, capability
/// flag, and handler. Immutable once the registry is built.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub args: Vec<ArgSpec>,
    pub needs_accessibility: bool,
    pub handler: Handler,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {usage}")]
    MissingArgument { usage: &'static str },

    #[error("accessibility permission is not granted")]
    AccessibilityDenied,

    #[error(transparent)]
    Command(#[from] anyhow::Error),
}

/// Resolve raw tokens against declared arguments.
///
/// Declared flags set a switch; declared options consume the following
/// token as their value. An undeclared `--name` is still captured — the
/// following token when it is not itself a `--name`, a switch otherwise —
/// so newer callers can pass arguments older builds do not declare. Bare
/// tokens fill positional slots in declaration order and extras are
/// ignored. Defaults apply to whatever is still unset afterwards.
pub fn parse_args(specs: &[ArgSpec], tokens: &[String]) -> HashMap<String, ArgValue> {
    let mut args = HashMap::new();
    let positionals: Vec<&ArgSpec> = specs
        .iter()
        .filter(|spec| spec.kind == ArgKind::Positional)
        .collect();
    let mut next_positional = 0;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if let Some(name) = token.strip_prefix("--") {
            let declared = specs
                .iter()
                .find(|spec| spec.name == name && spec.kind != ArgKind::Positional);
            match declared {
                Some(spec) if spec.kind == ArgKind::Flag => {
                    args.insert(spec.name.to_string(), ArgValue::Switch);
                }
                Some(spec) => {
                    i += 1;
                    if let Some(value) = tokens.get(i) {
                        args.insert(spec.name.to_string(), ArgValue::Text(value.clone()));
                    }
                }
                None => match tokens.get(i + 1) {
                    Some(next) if !next.starts_with("--") => {
                        args.insert(name.to_string(), ArgValue::Text(next.clone()));
                        i += 1;
                    }
                    _ => {
                        args.insert(name.to_string(), ArgValue::Switch);
                    }
                },
            }
        } else if let Some(spec) = positionals.get(next_positional) {
            args.insert(spec.name.to_string(), ArgValue::Text(token.clone()));
            next_positional += 1;
        }
        i += 1;
    }

    for spec in specs {
        if let Some(default) = spec.default {
            args.entry(spec.name.to_string())
                .or_insert_with(|| ArgValue::Text(default.to_string()));
        }
    }

    args
}

/// Name-keyed command table.
pub struct Registry {
    commands: Vec<CommandSpec>,
}

impl Registry {
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|command| command.name == name)
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Column-aligned listing of every command's usage and description.
    pub fn usage_listing(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|command| command.usage.len())
            .max()
            .unwrap_or(0);

        let mut lines = vec![
            "macpilot - macOS application automation".to_string(),
            String::new(),
            "Usage: macpilot <command> [options]".to_string(),
            String::new(),
            "Commands:".to_string(),
        ];
        for command in &self.commands {
            lines.push(format!(
                "  {usage:width$}    {description}",
                usage = command.usage,
                description = command.description,
            ));
        }
        lines.push(String::new());
        lines.push("Options:".to_string());
        lines.push(format!("  {help:width$}    Show this help", help = "--help"));
        lines.join("\n")
    }

    /// Look up a command, gate on accessibility when flagged, parse and
    /// validate arguments, then run the handler. Returns the process
    /// exit code the handler chose.
    pub async fn dispatch(
        &self,
        automation: Automation,
        name: &str,
        tokens: &[String],
    ) -> Result<i32, CliError> {
        let command = self
            .get(name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;

        if command.needs_accessibility && !automation.check_accessibility().await {
            return Err(CliError::AccessibilityDenied);
        }

        let args = parse_args(&command.args, tokens);
        for spec in &command.args {
            if spec.required && !args.contains_key(spec.name) {
                return Err(CliError::MissingArgument {
                    usage: command.usage,
                });
            }
        }

        let ctx = CommandContext {
            automation,
            args,
            raw: tokens.to_vec(),
        };
        Ok((command.handler)(ctx).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn text(value: &str) -> ArgValue {
        ArgValue::Text(value.to_string())
    }

    #[test]
    fn empty_tokens_yield_exactly_the_default_map() {
        let specs = vec![
            ArgSpec::positional("app"),
            ArgSpec::option_with_default("depth", "2"),
            ArgSpec::flag("force"),
        ];
        let args = parse_args(&specs, &[]);
        assert_eq!(args.len(), 1);
        assert_eq!(args["depth"], text("2"));
    }

    #[test]
    fn explicit_values_leave_no_default_applied() {
        let specs = vec![
            ArgSpec::option_with_default("depth", "2"),
            ArgSpec::option_with_default("index", "1"),
        ];
        let args = parse_args(&specs, &tokens(&["--depth", "5", "--index", "3"]));
        assert_eq!(args["depth"], text("5"));
        assert_eq!(args["index"], text("3"));
    }

    #[test]
    fn positionals_fill_in_order_around_options() {
        let specs = vec![
            ArgSpec::positional("a"),
            ArgSpec::positional("b"),
            ArgSpec::optional("opt"),
        ];
        let args = parse_args(&specs, &tokens(&["x", "--opt", "v", "y"]));
        assert_eq!(args["a"], text("x"));
        assert_eq!(args["b"], text("y"));
        assert_eq!(args["opt"], text("v"));
    }

    #[test]
    fn excess_positionals_are_ignored() {
        let specs = vec![ArgSpec::positional("only")];
        let args = parse_args(&specs, &tokens(&["one", "two", "three"]));
        assert_eq!(args.len(), 1);
        assert_eq!(args["only"], text("one"));
    }

    #[test]
    fn declared_flag_does_not_eat_the_next_token() {
        let specs = vec![ArgSpec::positional("app"), ArgSpec::flag("force")];
        let args = parse_args(&specs, &tokens(&["--force", "Notes"]));
        assert_eq!(args["force"], ArgValue::Switch);
        assert_eq!(args["app"], text("Notes"));
    }

    #[test]
    fn undeclared_name_captures_a_following_value() {
        let args = parse_args(&[], &tokens(&["--mode", "fast"]));
        assert_eq!(args["mode"], text("fast"));
    }

    #[test]
    fn undeclared_name_without_value_becomes_a_switch() {
        let args = parse_args(&[], &tokens(&["--verbose", "--mode", "fast"]));
        assert_eq!(args["verbose"], ArgValue::Switch);
        assert_eq!(args["mode"], text("fast"));
    }

    #[test]
    fn trailing_declared_option_without_value_falls_back_to_default() {
        let specs = vec![ArgSpec::option_with_default("depth", "2")];
        let args = parse_args(&specs, &tokens(&["--depth"]));
        assert_eq!(args["depth"], text("2"));
    }

    fn spec(name: &'static str, usage: &'static str, args: Vec<ArgSpec>) -> CommandSpec {
        CommandSpec {
            name,
            usage,
            description: "test command",
            args,
            needs_accessibility: false,
            handler: |ctx| {
                async move { Ok(i32::from(ctx.has("force"))) }.boxed()
            },
        }
    }

    #[tokio::test]
    async fn dispatch_rejects_unknown_commands() {
        let registry = Registry::new(vec![spec("launch", "launch <app>", vec![])]);
        match registry
            .dispatch(Automation::new(), "nope", &[])
            .await
        {
            Err(CliError::UnknownCommand(name)) => assert_eq!(name, "nope"),
            other => panic!("expected UnknownCommand, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dispatch_reports_usage_for_missing_required_arguments() {
        let registry = Registry::new(vec![spec(
            "move",
            "move <app> --x N --y N",
            vec![
                ArgSpec::positional("app"),
                ArgSpec::option("x"),
                ArgSpec::option("y"),
            ],
        )]);
        match registry
            .dispatch(Automation::new(), "move", &tokens(&["Finder"]))
            .await
        {
            Err(CliError::MissingArgument { usage }) => {
                assert_eq!(usage, "move <app> --x N --y N");
            }
            other => panic!("expected MissingArgument, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dispatch_runs_the_handler_with_parsed_arguments() {
        let registry = Registry::new(vec![spec(
            "quit",
            "quit <app> [--force]",
            vec![ArgSpec::positional("app"), ArgSpec::flag("force")],
        )]);
        let code = registry
            .dispatch(Automation::new(), "quit", &tokens(&["Notes", "--force"]))
            .await
            .unwrap();
        assert_eq!(code, 1);

        let code = registry
            .dispatch(Automation::new(), "quit", &tokens(&["Notes"]))
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn usage_listing_aligns_descriptions() {
        let registry = Registry::new(vec![
            spec("launch", "launch <app>", vec![]),
            spec("move", "move <app> --x N --y N", vec![]),
        ]);
        let listing = registry.usage_listing();
        let launch = listing
            .lines()
            .find(|line| line.contains("launch <app>"))
            .unwrap();
        let moved = listing
            .lines()
            .find(|line| line.contains("move <app>"))
            .unwrap();
        assert_eq!(
            launch.find("test command").unwrap(),
            moved.find("test command").unwrap()
        );
    }
}
