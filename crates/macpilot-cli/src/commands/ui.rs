//! UI interaction commands.

use futures::FutureExt;
use macpilot::UIElement;

use crate::registry::{ArgSpec, CommandContext, CommandResult, CommandSpec};

pub fn click() -> CommandSpec {
    CommandSpec {
        name: "click",
        usage: "click <app> --button <name>",
        description: "Click a button in an app's front window",
        args: vec![ArgSpec::positional("app"), ArgSpec::option("button")],
        needs_accessibility: true,
        handler: |ctx| run_click(ctx).boxed(),
    }
}

async fn run_click(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let button = ctx.require("button")?;
    ctx.automation.click_button(app, button, 1).await?;
    println!("Clicked \"{button}\" in \"{app}\"");
    Ok(0)
}

pub fn menu() -> CommandSpec {
    CommandSpec {
        name: "menu",
        usage: "menu <app> --menu <name> --item <name>",
        description: "Click a menu bar item",
        args: vec![
            ArgSpec::positional("app"),
            ArgSpec::option("menu"),
            ArgSpec::option("item"),
        ],
        needs_accessibility: true,
        handler: |ctx| run_menu(ctx).boxed(),
    }
}

async fn run_menu(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let menu = ctx.require("menu")?;
    let item = ctx.require("item")?;
    ctx.automation.click_menu_item(app, menu, item).await?;
    println!("Clicked \"{menu}\" > \"{item}\" in \"{app}\"");
    Ok(0)
}

pub fn type_field() -> CommandSpec {
    CommandSpec {
        name: "type-field",
        usage: "type-field <app> --field N --text <text>",
        description: "Set the value of a text field",
        args: vec![
            ArgSpec::positional("app"),
            ArgSpec::option_with_default("field", "1"),
            ArgSpec::option("text"),
        ],
        needs_accessibility: true,
        handler: |ctx| run_type_field(ctx).boxed(),
    }
}

async fn run_type_field(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let field: usize = ctx.require_parse("field")?;
    let text = ctx.require("text")?;
    ctx.automation.type_in_field(app, field, text, 1).await?;
    println!("Typed into text field {field} of \"{app}\"");
    Ok(0)
}

pub fn keystroke() -> CommandSpec {
    CommandSpec {
        name: "keystroke",
        usage: "keystroke <key> [--mod command,shift]",
        description: "Send a keystroke via System Events",
        args: vec![ArgSpec::positional("key"), ArgSpec::optional("mod")],
        needs_accessibility: true,
        handler: |ctx| run_keystroke(ctx).boxed(),
    }
}

async fn run_keystroke(ctx: CommandContext) -> CommandResult {
    let key = ctx.require("key")?;
    let modifiers: Vec<String> = ctx
        .get("mod")
        .map(|raw| raw.split(',').map(|m| m.trim().to_string()).collect())
        .unwrap_or_default();
    ctx.automation.keystroke(key, &modifiers).await?;
    if modifiers.is_empty() {
        println!("Keystroke: \"{key}\"");
    } else {
        println!("Keystroke: \"{key}\" + {}", modifiers.join("+"));
    }
    Ok(0)
}

pub fn type_text() -> CommandSpec {
    CommandSpec {
        name: "type",
        usage: "type --text <text>",
        description: "Type literal text into the focused app",
        args: vec![ArgSpec::option("text")],
        needs_accessibility: true,
        handler: |ctx| run_type_text(ctx).boxed(),
    }
}

async fn run_type_text(ctx: CommandContext) -> CommandResult {
    let text = ctx.require("text")?;
    ctx.automation.type_text(text)?;
    println!("Typed: \"{text}\"");
    Ok(0)
}

pub fn mouse_click() -> CommandSpec {
    CommandSpec {
        name: "mouse-click",
        usage: "mouse-click --x N --y N",
        description: "Click at absolute screen coordinates",
        args: vec![ArgSpec::option("x"), ArgSpec::option("y")],
        needs_accessibility: true,
        handler: |ctx| run_mouse_click(ctx).boxed(),
    }
}

async fn run_mouse_click(ctx: CommandContext) -> CommandResult {
    let x: i32 = ctx.require_parse("x")?;
    let y: i32 = ctx.require_parse("y")?;
    ctx.automation.mouse_click(x, y)?;
    println!("Clicked at ({x}, {y})");
    Ok(0)
}

pub fn elements() -> CommandSpec {
    CommandSpec {
        name: "elements",
        usage: "elements <app> [--depth N]",
        description: "Show the UI element tree (depth caps at 2)",
        args: vec![
            ArgSpec::positional("app"),
            ArgSpec::option_with_default("depth", "2"),
        ],
        needs_accessibility: true,
        handler: |ctx| run_elements(ctx).boxed(),
    }
}

async fn run_elements(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let depth: usize = ctx.require_parse("depth")?;
    let elements = ctx.automation.ui_elements(app, 1, depth).await?;
    println!("\"{app}\" UI elements:\n");
    for element in &elements {
        println!("  {}", element_label(element));
        if let Some(children) = &element.children {
            for child in children {
                println!("    {}", element_label(child));
            }
        }
    }
    Ok(0)
}

fn element_label(element: &UIElement) -> String {
    [
        element.role.as_str(),
        element.name.as_str(),
        element.description.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" | ")
}
