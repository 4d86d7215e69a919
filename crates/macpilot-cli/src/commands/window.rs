//! Window geometry and focus commands.

use futures::FutureExt;

use crate::registry::{ArgSpec, CommandContext, CommandResult, CommandSpec};

pub fn window() -> CommandSpec {
    CommandSpec {
        name: "window",
        usage: "window <app> [--index N]",
        description: "Show a window's position and size",
        args: vec![
            ArgSpec::positional("app"),
            ArgSpec::option_with_default("index", "1"),
        ],
        needs_accessibility: true,
        handler: |ctx| run_window(ctx).boxed(),
    }
}

async fn run_window(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let index: usize = ctx.require_parse("index")?;
    let bounds = ctx.automation.window_bounds(app, index).await?;
    println!("\"{app}\" window {index}:");
    println!("  position: ({}, {})", bounds.x, bounds.y);
    println!("  size:     {} x {}", bounds.width, bounds.height);
    Ok(0)
}

pub fn windows() -> CommandSpec {
    CommandSpec {
        name: "windows",
        usage: "windows <app>",
        description: "List all windows of an app",
        args: vec![ArgSpec::positional("app")],
        needs_accessibility: true,
        handler: |ctx| run_windows(ctx).boxed(),
    }
}

async fn run_windows(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let windows = ctx.automation.list_windows(app).await?;
    if windows.is_empty() {
        println!("\"{app}\" has no open windows");
        return Ok(0);
    }
    println!("\"{app}\" windows ({}):\n", windows.len());
    for window in &windows {
        println!(
            "  [{}] \"{}\" ({},{}) {}x{}{}",
            window.index,
            window.name,
            window.bounds.x,
            window.bounds.y,
            window.bounds.width,
            window.bounds.height,
            if window.visible { "" } else { " (hidden)" },
        );
    }
    Ok(0)
}

pub fn move_window() -> CommandSpec {
    CommandSpec {
        name: "move",
        usage: "move <app> --x N --y N",
        description: "Move an app's front window",
        args: vec![
            ArgSpec::positional("app"),
            ArgSpec::option("x"),
            ArgSpec::option("y"),
        ],
        needs_accessibility: true,
        handler: |ctx| run_move(ctx).boxed(),
    }
}

async fn run_move(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let x: i32 = ctx.require_parse("x")?;
    let y: i32 = ctx.require_parse("y")?;
    ctx.automation
        .set_window_bounds(app, Some((x, y)), None, 1)
        .await?;
    println!("Moved \"{app}\" window to ({x}, {y})");
    Ok(0)
}

pub fn resize() -> CommandSpec {
    CommandSpec {
        name: "resize",
        usage: "resize <app> --w N --h N",
        description: "Resize an app's front window",
        args: vec![
            ArgSpec::positional("app"),
            ArgSpec::option("w"),
            ArgSpec::option("h"),
        ],
        needs_accessibility: true,
        handler: |ctx| run_resize(ctx).boxed(),
    }
}

async fn run_resize(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let width: i32 = ctx.require_parse("w")?;
    let height: i32 = ctx.require_parse("h")?;
    ctx.automation
        .set_window_bounds(app, None, Some((width, height)), 1)
        .await?;
    println!("Resized \"{app}\" window to {width}x{height}");
    Ok(0)
}

pub fn focus() -> CommandSpec {
    CommandSpec {
        name: "focus",
        usage: "focus <app> [--index N]",
        description: "Raise and focus a window",
        args: vec![
            ArgSpec::positional("app"),
            ArgSpec::option_with_default("index", "1"),
        ],
        needs_accessibility: true,
        handler: |ctx| run_focus(ctx).boxed(),
    }
}

async fn run_focus(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let index: usize = ctx.require_parse("index")?;
    ctx.automation.focus_window(app, index).await?;
    println!("Focused \"{app}\" window {index}");
    Ok(0)
}
