//! Application lifecycle commands.

use futures::FutureExt;

use crate::registry::{ArgSpec, CommandContext, CommandResult, CommandSpec};

pub fn launch() -> CommandSpec {
    CommandSpec {
        name: "launch",
        usage: "launch <app>",
        description: "Launch an app",
        args: vec![ArgSpec::positional("app")],
        needs_accessibility: true,
        handler: |ctx| run_launch(ctx).boxed(),
    }
}

async fn run_launch(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    ctx.automation.launch_app(app).await?;
    println!("\"{app}\" launched");
    Ok(0)
}

pub fn quit() -> CommandSpec {
    CommandSpec {
        name: "quit",
        usage: "quit <app> [--force]",
        description: "Quit an app (--force skips save dialogs)",
        args: vec![ArgSpec::positional("app"), ArgSpec::flag("force")],
        needs_accessibility: true,
        handler: |ctx| run_quit(ctx).boxed(),
    }
}

async fn run_quit(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    ctx.automation.quit_app(app, ctx.has("force")).await?;
    println!("\"{app}\" quit");
    Ok(0)
}

pub fn status() -> CommandSpec {
    CommandSpec {
        name: "status",
        usage: "status <app>",
        description: "Check whether an app is running (exit code 0 = yes)",
        args: vec![ArgSpec::positional("app")],
        needs_accessibility: true,
        handler: |ctx| run_status(ctx).boxed(),
    }
}

async fn run_status(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    if ctx.automation.is_running(app).await? {
        println!("\"{app}\" is running");
        Ok(0)
    } else {
        println!("\"{app}\" is not running");
        Ok(1)
    }
}

pub fn info() -> CommandSpec {
    CommandSpec {
        name: "info",
        usage: "info <app>",
        description: "Show an app's bundle id, path, and state",
        args: vec![ArgSpec::positional("app")],
        needs_accessibility: true,
        handler: |ctx| run_info(ctx).boxed(),
    }
}

async fn run_info(ctx: CommandContext) -> CommandResult {
    let app = ctx.require("app")?;
    let info = ctx.automation.app_info(app).await?;
    println!("Name:      {}", info.name);
    println!("Bundle ID: {}", info.bundle_id);
    println!("Path:      {}", info.path);
    println!("Running:   {}", if info.running { "yes" } else { "no" });
    Ok(0)
}

pub fn list() -> CommandSpec {
    CommandSpec {
        name: "list",
        usage: "list",
        description: "List running GUI apps",
        args: vec![],
        needs_accessibility: true,
        handler: |ctx| run_list(ctx).boxed(),
    }
}

async fn run_list(ctx: CommandContext) -> CommandResult {
    let apps = ctx.automation.list_running_apps().await?;
    println!("Running apps ({}):\n", apps.len());
    for app in &apps {
        println!("  {app}");
    }
    Ok(0)
}
