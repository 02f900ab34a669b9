// crates/cheetah-cli/src/commands/sheets.rs - Sheet management

use anyhow::Result;
use cheetah_core::StoreError;

use crate::context::Context;
use crate::output;

/// `sheets`: list available sheets
pub fn show(ctx: &Context) -> Result<()> {
    let registry = ctx.session.registry();
    let sheets = registry.list_sheets();

    if sheets.is_empty() {
        output::plain(format!("\nNo sheets found in {}", registry.vault_path().display()));
        return Ok(());
    }

    output::plain("\nAvailable sheets:");
    for sheet in sheets {
        output::plain(format!("    - {sheet}"));
    }
    Ok(())
}

/// `cheetah sheets`: bare names, one per line, for scripts
pub fn print_names(ctx: &Context) -> Result<()> {
    for sheet in ctx.session.registry().list_sheets() {
        println!("{sheet}");
    }
    Ok(())
}

/// `create <sheet>`: create a sheet and switch to it
pub fn create(ctx: &mut Context, args: &str) -> Result<()> {
    if args.is_empty() {
        output::bad_input("Error: specify the name of the sheet.");
        return Ok(());
    }

    let sheet = ctx.session.create_sheet(args)?;
    output::success(format!("\nCreated sheet '{sheet}'."));
    Ok(())
}

/// `<sheet>`: switch to an existing sheet
pub fn select(ctx: &mut Context, name: &str) -> Result<()> {
    match ctx.session.select_sheet(name) {
        Ok(sheet) => {
            output::success(format!("\nSwitched to {sheet} sheet."));
            Ok(())
        }
        Err(StoreError::SheetNotFound(_)) => {
            output::bad_input(format!("Error: sheet '{name}' does not exist."));
            show(ctx)
        }
        Err(err) => Err(err.into()),
    }
}
