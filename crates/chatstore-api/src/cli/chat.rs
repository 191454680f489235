//! Chat CLI commands: create, show, delete.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use chatstore_api::state::AppState;

use super::Output;

/// Create a chat and print it.
///
/// ```bash
/// chatstore chat create "Weekend plans"
/// ```
pub async fn create_chat(state: &AppState, title: &str, output: Output) -> Result<()> {
    let chat = state.chat_service.create_chat(title).await?;

    match output {
        Output::Quiet => return Ok(()),
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&chat)?);
            return Ok(());
        }
        Output::Styled => {}
    }

    println!();
    println!(
        "  {} Created chat {} {}",
        style("✓").green().bold(),
        style(format!("#{}", chat.id)).cyan(),
        style(&chat.title).bold()
    );
    println!();
    Ok(())
}

/// Show a chat and its most recent messages, oldest first.
pub async fn show_chat(state: &AppState, id: i64, limit: i64, output: Output) -> Result<()> {
    let view = state.chat_service.get_chat_with_messages(id, limit).await?;

    match output {
        Output::Quiet => return Ok(()),
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }
        Output::Styled => {}
    }

    println!();
    println!(
        "  {} {}",
        style(format!("#{}", view.chat.id)).cyan(),
        style(&view.chat.title).bold()
    );
    println!(
        "  {}",
        style(format!("created {}", view.chat.created_at.format("%Y-%m-%d %H:%M:%S UTC"))).dim()
    );
    println!();

    if view.messages.is_empty() {
        println!(
            "  {} No messages yet. Post one with: {}",
            style("i").blue().bold(),
            style(format!("chatstore message post {} \"...\"", view.chat.id)).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Sent").fg(Color::White),
        Cell::new("Text").fg(Color::White),
    ]);

    for message in &view.messages {
        table.add_row(vec![
            Cell::new(message.id).fg(Color::DarkGrey),
            Cell::new(message.created_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(&message.text),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

/// Delete a chat; its messages go with it.
pub async fn delete_chat(state: &AppState, id: i64, output: Output) -> Result<()> {
    state.chat_service.delete_chat(id).await?;

    match output {
        Output::Quiet => {}
        Output::Json => println!("{}", serde_json::json!({ "deleted": id })),
        Output::Styled => {
            println!();
            println!(
                "  {} Deleted chat {}",
                style("✓").green().bold(),
                style(format!("#{id}")).cyan()
            );
            println!();
        }
    }
    Ok(())
}
