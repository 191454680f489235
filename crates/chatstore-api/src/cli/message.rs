//! Message CLI commands.

use anyhow::Result;
use console::style;

use chatstore_api::state::AppState;

use super::Output;

/// Post a message into an existing chat.
pub async fn post_message(state: &AppState, chat_id: i64, text: &str, output: Output) -> Result<()> {
    let message = state.chat_service.create_message(chat_id, text).await?;

    match output {
        Output::Quiet => {}
        Output::Json => println!("{}", serde_json::to_string_pretty(&message)?),
        Output::Styled => {
            println!();
            println!(
                "  {} Posted message {} to chat {}",
                style("✓").green().bold(),
                style(format!("#{}", message.id)).dim(),
                style(format!("#{}", message.chat_id)).cyan()
            );
            println!();
        }
    }
    Ok(())
}
