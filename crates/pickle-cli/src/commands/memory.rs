use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use pickle_server::{
    memory::types::{DEFAULT_IMPORTANCE, clamp_importance},
    storage::{JsonStore, MemoryFilter},
};
use uuid::Uuid;

use crate::error::CliResult;
use crate::output::{OutputFormat, format_timestamp, truncate_string};

#[derive(Parser)]
pub struct MemoryCommand {
    #[clap(subcommand)]
    pub command: MemorySubcommand,
}

#[derive(Subcommand)]
pub enum MemorySubcommand {
    #[clap(about = "Save a new memory")]
    Add(AddArgs),

    #[clap(about = "List saved memories, newest first")]
    List(ListArgs),

    #[clap(about = "Delete a memory")]
    Delete(DeleteArgs),
}

#[derive(Parser)]
pub struct AddArgs {
    #[clap(help = "What to remember")]
    pub text: String,

    #[clap(
        long,
        short,
        default_value_t = DEFAULT_IMPORTANCE as i64,
        allow_negative_numbers = true,
        help = "Importance from 1 (low) to 5 (high); out-of-range values are clamped"
    )]
    pub importance: i64,
}

#[derive(Parser)]
pub struct ListArgs {
    #[clap(long, short, help = "Only memories containing this text")]
    pub search: Option<String>,

    #[clap(long, short, help = "Maximum number of memories to display")]
    pub limit: Option<usize>,
}

#[derive(Parser)]
pub struct DeleteArgs {
    #[clap(help = "Memory ID to delete (UUID format)")]
    pub id: String,
}

impl MemoryCommand {
    pub async fn execute(
        &self,
        store: &mut JsonStore,
        user_id: &str,
        format: OutputFormat,
    ) -> CliResult<()> {
        match &self.command {
            MemorySubcommand::Add(args) => Self::add(store, user_id, args, format).await,
            MemorySubcommand::List(args) => Self::list(store, user_id, args, format),
            MemorySubcommand::Delete(args) => Self::delete(store, user_id, args, format).await,
        }
    }

    async fn add(
        store: &mut JsonStore,
        user_id: &str,
        args: &AddArgs,
        format: OutputFormat,
    ) -> CliResult<()> {
        let memory = store
            .insert(user_id, &args.text, clamp_importance(args.importance))
            .await?;

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "id": memory.id.to_string(),
                    "text": &memory.text,
                    "importance": memory.importance,
                    "created_at": memory.created_at.to_rfc3339(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("Memory saved. 🥒");
                println!("ID: {}", memory.id);
            }
        }

        Ok(())
    }

    fn list(store: &JsonStore, user_id: &str, args: &ListArgs, format: OutputFormat) -> CliResult<()> {
        let mut filter = MemoryFilter::for_user(user_id);
        if let Some(ref search) = args.search {
            filter = filter.with_search(search.as_str());
        }
        if let Some(limit) = args.limit {
            filter = filter.with_limit(limit);
        }

        let memories = store.list(&filter);

        match format {
            OutputFormat::Json => {
                let output: Vec<_> = memories
                    .iter()
                    .map(|m| {
                        serde_json::json!({
                            "id": m.id.to_string(),
                            "text": &m.text,
                            "importance": m.importance,
                            "created_at": m.created_at.to_rfc3339(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if memories.is_empty() {
                    if filter.has_search() {
                        println!("No memories match that search.");
                    } else {
                        println!("No memories yet. Add one with `pickle-cli memory add`.");
                    }
                    return Ok(());
                }

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["ID", "Saved", "Importance", "Memory"]);

                for memory in &memories {
                    table.add_row([
                        truncate_string(&memory.id.to_string(), 8),
                        format_timestamp(&memory.created_at),
                        "⭐".repeat(memory.importance as usize),
                        truncate_string(&memory.text, 60),
                    ]);
                }

                println!("{table}");
                println!(
                    "\nShowing {} of {} memories",
                    memories.len(),
                    store.count(user_id)
                );
            }
        }

        Ok(())
    }

    async fn delete(
        store: &mut JsonStore,
        user_id: &str,
        args: &DeleteArgs,
        format: OutputFormat,
    ) -> CliResult<()> {
        let id = Uuid::parse_str(&args.id).map_err(|e| format!("Invalid UUID format: {e}"))?;

        if !store.delete(user_id, id).await? {
            return Err(format!("Memory not found: {}", args.id).into());
        }

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "id": args.id,
                    "deleted": true,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("Memory {} deleted successfully.", args.id);
            }
        }

        Ok(())
    }
}
