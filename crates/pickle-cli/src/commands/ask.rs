use clap::Parser;
use pickle_server::{
    answer::LocalAnswerEngine,
    config::Config,
    oracle::{Answer, FallbackReason, HybridAnswerer},
    storage::{JsonStore, MemoryFilter},
};

use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct AskCommand {
    #[clap(help = "Question about your memories")]
    pub question: String,

    #[clap(long, short, help = "Only use memories containing this text as evidence")]
    pub search: Option<String>,

    #[clap(long, help = "Skip the remote model and answer with the local engine")]
    pub local: bool,
}

impl AskCommand {
    pub async fn execute(
        &self,
        store: &JsonStore,
        config: &Config,
        user_id: &str,
        format: OutputFormat,
    ) -> CliResult<()> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err("Question cannot be empty".into());
        }

        let mut filter = MemoryFilter::for_user(user_id);
        if let Some(ref search) = self.search {
            filter = filter.with_search(search.as_str());
        }
        let memories = store.list(&filter);
        tracing::debug!("Asking with {} memories as evidence", memories.len());

        let answer = if self.local {
            HybridAnswerer::local_only(LocalAnswerEngine::new(&config.answer)).answer_locally(
                question,
                &memories,
                FallbackReason::RemoteDisabled,
            )
        } else {
            HybridAnswerer::from_config(config)
                .ask(question, &memories)
                .await
        };

        print_answer(&answer, format)
    }
}

fn print_answer(answer: &Answer, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "answer": &answer.text,
                "source": answer.source.label(),
                "notice": answer.notice(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            if let Some(notice) = answer.notice() {
                eprintln!("note: {notice}");
            }
            println!("{}", answer.text);
            if answer.is_empty_store() {
                println!("\nSave something first with `pickle-cli memory add`.");
            }
        }
    }

    Ok(())
}
