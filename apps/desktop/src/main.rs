use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    FailurePolicy, HeadlessForm, HttpBackendClient, SubmissionController, SubmitOutcome,
};
use shared::domain::{Task, TaskId, TaskStatus};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:8443")]
    server_url: String,
    /// Write failures into the output instead of keeping the previous result.
    #[arg(long)]
    show_errors: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one name and print the greeting.
    Greet { name: String },
    /// Submit every line read from stdin.
    Interactive,
    AddTask {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "todo")]
        status: TaskStatus,
    },
    ListTasks {
        #[arg(long)]
        page: Option<u64>,
        #[arg(long, default_value_t = 10)]
        page_size: u64,
    },
    SetStatus {
        task_id: u64,
        status: TaskStatus,
    },
    SetDescription {
        task_id: u64,
        description: String,
    },
    DeleteTask {
        task_id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    let client = Arc::new(HttpBackendClient::new(&cli.server_url)?);
    let failure_policy = if cli.show_errors {
        FailurePolicy::ShowError
    } else {
        FailurePolicy::KeepOutput
    };

    match cli.command {
        Command::Greet { name } => {
            let form = Arc::new(HeadlessForm::with_input(name));
            let controller = SubmissionController::new(client, form.clone())
                .with_failure_policy(failure_policy);
            submit(&form, &controller).await?;
        }
        Command::Interactive => {
            let form = Arc::new(HeadlessForm::new());
            let controller = SubmissionController::new(client, form.clone())
                .with_failure_policy(failure_policy);
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                form.set_input(line);
                if let Err(err) = submit(&form, &controller).await {
                    warn!(error = %err, "submission failed");
                }
            }
        }
        Command::AddTask {
            title,
            description,
            status,
        } => {
            let task_id = client
                .add_task(&Task {
                    title,
                    description,
                    status,
                })
                .await?;
            println!("created task_id={task_id}");
        }
        Command::ListTasks { page, page_size } => {
            let (first_id, tasks) = match page {
                Some(page_no) => (
                    page_no.saturating_sub(1) * page_size + 1,
                    client.list_tasks_page(page_no, page_size).await?,
                ),
                None => (1, client.list_tasks().await?),
            };
            for (task_id, task) in (first_id..).zip(tasks) {
                println!(
                    "{task_id}\t[{}]\t{}\t{}",
                    task.status, task.title, task.description
                );
            }
        }
        Command::SetStatus { task_id, status } => {
            client.change_task_status(TaskId(task_id), status).await?;
            println!("done.");
        }
        Command::SetDescription {
            task_id,
            description,
        } => {
            client
                .update_task_description(TaskId(task_id), &description)
                .await?;
            println!("done.");
        }
        Command::DeleteTask { task_id } => {
            client.delete_task(TaskId(task_id)).await?;
            println!("done.");
        }
    }

    Ok(())
}

async fn submit(form: &HeadlessForm, controller: &SubmissionController) -> Result<()> {
    let outcome = form.dispatch_submit(controller).await;
    let output = form.result_text();
    match outcome {
        Ok(SubmitOutcome::Rendered(_)) => println!("{output}"),
        Ok(SubmitOutcome::Refused) => warn!("submit refused while a call is pending"),
        Err(err) => {
            if !output.is_empty() {
                println!("{output}");
            }
            return Err(err.into());
        }
    }
    Ok(())
}
