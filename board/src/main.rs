//! Scripted walkthrough of the todo board.
//!
//! Builds a store from environment configuration, replays a short session
//! (add, search, filter, paginate, edit, delete) and prints the rendered board
//! after each step.

use anyhow::Context;
use taskdeck_board::{
    BoardAction, BoardConfig, BoardEnvironment, BoardReducer, BoardState, Priority, Status,
    StatusFilter, TextView, TodoCollection,
};
use taskdeck_runtime::Store;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoardStore = Store<BoardState, BoardAction, BoardEnvironment, BoardReducer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,taskdeck=debug,taskdeck_board=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = BoardConfig::try_from_env().context("reading board configuration")?;
    tracing::info!(?config, "Starting todo board");
    taskdeck_runtime::metrics::describe_metrics();

    let mut state = BoardState::with_items_per_page(config.items_per_page);
    if config.seed_sample {
        state = state.with_todos(TodoCollection::sample());
    }
    let store = Store::with_config(
        state,
        BoardReducer::new(),
        BoardEnvironment::live(),
        config.store_config(),
    );

    let mut outcomes = store.subscribe_actions();
    let observer = tokio::spawn(async move {
        loop {
            match outcomes.recv().await {
                Ok(action) if action.is_event() => tracing::info!(?action, "Board event"),
                Ok(_) => {},
                Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "Observer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    show(&store, "Initial board").await;

    for title in ["Write release notes", "Review pull requests", "Plan sprint", "Fix login bug"] {
        add(&store, title, Priority::Medium).await?;
    }
    add(&store, "Update dependencies", Priority::Low).await?;
    show(&store, "After adding five todos").await;

    store.send(BoardAction::PageChanged { page: 2 }).await?;
    show(&store, "Page 2").await;

    store
        .send(BoardAction::SearchChanged {
            term: "datab".to_string(),
        })
        .await?;
    show(&store, "Searching for \"datab\" (page 2 is now past the end)").await;

    store.send(BoardAction::PageChanged { page: 1 }).await?;
    store
        .send(BoardAction::SearchChanged {
            term: String::new(),
        })
        .await?;
    store
        .send(BoardAction::StatusFilterChanged {
            filter: StatusFilter::Only(Status::Pending),
        })
        .await?;
    show(&store, "Pending only").await;

    let Some(target) = store
        .state(|s| s.filtered().first().map(|t| t.id.clone()))
        .await
    else {
        anyhow::bail!("expected at least one pending todo");
    };
    store.send(BoardAction::EditRequested { id: target.clone() }).await?;
    store
        .send(BoardAction::DraftStatusChanged {
            status: Status::InProgress,
        })
        .await?;
    store.send(BoardAction::FormSubmitted).await?;
    show(&store, "After starting one todo").await;

    store.send(BoardAction::AddRequested).await?;
    store.send(BoardAction::FormSubmitted).await?;
    let rejected = store.state(|s| s.last_error.clone()).await;
    tracing::info!(?rejected, "Blank submit left the form open");
    store.send(BoardAction::FormClosed).await?;

    store.send(BoardAction::DeleteRequested { id: target }).await?;
    store
        .send(BoardAction::StatusFilterChanged {
            filter: StatusFilter::All,
        })
        .await?;
    show(&store, "After deleting it").await;

    drop(store);
    observer.await.context("joining observer task")?;
    Ok(())
}

async fn add(store: &BoardStore, title: &str, priority: Priority) -> anyhow::Result<()> {
    store.send(BoardAction::AddRequested).await?;
    store
        .send(BoardAction::DraftTitleChanged {
            title: title.to_string(),
        })
        .await?;
    store
        .send(BoardAction::DraftPriorityChanged { priority })
        .await?;
    store.send(BoardAction::FormSubmitted).await?;
    Ok(())
}

async fn show(store: &BoardStore, heading: &str) {
    let view = store.state(BoardState::view).await;
    println!("\n=== {heading} ===\n{}", TextView(&view));
}
