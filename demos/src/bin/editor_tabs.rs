//! An editor with several tabs wired together through one publisher.
//!
//! Run with `cargo run -p herald_demos --bin editor_tabs`. Set
//! `HERALD_LOGGING__LEVEL=herald=debug` to watch the registry at work.

use std::sync::{Arc, Mutex};

use herald::{
    init_logging, Action, HeraldResult, PublishOptions, Publisher, Settings, SubscribeOptions,
    Subscriber,
};
use herald_error::{ensure, GenericError, StatusCode};
use tracing::info;

#[derive(Debug, Clone)]
struct Tab {
    title: String,
    dirty: bool,
}

impl Tab {
    fn new(
        title: &str,
        dirty: bool,
    ) -> Self {
        Self {
            title: title.to_string(),
            dirty,
        }
    }
}

fn main() -> HeraldResult<()> {
    let settings = Settings::load()?;
    init_logging(&settings.logging)?;

    let publisher: Publisher<Tab> = Publisher::with_config(settings.publisher);
    let closed = Arc::new(Mutex::new(Vec::new()));

    // Each pane only hears about its own tabs.
    let left_guard = Subscriber::new(|action: &Action<Tab>| {
        if action.detail().is_some_and(|tab| tab.dirty) {
            action.prevent_default();
        }
    });
    publisher.subscribe(
        "closetab",
        &left_guard,
        SubscribeOptions::new().with_scope("left"),
    );

    let right_log = {
        let closed = Arc::clone(&closed);
        Subscriber::new(move |action: &Action<Tab>| {
            if let (Some(tab), Ok(mut closed)) = (action.detail(), closed.lock()) {
                closed.push(tab.title.clone());
            }
        })
    };
    publisher.subscribe(
        "closetab",
        &right_log,
        SubscribeOptions::new().with_scope("right"),
    );

    // Welcome banner, shown once.
    let welcome = Subscriber::new(|action: &Action<Tab>| {
        if let Some(tab) = action.detail() {
            info!(title = %tab.title, "welcome, first tab opened");
        }
    });
    publisher.once("opentab", &welcome, SubscribeOptions::new());

    // Refuses untitled tabs; the error travels back to the caller of publish.
    let validator = Subscriber::try_new(|action: &Action<Tab>| -> HeraldResult<()> {
        let title = action.detail().map(|tab| tab.title.as_str()).unwrap_or("");
        ensure!(
            !title.trim().is_empty(),
            StatusCode::SubscriberRejected,
            "tab title must not be empty"
        );
        Ok(())
    });
    publisher.subscribe("opentab", &validator, SubscribeOptions::new());

    for tab in [Tab::new("main.rs", false), Tab::new("lib.rs", true)] {
        publisher.publish("opentab", tab, PublishOptions::new())?;
    }
    if let Err(err) = publisher.publish("opentab", Tab::new("  ", false), PublishOptions::new()) {
        let reason = err
            .downcast_ref::<GenericError>()
            .map_or("unknown", GenericError::message);
        info!(reason, code = %err.status_code(), "tab rejected");
    }

    for (scope, tab) in [
        ("left", Tab::new("lib.rs", true)),
        ("left", Tab::new("main.rs", false)),
        ("right", Tab::new("notes.md", false)),
    ] {
        let title = tab.title.clone();
        let action = publisher.publish(
            "closetab",
            tab,
            PublishOptions::new().cancellable().with_scope(scope),
        )?;
        info!(
            scope,
            title = %title,
            prevented = action.default_prevented(),
            "close requested"
        );
    }

    info!(
        closed = ?closed.lock().map(|c| c.clone()).unwrap_or_default(),
        events = ?publisher.event_names(),
        stats = ?publisher.stats(),
        "done"
    );
    Ok(())
}
