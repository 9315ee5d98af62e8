use herald::{
    init_logging, Action, PublishOptions, Publisher, Settings, SubscribeOptions, Subscriber,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    init_logging(&settings.logging)?;
    info!(
        commit = env!("HERALD_GIT_COMMIT"),
        built_at = env!("HERALD_BUILD_TIME"),
        separator = ?settings.publisher.scope_separator,
        "herald starting"
    );

    let publisher: Publisher<String> = Publisher::with_config(settings.publisher.clone());

    // A listener that only wants to hear about the first save.
    let first_save = Subscriber::new(|action: &Action<String>| {
        info!(file = ?action.detail(), "first save observed");
    });
    publisher.once("save", &first_save, SubscribeOptions::new());

    let audit = Subscriber::new(|action: &Action<String>| {
        info!(file = ?action.detail(), "save audited");
    });
    publisher.subscribe("save", &audit, SubscribeOptions::new());

    for file in ["notes.txt", "todo.md"] {
        publisher.publish("save", file.to_string(), PublishOptions::new())?;
    }

    // Closing a tab with unsaved changes gets vetoed by the editor scope.
    let guard = Subscriber::new(|action: &Action<String>| {
        if action.detail().is_some_and(|tab| tab.ends_with('*')) {
            action.prevent_default();
        }
    });
    publisher.subscribe(
        "closetab",
        &guard,
        SubscribeOptions::new().with_scope("editor"),
    );

    for tab in ["readme", "draft*"] {
        let action = publisher.publish(
            "closetab",
            tab.to_string(),
            PublishOptions::new().cancellable().with_scope("editor"),
        )?;
        if action.default_prevented() {
            info!(tab, "close prevented");
        } else {
            info!(tab, "tab closed");
        }
    }

    println!("{}", serde_json::to_string_pretty(&publisher.stats())?);
    Ok(())
}
