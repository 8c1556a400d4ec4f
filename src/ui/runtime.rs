//! The blocking UI loop and the async effect runtime behind it.

use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::ConfigStore;
use crate::store::{Action, ActionSink, Command, EffectRunner};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::render;
use crate::ui::terminal_guard::setup_terminal;

/// Commands waiting on the effect runner. Dispatch drops overflow and
/// surfaces it in the status line instead of blocking the draw loop.
const COMMAND_QUEUE: usize = 64;

/// Run the console until the user quits. Takes over the terminal for the
/// duration; the guard restores it on every exit path.
pub fn run(config: ConfigStore) -> anyhow::Result<()> {
    let tick = Duration::from_millis(config.get().ui.tick_ms);
    let (mut terminal, guard) = setup_terminal()?;

    let events = EventHandler::new(tick);
    let (command_tx, command_rx) = mpsc::channel::<Command>(COMMAND_QUEUE);

    // Follow-up actions re-enter the loop through the event channel, so
    // the store only ever changes on the UI thread.
    let event_tx = events.sender();
    let publish: ActionSink = Arc::new(move |action: Action| {
        let _ = event_tx.send(AppEvent::Store(action));
    });

    let api = ApiClient::new(&config.get().api);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.spawn(EffectRunner::new(api, command_rx, publish).run());

    let mut app = App::new(config);
    app.set_command_sender(command_tx);
    app.on_start();

    while !app.should_quit() {
        terminal.draw(|frame| render::draw(frame, &app))?;
        match events.next(tick) {
            Ok(AppEvent::Key(key)) => app.on_key(key),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::Store(action)) => app.dispatch(action),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // In-flight requests are abandoned on quit.
    runtime.shutdown_background();
    drop(terminal);
    drop(guard);
    Ok(())
}
