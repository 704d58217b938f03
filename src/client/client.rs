//! WebSocket client implementation.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::tungstenite::Message;

use crate::config::ClientConfig;
use crate::error::QuizError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::terminal;

use super::state::ClientApp;
use super::ui;

/// Shared client app state.
type SharedApp = Arc<Mutex<ClientApp>>;

/// Run the quiz client.
pub async fn run(config: ClientConfig) -> Result<(), QuizError> {
    let url = config.url();
    println!("Connecting to {}...", url);

    let (ws_stream, _) = tokio_tungstenite::connect_async(&url).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let app = Arc::new(Mutex::new(ClientApp::new(config)));

    // Outgoing requests go through a channel so both the TUI and the
    // receive task can send.
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientMessage>();

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Ok(json) = serde_json::to_string(&msg) else {
                continue;
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let hello = app.lock().await.hello();
    let _ = tx.send(hello);

    let app_clone = Arc::clone(&app);
    let tx_clone = tx.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Close(_)) => {
                    let mut app = app_clone.lock().await;
                    app.disconnect("Connection closed by server".to_string());
                    break;
                }
                Err(e) => {
                    let mut app = app_clone.lock().await;
                    app.disconnect(format!("Connection error: {}", e));
                    break;
                }
                _ => continue,
            };

            let server_msg: ServerMessage = match serde_json::from_str(&text) {
                Ok(m) => m,
                Err(_) => continue,
            };

            let follow_up = app_clone.lock().await.apply(server_msg);
            if let Some(request) = follow_up {
                let _ = tx_clone.send(request);
            }
        }
    });

    let result = run_tui(Arc::clone(&app), tx).await;

    recv_task.abort();
    // Give a pending Leave a moment to reach the server.
    let _ = tokio::time::timeout(Duration::from_millis(200), send_task).await;

    result
}

/// Run the client TUI.
async fn run_tui(
    app: SharedApp,
    tx: mpsc::UnboundedSender<ClientMessage>,
) -> Result<(), QuizError> {
    let mut terminal = terminal::init()?;

    loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        // Poll with a timeout so server updates get redrawn.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let mut app = app.lock().await;
                if let Some(request) = app.on_key(key.code) {
                    let _ = tx.send(request);
                }
                if app.should_quit {
                    break;
                }
            }
        }
    }

    drop(tx);
    terminal::restore()?;
    Ok(())
}
