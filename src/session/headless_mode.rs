//! Polling mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::print_cmd_warn;
use std::error::Error;
use std::future::Future;

/// Runs the dashboard until Ctrl+C
///
/// This function handles:
/// 1. Starting the panel timers
/// 2. Console event logging
/// 3. Rewriting the output page whenever a panel renders
/// 4. Ctrl+C shutdown handling
pub async fn run_headless_mode(session: SessionData) -> Result<(), Box<dyn Error>> {
    run_until(session, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

pub(crate) async fn run_until(
    mut session: SessionData,
    shutdown: impl Future<Output = ()>,
) -> Result<(), Box<dyn Error>> {
    let dashboard = session.dashboard.clone();
    print_session_starting(
        &session.api_base_url,
        dashboard.refresh_interval().as_millis(),
    );

    let handle = dashboard.start();
    let refresh_secs = Some(dashboard.refresh_interval().as_secs().max(1));
    tokio::pin!(shutdown);

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
                if !event.is_render() {
                    continue;
                }
                if let Some(path) = &session.output_path {
                    if let Err(e) = dashboard.document().save_page(path, refresh_secs).await {
                        print_cmd_warn!("Page not written", "{}: {}", path.display(), e);
                    }
                }
            }
            _ = &mut shutdown => {
                break;
            }
        }
    }

    print_session_shutdown();
    handle.stop().await;
    print_session_exit_success();

    Ok(())
}
