//! Event System
//!
//! Types and implementations for panel refresh events and logging

use crate::error_classifier::LogLevel;
use crate::logging::should_log_with_env;
use crate::panels::PanelKind;
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Empty,
    Error,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub panel: PanelKind,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn panel_with_level(
        panel: PanelKind,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self {
            panel,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    /// True when the event changed what a container shows.
    pub fn is_render(&self) -> bool {
        self.event_type != EventType::Refresh
    }

    pub fn should_display(&self) -> bool {
        // Always show rendered panels
        if self.event_type == EventType::Success {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.panel, self.msg
        )
    }
}

/// Event sending helper handed to the dashboard
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event, mirroring it to the `log` facade.
    pub async fn send_event(&self, event: Event) {
        log::log!(
            target: "analytics_dashboard::events",
            log::Level::from(event.log_level),
            "{}: {}",
            event.panel,
            event.msg
        );
        let _ = self.sender.send(event).await;
    }

    pub async fn send_panel_event(
        &self,
        panel: PanelKind,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::panel_with_level(
            panel, message, event_type, log_level,
        ))
        .await;
    }
}
