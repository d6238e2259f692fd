//! Push channel connection status.

/// State of the realtime socket as shown in the header badge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Socket is opening or waiting to retry.
    #[default]
    Connecting,
    /// Socket.IO namespace joined.
    Connected {
        /// Session id assigned by the server.
        sid: Option<String>,
    },
    /// Socket dropped; a retry is scheduled.
    Disconnected {
        /// Why the socket closed.
        reason: String,
    },
}

impl ConnectionStatus {
    /// Badge text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Connecting => "Connecting",
            Self::Connected { .. } => "Live",
            Self::Disconnected { .. } => "Offline",
        }
    }

    /// CSS modifier for the badge.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected { .. } => "connected",
            Self::Disconnected { .. } => "disconnected",
        }
    }

    /// Tooltip text with the disconnect reason when there is one.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Connecting => "Connecting to server".to_string(),
            Self::Connected { sid: Some(sid) } => format!("Connected (session {sid})"),
            Self::Connected { sid: None } => "Connected".to_string(),
            Self::Disconnected { reason } => format!("Disconnected: {reason}"),
        }
    }
}
