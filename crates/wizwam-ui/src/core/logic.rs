//! Pure helpers shared by the socket runner and the views.

/// Socket.IO handshake path.
pub const SOCKET_PATH: &str = "/socket.io/";
/// Engine.IO protocol revision spoken by the client.
pub const ENGINE_PROTOCOL: u8 = 4;

/// Exponential backoff (1s → 30s) for socket reconnect attempts.
#[must_use]
pub fn backoff_delay_ms(attempt: u32) -> u32 {
    let capped = attempt.min(5);
    let delay = 1_000u32.saturating_mul(2u32.saturating_pow(capped));
    delay.clamp(1_000, 30_000)
}

/// Build the websocket URL for the Socket.IO endpoint from an HTTP base URL.
#[must_use]
pub fn socket_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let ws_base = base.strip_prefix("https://").map_or_else(
        || {
            base.strip_prefix("http://")
                .map_or_else(|| format!("ws://{base}"), |rest| format!("ws://{rest}"))
        },
        |rest| format!("wss://{rest}"),
    );
    format!("{ws_base}{SOCKET_PATH}?EIO={ENGINE_PROTOCOL}&transport=websocket")
}

/// Clamp a percentage into `0..=100` for CSS widths.
#[must_use]
pub const fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// `"1 file"` / `"N files"`.
#[must_use]
pub fn file_count(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{count} files")
    }
}
