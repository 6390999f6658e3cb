//! JSON-RPC 2.0 bridge to the page embedding the world.
//!
//! When the world runs in an iframe, the host page hears about progress and
//! overlays through notifications and can query or close things through
//! requests. Natively the bridge is inert: nothing is sent and nothing arrives.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ handle_rpc_request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Requests that change the overlay never touch it directly. They emit an
//! `OverlayCommand` with `CommandSource::Rpc`, which is applied alongside
//! button presses and Escape.
//!
//! ## Requests
//!
//! - `get_progress`: visited keys, count, total and ratio
//! - `get_station_positions`: anchor of every station; optional `category` filter
//! - `close_overlay`: close the open overlay, dismissing the welcome modal if shown
//!
//! ## Notifications
//!
//! - `loading_progress {stage}`
//! - `init_failed {message}`
//! - `overlay_opened {kind, category, local_id}` / `overlay_closed`
//! - `progress_updated {visited, total, ratio}`
//! - `journey_completed`
//! - `navigate {destination}`
//!
//! ## Error Handling
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Message listener, request dispatch and notification queue.
pub mod web_rpc;
