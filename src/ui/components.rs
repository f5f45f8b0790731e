/// Reusable UI components

use crate::state::Status;
use yew::prelude::*;

pub const ACTION_LABEL: &str = "Analyze Job Posting";
pub const BUSY_LABEL: &str = "Processing...";

#[derive(Properties, PartialEq)]
pub struct ActionButtonProps {
    pub status: Status,
    pub onclick: Callback<MouseEvent>,
}

/// Label shown on the action button for `status`
pub fn action_label(status: Status) -> &'static str {
    match status {
        Status::Loading => BUSY_LABEL,
        _ => ACTION_LABEL,
    }
}

/// The button accepts no clicks while a run is in flight
pub fn is_disabled(status: Status) -> bool {
    status == Status::Loading
}

/// Background colour of the action button for `status`
pub fn action_color(status: Status) -> &'static str {
    match status {
        Status::Idle => "#2563eb",
        Status::Loading => "#9ca3af",
        Status::Success => "#16a34a",
        Status::Error => "#dc2626",
    }
}

/// The single trigger of the popup. Disabled while a run is in flight.
#[function_component(ActionButton)]
pub fn action_button(props: &ActionButtonProps) -> Html {
    let loading = is_disabled(props.status);

    let base_style = "width: 100%; padding: 12px 16px; border: none; border-radius: 8px; color: white; font-size: 14px; font-weight: 600; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.2); transition: all 0.2s;";
    let cursor_style = if loading {
        "cursor: not-allowed;"
    } else {
        "cursor: pointer;"
    };

    let style = format!(
        "{} background-color: {}; {}",
        base_style,
        action_color(props.status),
        cursor_style
    );

    html! {
        <button
            class="action-button"
            onclick={props.onclick.clone()}
            disabled={loading}
            style={style}
        >
            {action_label(props.status)}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct MessageLineProps {
    pub message: String,
}

#[function_component(MessageLine)]
pub fn message_line(props: &MessageLineProps) -> Html {
    if props.message.is_empty() {
        return html! {};
    }

    html! {
        <div class="message-line" style="margin-top: 16px; text-align: center; font-size: 13px; color: #334155;">
            <p>{&props.message}</p>
        </div>
    }
}
