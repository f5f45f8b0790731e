/// Popup UI for the job tracker extension

use crate::chrome::{ChromeHost, FetchTransport};
use crate::controller::analyze;
use crate::state::{SessionState, Status};
use crate::ui::components::{ActionButton, MessageLine};
use patternfly_yew::prelude::Spinner;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(SessionState::default);
    // Set for the whole run, independent of render timing
    let in_flight = use_mut_ref(|| false);

    let on_analyze = {
        let state = state.clone();
        let in_flight = in_flight.clone();

        Callback::from(move |_: MouseEvent| {
            if *in_flight.borrow() || !state.can_trigger() {
                log::debug!("Analyze already running");
                return;
            }
            *in_flight.borrow_mut() = true;

            let dispatcher = state.dispatcher();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                analyze(&ChromeHost, &FetchTransport, |action| dispatcher.dispatch(action)).await;
                *in_flight.borrow_mut() = false;
            });
        })
    };

    html! {
        <main class="popup" style="width: 320px; padding: 24px; background-color: #f8fafc; font-family: sans-serif;">
            <div style="text-align: center;">
                <h1 style="font-size: 20px; font-weight: 700; color: #1e293b; margin: 0;">{"AI Job Tracker"}</h1>
                <p style="font-size: 13px; color: #475569; margin-top: 4px;">{"Save this job to Notion"}</p>
            </div>

            <div style="margin-top: 32px;">
                <ActionButton status={state.status} onclick={on_analyze} />
            </div>

            if state.status == Status::Loading {
                <div style="margin-top: 12px; text-align: center;">
                    <Spinner />
                </div>
            }

            <MessageLine message={state.message.clone()} />
        </main>
    }
}
