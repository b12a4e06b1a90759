use super::{dom::Timeout, hooks::use_motion_preferences};
use crate::chat::{ChatMessage, ChatReply, ChatRequest, Role, FALLBACK_REPLY};
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

const CHAT_ENDPOINT: &str = "/api/chat";
const AUTO_OPEN_DELAY_MS: i32 = 10_000;

async fn request_reply(history: &[ChatMessage]) -> Option<String> {
    let body = ChatRequest::from_transcript(history);
    let response = Request::post(CHAT_ENDPOINT)
        .json(&body)
        .ok()?
        .send()
        .await
        .ok()?;

    if !response.ok() {
        return None;
    }

    response
        .json::<ChatReply>()
        .await
        .ok()
        .map(|payload| payload.reply)
}

#[function_component(Chatbot)]
pub fn chatbot() -> Html {
    let open = use_state_eq(|| false);
    let messages = use_state(|| vec![ChatMessage::greeting()]);
    let input = use_state(String::new);
    let loading = use_state_eq(|| false);
    let messages_end = use_node_ref();
    let input_ref = use_node_ref();
    let smooth = use_motion_preferences().smooth_scroll();

    {
        let open = open.clone();
        use_effect_with((), move |_| {
            let timer = Timeout::new(AUTO_OPEN_DELAY_MS, move || open.set(true));
            move || drop(timer)
        });
    }

    {
        let messages_end = messages_end.clone();
        use_effect_with((messages.len(), smooth), move |&(_, smooth)| {
            if let Some(end) = messages_end.cast::<web_sys::Element>() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(if smooth {
                    ScrollBehavior::Smooth
                } else {
                    ScrollBehavior::Instant
                });
                end.scroll_into_view_with_scroll_into_view_options(&options);
            }
            || ()
        });
    }

    {
        let input_ref = input_ref.clone();
        use_effect_with(*open, move |&is_open| {
            let timer = if is_open {
                Timeout::new(100, move || {
                    if let Some(field) = input_ref.cast::<HtmlInputElement>() {
                        let _ = field.focus();
                    }
                })
            } else {
                None
            };
            move || drop(timer)
        });
    }

    let send = {
        let messages = messages.clone();
        let input = input.clone();
        let loading = loading.clone();
        Callback::from(move |_: ()| {
            let text = input.trim().to_string();
            if text.is_empty() || *loading {
                return;
            }

            let mut history = (*messages).clone();
            history.push(ChatMessage::user(text));
            messages.set(history.clone());
            input.set(String::new());
            loading.set(true);

            let messages = messages.clone();
            let loading = loading.clone();
            spawn_local(async move {
                let reply = request_reply(&history)
                    .await
                    .unwrap_or_else(|| FALLBACK_REPLY.to_string());
                history.push(ChatMessage::assistant(reply));
                messages.set(history);
                loading.set(false);
            });
        })
    };

    let on_input = {
        let input = input.clone();
        Callback::from(move |event: InputEvent| {
            let field: HtmlInputElement = event.target_unchecked_into();
            input.set(field.value());
        })
    };

    let on_keydown = {
        let send = send.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                send.emit(());
            }
        })
    };

    let on_send = {
        let send = send.clone();
        Callback::from(move |_| send.emit(()))
    };
    let on_open = {
        let open = open.clone();
        Callback::from(move |_| open.set(true))
    };
    let on_close = {
        let open = open.clone();
        Callback::from(move |_| open.set(false))
    };

    if !*open {
        return html! {
            <button class="chat-launcher" type="button" aria-label="Open chat assistant" onclick={on_open}>
                <span aria-hidden="true">{"💬"}</span>
            </button>
        };
    }

    let send_disabled = *loading || input.trim().is_empty();

    html! {
        <aside class="chat-panel" aria-label="Chat assistant">
            <header class="chat-header">
                <div>
                    <p class="chat-title">{"AI Assistant"}</p>
                    <p class="chat-subtitle muted">{"Ask about skills, projects or experience"}</p>
                </div>
                <button class="chat-close" type="button" aria-label="Close chat" onclick={on_close}>{"×"}</button>
            </header>
            <div class="chat-messages" role="log" aria-live="polite">
                { for messages.iter().map(|message| {
                    let from_user = message.role == Role::User;
                    html! {
                        <div class={classes!("chat-bubble", if from_user { "from-user" } else { "from-assistant" })}>
                            {message.content.clone()}
                        </div>
                    }
                }) }
                if *loading {
                    <div class="chat-bubble from-assistant chat-typing" aria-label="Assistant is typing">
                        <span /><span /><span />
                    </div>
                }
                <div ref={messages_end} />
            </div>
            <div class="chat-input-row">
                <input
                    ref={input_ref}
                    class="chat-input"
                    type="text"
                    placeholder="Ask me anything..."
                    value={(*input).clone()}
                    disabled={*loading}
                    oninput={on_input}
                    onkeydown={on_keydown}
                />
                <button class="chat-send" type="button" disabled={send_disabled} onclick={on_send}>{"Send"}</button>
            </div>
        </aside>
    }
}
