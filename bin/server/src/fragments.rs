//! HTML fragments returned to htmx.
//!
//! Fragments are rendered server-side with Leptos. Text from users and from
//! the model is inserted as text nodes or attribute values, so it is always
//! escaped.

use langbuddy_core::SessionKey;
use langbuddy_speech::Language;
use leptos::prelude::*;

const RESULT_BOX_STYLE: &str =
    "background: #f8f9fa; padding: 15px; border-radius: 5px; margin-top: 10px; white-space: pre-wrap;";

/// Renders a view to an HTML string.
pub fn render<V: IntoView>(view: impl FnOnce() -> V) -> String {
    Owner::new().with(|| view().to_html())
}

/// Error fragment with a heading and message.
#[must_use]
pub fn error(title: &str, message: &str) -> String {
    let title = title.to_string();
    let message = message.to_string();
    render(move || {
        view! {
            <div class="error">
                <h3>{title}</h3>
                <p>{message}</p>
            </div>
        }
    })
}

/// Original text and its translation.
#[must_use]
pub fn translation(text: &str, src_lang: &str, tgt_lang: &str, translation: &str) -> String {
    let original_label = format!("Original ({src_lang}):");
    let translation_label = format!("Translation ({tgt_lang}):");
    let text = text.to_string();
    let translation = translation.to_string();
    render(move || {
        view! {
            <div class="success">
                <h3>"Translation Result"</h3>
                <p><strong>{original_label}</strong>" "{text}</p>
                <p><strong>{translation_label}</strong>" "{translation}</p>
            </div>
        }
    })
}

/// Original text and the corrected version with its explanation.
#[must_use]
pub fn grammar(text: &str, corrected: &str) -> String {
    let text = text.to_string();
    let corrected = corrected.to_string();
    render(move || {
        view! {
            <div class="success">
                <h3>"Grammar Correction"</h3>
                <p><strong>"Original:"</strong>" "{text}</p>
                <p><strong>"Corrected:"</strong></p>
                <div style=RESULT_BOX_STYLE>{corrected}</div>
            </div>
        }
    })
}

/// Audio player for a generated clip.
#[must_use]
pub fn pronunciation(text: &str, language_code: &str, audio_path: &str) -> String {
    let text = text.to_string();
    let language = Language::display_name(language_code).to_string();
    let audio_path = audio_path.to_string();
    render(move || {
        view! {
            <div class="success">
                <h3>"Audio Generated Successfully!"</h3>
                <p><strong>"Text:"</strong>" "{text}</p>
                <p><strong>"Language:"</strong>" "{language}</p>
                <audio controls=true style="width: 100%; margin-top: 10px;">
                    <source src=audio_path type="audio/mpeg"/>
                    "Your browser does not support the audio element."
                </audio>
            </div>
        }
    })
}

/// Latest tutor turn with a form to answer or restart.
#[must_use]
pub fn conversation(topic: &str, language: &str, session: &SessionKey, reply: &str) -> String {
    let heading = format!("Conversation Practice - {}", Language::display_name(language));
    let placeholder = format!("Your response in {}...", Language::display_name(language));
    let topic = topic.to_string();
    let language = language.to_string();
    let session = session.to_string();
    let reply = reply.to_string();
    render(move || {
        view! {
            <div class="success">
                <h3>{heading}</h3>
                <p><strong>"Topic:"</strong>" "{topic.clone()}</p>
                <div style=RESULT_BOX_STYLE>{reply}</div>
                <div class="follow-up">
                    <form
                        class="inline-form"
                        hx-post="/conversation"
                        hx-target="#conversation-result"
                        hx-indicator="#conversation-loading"
                    >
                        <ConversationFields
                            topic=topic.clone()
                            language=language.clone()
                            session=session.clone()
                        />
                        <input
                            type="text"
                            name="user_response"
                            placeholder=placeholder
                            required=true
                        />
                        <button type="submit">"Send"</button>
                    </form>
                    <div id="conversation-loading" class="htmx-indicator">"Thinking..."</div>
                    <form
                        hx-post="/conversation"
                        hx-target="#conversation-result"
                        hx-indicator="#conversation-loading"
                    >
                        <ConversationFields topic=topic language=language session=session/>
                        <button type="submit" class="secondary">"Start New Conversation"</button>
                    </form>
                </div>
            </div>
        }
    })
}

#[component]
fn ConversationFields(topic: String, language: String, session: String) -> impl IntoView {
    view! {
        <input type="hidden" name="prompt" value=topic/>
        <input type="hidden" name="language" value=language/>
        <input type="hidden" name="session_id" value=session/>
    }
}

/// Latest assistant turn with a form to continue the chat.
#[must_use]
pub fn chat(session: &SessionKey, reply: &str) -> String {
    let session = session.to_string();
    let reply = reply.to_string();
    render(move || {
        view! {
            <div class="success">
                <h3>"AI Response"</h3>
                <div style=RESULT_BOX_STYLE>{reply}</div>
                <div class="follow-up">
                    <form
                        class="inline-form"
                        hx-post="/chat"
                        hx-target="#chat-result"
                        hx-indicator="#chat-loading"
                    >
                        <input type="hidden" name="session_id" value=session/>
                        <input
                            type="text"
                            name="message"
                            placeholder="Continue the conversation..."
                            required=true
                        />
                        <button type="submit">"Send"</button>
                    </form>
                    <div id="chat-loading" class="htmx-indicator">"Thinking..."</div>
                </div>
            </div>
        }
    })
}

/// One-shot roleplay opener.
#[must_use]
pub fn roleplay(topic: &str, language: &str, opener: &str) -> String {
    let heading = format!("Roleplay - {}", Language::display_name(language));
    let topic = topic.to_string();
    let opener = opener.to_string();
    render(move || {
        view! {
            <div class="success">
                <h3>{heading}</h3>
                <p><strong>"Scenario:"</strong>" "{topic}</p>
                <div style=RESULT_BOX_STYLE>{opener}</div>
            </div>
        }
    })
}
