//! Home page component.
//!
//! Each panel posts its form with htmx and swaps the returned fragment into
//! its result area.

use langbuddy_core::SessionKey;
use langbuddy_speech::{Language, SUPPORTED_LANGUAGES};
use leptos::prelude::*;

/// Option values: display names for the language model tools, codes for
/// speech synthesis.
#[derive(Clone, Copy)]
enum OptionValue {
    Name,
    Code,
}

#[component]
fn LanguageSelect(
    name: &'static str,
    value: OptionValue,
    selected: &'static str,
) -> impl IntoView {
    let options = SUPPORTED_LANGUAGES
        .iter()
        .map(|language: &Language| {
            let option_value = match value {
                OptionValue::Name => language.name,
                OptionValue::Code => language.code,
            };
            let is_selected = language.code == selected;
            view! {
                <option value=option_value selected=is_selected>
                    {language.name}
                </option>
            }
        })
        .collect_view();

    view! { <select name=name>{options}</select> }
}

#[component]
fn Panel(
    title: &'static str,
    action: &'static str,
    target: &'static str,
    children: Children,
) -> impl IntoView {
    let result_id = format!("{target}-result");
    let loading_id = format!("{target}-loading");
    let result_selector = format!("#{result_id}");
    let loading_selector = format!("#{loading_id}");
    view! {
        <section class="panel">
            <h2>{title}</h2>
            <form hx-post=action hx-target=result_selector hx-indicator=loading_selector>
                {children()}
            </form>
            <div id=loading_id class="htmx-indicator">"Working..."</div>
            <div id=result_id class="result"></div>
        </section>
    }
}

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = SessionKey::default().to_string();
    let conversation_session = session.clone();

    view! {
        <main class="home-page">
            <header>
                <h1>"Language Learning Buddy"</h1>
                <p>"Translate, check grammar, hear pronunciation and practice conversation."</p>
            </header>

            <Panel title="Translation" action="/translate" target="translation">
                <textarea name="text" placeholder="Text to translate" required=true></textarea>
                <label>"From " <LanguageSelect name="src_lang" value=OptionValue::Name selected="en"/></label>
                <label>"To " <LanguageSelect name="tgt_lang" value=OptionValue::Name selected="es"/></label>
                <button type="submit">"Translate"</button>
            </Panel>

            <Panel title="Grammar Check" action="/grammar" target="grammar">
                <textarea name="text" placeholder="Text to check" required=true></textarea>
                <LanguageSelect name="language" value=OptionValue::Name selected="en"/>
                <button type="submit">"Check Grammar"</button>
            </Panel>

            <Panel title="Pronunciation" action="/pronounce" target="pronounce">
                <input type="text" name="text" placeholder="Text to pronounce" required=true/>
                <LanguageSelect name="language" value=OptionValue::Code selected="es"/>
                <button type="submit">"Pronounce"</button>
            </Panel>

            <Panel title="Conversation Practice" action="/conversation" target="conversation">
                <input type="text" name="prompt" placeholder="Topic, e.g. ordering food" required=true/>
                <LanguageSelect name="language" value=OptionValue::Name selected="es"/>
                <input type="hidden" name="session_id" value=conversation_session.clone()/>
                <button type="submit">"Start Conversation"</button>
            </Panel>

            <Panel title="Roleplay Scenario" action="/roleplay" target="roleplay">
                <input type="text" name="prompt" placeholder="Scenario, e.g. checking into a hotel" required=true/>
                <LanguageSelect name="language" value=OptionValue::Name selected="fr"/>
                <button type="submit">"Create Scenario"</button>
            </Panel>

            <Panel title="Chat with AI" action="/chat" target="chat">
                <input type="hidden" name="session_id" value=session.clone()/>
                <input type="text" name="message" placeholder="Ask anything about language learning" required=true/>
                <button type="submit">"Send"</button>
            </Panel>
        </main>
    }
}
