//! Autocomplete Demo
//!
//! Drives a multi-select autocomplete through a scripted session and prints
//! what a renderer would draw after each event.
//!
//! Run with: cargo run -p blinc_autocomplete --example autocomplete_demo
//! Set RUST_LOG=blinc_autocomplete=trace to see engine transitions.

use blinc_autocomplete::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
struct Language {
    name: &'static str,
    family: &'static str,
    retired: bool,
}

fn languages() -> Vec<Language> {
    let entries = [
        ("C", "Compiled", false),
        ("C++", "Compiled", false),
        ("Rust", "Compiled", false),
        ("Zig", "Compiled", false),
        ("Lua", "Scripting", false),
        ("Perl", "Scripting", true),
        ("Python", "Scripting", false),
        ("Ruby", "Scripting", false),
        ("Elm", "Functional", true),
        ("Haskell", "Functional", false),
        ("OCaml", "Functional", false),
    ];
    entries
        .into_iter()
        .map(|(name, family, retired)| Language {
            name,
            family,
            retired,
        })
        .collect()
}

fn render(ac: &Autocomplete<Language>) {
    let input = bindings::input(ac);
    let tags: Vec<String> = bindings::tags(ac)
        .into_iter()
        .map(|tag| {
            if tag.focused {
                format!("[{}]*", tag.label)
            } else {
                format!("[{}]", tag.label)
            }
        })
        .collect();
    println!("  input: {} {:?}", tags.join(" "), input.value);

    let Some(popup) = bindings::popup(ac) else {
        println!("  (popup closed)");
        return;
    };
    if let Some(text) = &popup.loading {
        println!("  | {text}");
    }
    match popup.content {
        bindings::PopupContent::Empty => {}
        bindings::PopupContent::NoOptions(text) => {
            println!("  | {text}");
        }
        bindings::PopupContent::Listbox => {
            for group in ac.groups().unwrap_or_default() {
                println!("  | {}", group.key);
                for offset in 0..group.options.len() {
                    let index = group.start_index + offset;
                    let Some(option) = bindings::option(ac, index) else {
                        continue;
                    };
                    let marker = if option.data_focus { ">" } else { " " };
                    let check = if option.aria_selected { "x" } else { " " };
                    let disabled = if option.aria_disabled { " (disabled)" } else { "" };
                    println!("  | {marker} [{check}] {}{disabled}", option.label);
                }
            }
        }
    }
}

fn step(ac: &mut Autocomplete<Language>, label: &str, event: Event) {
    println!("{label}");
    let response = ac.dispatch(event);
    for notification in &response.notifications {
        if let Notification::Change { value, reason } = notification {
            let names: Vec<&str> = value.as_slice().iter().map(|l| l.name).collect();
            println!("  -> value {names:?} ({reason:?})");
        }
    }
    render(ac);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut ac = AutocompleteBuilder::new(languages())
        .id("languages")
        .option_label(|language: &Language| language.name.to_string())
        .option_disabled(|language: &Language| language.retired)
        .group_by(|language: &Language| language.family.to_string())
        .multiple(true)
        .auto_highlight(true)
        .disable_close_on_select(true)
        .filter_config(FilterConfig::default().match_from(MatchFrom::Start))
        .on_close(|trigger| tracing::info!("popup closed by {:?}", trigger))
        .build()
        .expect("valid autocomplete configuration");

    step(&mut ac, "focus", Event::Focus);
    step(&mut ac, "type \"r\"", Event::input("r"));
    step(&mut ac, "enter", Event::key(Key::Enter));
    step(&mut ac, "type \"p\"", Event::input("p"));
    step(&mut ac, "arrow down", Event::key(Key::ArrowDown));
    step(&mut ac, "enter", Event::key(Key::Enter));
    step(&mut ac, "type \"x\"", Event::input("x"));
    step(&mut ac, "clear text", Event::input(""));
    step(&mut ac, "arrow left", Event::key(Key::ArrowLeft));
    step(&mut ac, "backspace", Event::key(Key::Backspace));
    step(&mut ac, "blur", Event::Blur);
}
