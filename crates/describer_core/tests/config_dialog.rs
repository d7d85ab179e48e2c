use std::sync::Once;

use describer_core::{update, AiConfig, AiProvider, ConfigField, DialogState, Effect, Msg};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(describer_logging::initialize_for_tests);
}

fn owner_config() -> AiConfig {
    AiConfig {
        provider: AiProvider::Gemini,
        api_key: "owner-key-0001".to_string(),
        base_url: String::new(),
        model: "gemini-2.5-flash".to_string(),
    }
}

fn opened() -> DialogState {
    let state = DialogState::with_owner(owner_config(), Vec::new());
    let (state, _) = update(state, Msg::DialogOpened);
    state
}

#[test]
fn field_edit_replaces_only_that_field() {
    init_logging();
    let (state, effects) = update(
        opened(),
        Msg::FieldEdited(ConfigField::Model("gemini-pro".into())),
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.draft(),
        &AiConfig {
            model: "gemini-pro".to_string(),
            ..owner_config()
        }
    );
    assert_eq!(state.saved_config(), &owner_config());
}

#[test]
fn save_emits_config_once_and_closes() {
    init_logging();
    let (state, _) = update(
        opened(),
        Msg::FieldEdited(ConfigField::Provider(AiProvider::OpenAiCompatible)),
    );
    let (state, _) = update(
        state,
        Msg::FieldEdited(ConfigField::BaseUrl("http://localhost:11434/v1".into())),
    );
    let (state, effects) = update(state, Msg::SaveClicked);

    let expected = AiConfig {
        provider: AiProvider::OpenAiCompatible,
        base_url: "http://localhost:11434/v1".to_string(),
        ..owner_config()
    };
    assert_eq!(effects, vec![Effect::SaveConfig(expected.clone())]);
    assert!(!state.is_open());
    assert_eq!(state.saved_config(), &expected);

    // A second click on a closed dialog does nothing.
    let (_state, effects) = update(state, Msg::SaveClicked);
    assert!(effects.is_empty());
}

#[test]
fn cancel_discards_draft_without_effects() {
    init_logging();
    let (state, _) = update(opened(), Msg::FieldEdited(ConfigField::ApiKey("typo".into())));
    let (state, effects) = update(state, Msg::CancelClicked);

    assert!(effects.is_empty());
    assert!(!state.is_open());
    assert_eq!(state.draft(), &owner_config());

    let (state, _) = update(state, Msg::DialogOpened);
    assert_eq!(state.draft(), &owner_config());
}

#[test]
fn reopening_an_open_dialog_keeps_the_draft() {
    init_logging();
    let (state, _) = update(opened(), Msg::FieldEdited(ConfigField::Model("m".into())));
    let (state, _) = update(state, Msg::DialogOpened);

    assert_eq!(state.draft().model, "m");
}

#[test]
fn edits_ignored_while_closed() {
    init_logging();
    let state = DialogState::with_owner(owner_config(), Vec::new());
    let (state, effects) = update(state, Msg::FieldEdited(ConfigField::Model("x".into())));

    assert!(effects.is_empty());
    assert_eq!(state.draft(), &owner_config());
}

#[test]
fn base_url_only_visible_for_openai_compatible() {
    init_logging();
    let view = opened().view();
    assert_eq!(view.base_url, None);
    assert_eq!(view.api_key_masked, "**********0001");

    let (state, _) = update(
        opened(),
        Msg::FieldEdited(ConfigField::Provider(AiProvider::OpenAiCompatible)),
    );
    assert_eq!(state.view().base_url, Some(String::new()));
}

#[test]
fn loaded_config_reseeds_closed_draft_only() {
    init_logging();
    let replacement = AiConfig {
        api_key: "replaced".to_string(),
        ..owner_config()
    };

    let (closed, _) = update(
        DialogState::with_owner(owner_config(), Vec::new()),
        Msg::ConfigLoaded(replacement.clone()),
    );
    assert_eq!(closed.draft(), &replacement);

    let (open, _) = update(opened(), Msg::ConfigLoaded(replacement.clone()));
    assert_eq!(open.draft(), &owner_config());
    assert_eq!(open.saved_config(), &replacement);
}
