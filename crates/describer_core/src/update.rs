use crate::{missing_descriptions, DialogState, Effect, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DialogState, msg: Msg) -> (DialogState, Vec<Effect>) {
    let effects = match msg {
        Msg::DialogOpened => {
            // Re-seeding the draft happens only on the closed -> open edge.
            if !state.is_open() {
                state.open();
            }
            Vec::new()
        }
        Msg::CancelClicked => {
            // A running batch keeps going; only the draft is discarded.
            if state.is_open() {
                state.close();
            }
            Vec::new()
        }
        Msg::FieldEdited(field) => {
            if state.is_open() {
                state.set_field(field);
            }
            Vec::new()
        }
        Msg::SaveClicked => {
            if state.is_open() {
                let config = state.commit_draft();
                state.close();
                vec![Effect::SaveConfig(config)]
            } else {
                Vec::new()
            }
        }
        Msg::GenerateClicked => {
            if state.is_open() && !state.is_processing() {
                request_generate(&mut state);
            }
            Vec::new()
        }
        Msg::GenerateConfirmed => match state.take_confirmation() {
            Some(_) if !state.is_processing() => {
                // Recount: the owner may have replaced links while the prompt was up.
                let total = missing_descriptions(state.links()).len();
                if total == 0 {
                    state.show_notice(Notice::NothingToGenerate);
                    Vec::new()
                } else {
                    let batch_id = state.begin_batch(total);
                    vec![Effect::StartBatch {
                        batch_id,
                        config: state.draft().clone(),
                        links: state.links().to_vec(),
                    }]
                }
            }
            _ => Vec::new(),
        },
        Msg::GenerateDeclined => {
            state.take_confirmation();
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::StopClicked => {
            if state.is_processing() {
                state.end_processing();
                vec![Effect::StopBatch]
            } else {
                Vec::new()
            }
        }
        // Runner events from a superseded run are dropped.
        Msg::BatchProgressed { batch_id, progress } => {
            if state.is_current_batch(batch_id) {
                state.set_progress(progress);
            }
            Vec::new()
        }
        Msg::LinksPublished { batch_id, links } => {
            if state.is_current_batch(batch_id) {
                state.replace_links(links);
            }
            Vec::new()
        }
        Msg::LinksReplaced(links) => {
            state.replace_links(links);
            Vec::new()
        }
        Msg::BatchFinished { batch_id } => {
            if state.is_current_batch(batch_id) {
                state.end_processing();
            }
            Vec::new()
        }
        Msg::ConfigLoaded(config) => {
            state.load_config(config);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn request_generate(state: &mut DialogState) {
    if !state.draft().has_api_key() {
        state.show_notice(Notice::MissingApiKey);
        return;
    }
    let count = missing_descriptions(state.links()).len();
    if count == 0 {
        state.show_notice(Notice::NothingToGenerate);
        return;
    }
    state.ask_confirmation(count);
}
