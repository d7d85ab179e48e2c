mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{init_logging, keyed_config, link};
use describer_core::{update, AiConfig, DialogState, Effect, Msg};
use describer_engine::{
    BatchEvent, DescriptionGenerator, EngineEvent, EngineHandle, FailureKind, GenerateError,
};
use pretty_assertions::assert_eq;

/// Slow on the first call for `slow_title`; fails any later call for it.
struct SlowOnceGenerator {
    slow_title: &'static str,
    calls: Mutex<Vec<String>>,
}

impl SlowOnceGenerator {
    fn new(slow_title: &'static str) -> Self {
        Self {
            slow_title,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DescriptionGenerator for SlowOnceGenerator {
    async fn generate(
        &self,
        title: &str,
        _url: &str,
        _config: &AiConfig,
    ) -> Result<String, GenerateError> {
        let seen = {
            let mut calls = self.calls.lock().unwrap();
            let seen = calls.iter().filter(|t| *t == title).count();
            calls.push(title.to_string());
            seen
        };
        if title == self.slow_title {
            if seen > 0 {
                return Err(GenerateError {
                    kind: FailureKind::HttpStatus(500),
                    message: "regenerated".to_string(),
                });
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Ok(format!("About {title}"))
    }
}

struct PanickingGenerator;

#[async_trait::async_trait]
impl DescriptionGenerator for PanickingGenerator {
    async fn generate(
        &self,
        _title: &str,
        _url: &str,
        _config: &AiConfig,
    ) -> Result<String, GenerateError> {
        panic!("generator blew up");
    }
}

fn confirm(state: DialogState) -> (DialogState, Effect) {
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, mut effects) = update(state, Msg::GenerateConfirmed);
    assert_eq!(effects.len(), 1);
    (state, effects.remove(0))
}

fn execute(engine: &EngineHandle, effect: Effect) {
    match effect {
        Effect::StartBatch {
            batch_id,
            config,
            links,
        } => engine.start_batch(batch_id, config, links),
        Effect::StopBatch => engine.stop(),
        Effect::SaveConfig(_) => {}
    }
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine alive")
        .expect("event before timeout")
}

#[test]
fn stop_then_restart_keeps_in_flight_work_and_stays_stoppable() {
    init_logging();
    let generator = Arc::new(SlowOnceGenerator::new("A"));
    let engine = EngineHandle::with_generator(generator.clone());

    let owner = DialogState::with_owner(keyed_config(), vec![link(1, "A"), link(2, "B")]);
    let (state, _) = update(owner, Msg::DialogOpened);

    let (state, effect) = confirm(state);
    execute(&engine, effect);
    // Let the call for A get in flight before stopping.
    std::thread::sleep(Duration::from_millis(50));
    let (state, mut effects) = update(state, Msg::StopClicked);
    execute(&engine, effects.remove(0));
    assert!(!state.is_processing());

    let (mut state, effect) = confirm(state);
    assert!(matches!(effect, Effect::StartBatch { batch_id: 2, .. }));
    execute(&engine, effect);

    loop {
        let event = next_event(&engine);
        let done = event.batch_id == 2 && event.is_terminal();
        let first_run_finished = event.batch_id == 1 && event.is_terminal();
        if let Some(msg) = event.into_msg() {
            state = update(state, msg).0;
        }
        if first_run_finished {
            // The late finish of the stopped run leaves the restarted one running.
            assert!(state.is_processing());
            assert_eq!(state.current_batch(), Some(2));
        }
        if done {
            break;
        }
    }

    assert!(!state.is_processing());
    assert!(state
        .links()
        .iter()
        .all(|link| link.description == Some(format!("About {}", link.title))));
    assert_eq!(generator.calls(), vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn stop_during_restarted_run_reaches_the_new_run() {
    init_logging();
    let generator = Arc::new(SlowOnceGenerator::new("B"));
    let engine = EngineHandle::with_generator(generator.clone());

    engine.start_batch(1, keyed_config(), vec![link(1, "A")]);
    engine.stop();
    engine.start_batch(2, keyed_config(), vec![link(2, "B"), link(3, "C")]);
    std::thread::sleep(Duration::from_millis(50));
    engine.stop();

    let summary = loop {
        let event = next_event(&engine);
        if let (2, BatchEvent::Finished(summary)) = (event.batch_id, &event.event) {
            break summary.clone();
        }
    };

    assert!(summary.stopped);
    assert_eq!(summary.succeeded, 1);
    assert!(!generator.calls().contains(&"C".to_string()));
}

#[test]
fn panicking_run_reports_aborted() {
    init_logging();
    let engine = EngineHandle::with_generator(Arc::new(PanickingGenerator));

    engine.start_batch(4, keyed_config(), vec![link(1, "A")]);

    let terminal = loop {
        let event = next_event(&engine);
        if event.is_terminal() {
            break event;
        }
    };
    assert_eq!(terminal.batch_id, 4);
    assert!(matches!(terminal.event, BatchEvent::Aborted { .. }));
    assert_eq!(terminal.into_msg(), Some(Msg::BatchFinished { batch_id: 4 }));

    // The engine thread outlives the panicked task.
    engine.stop();
    assert_eq!(engine.try_recv(), Ok(None));
}
