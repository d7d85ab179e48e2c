use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use describer_core::{update, ConfigField, DialogState, Effect, LinkItem, Msg};
use describer_engine::{BatchEvent, EngineHandle, GeneratorSettings};
use describer_logging::{describer_error, describer_info};

use crate::cli::{Cli, Command, ConfigureArgs};
use crate::effects::EffectRunner;
use crate::persistence::{next_link_id, Store};
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let store = Store::new(cli.data_dir.clone());
    describer_info!("Data dir {:?}", cli.data_dir);

    match cli.command {
        Command::Show => show(&store),
        Command::Configure(args) => configure(store, args),
        Command::Add {
            title,
            url,
            description,
        } => add(&store, title, url, description),
        Command::Generate { yes } => generate(store, yes),
    }
}

/// The owner side of the dialog: holds the state and feeds it messages.
struct Session {
    state: DialogState,
    runner: EffectRunner,
}

impl Session {
    fn open(runner: EffectRunner) -> Self {
        let store = runner.store();
        let state = DialogState::with_owner(store.load_config(), store.load_links());
        let mut session = Self { state, runner };
        session.dispatch(Msg::DialogOpened);
        session
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.execute(effects.clone());
        effects
    }
}

fn show(store: &Store) -> anyhow::Result<()> {
    let state = DialogState::with_owner(store.load_config(), store.load_links());
    for line in ui::render::render_links(state.links()) {
        println!("{line}");
    }
    println!();
    for line in ui::render::render(&state.view()) {
        println!("{line}");
    }
    Ok(())
}

fn configure(store: Store, args: ConfigureArgs) -> anyhow::Result<()> {
    let mut session = Session::open(EffectRunner::new(store));
    if args.is_empty() {
        for line in ui::render::render_config(&session.state.view()) {
            println!("{line}");
        }
        session.dispatch(Msg::CancelClicked);
        return Ok(());
    }

    let fields = [
        args.provider.map(|p| ConfigField::Provider(p.into())),
        args.api_key.map(ConfigField::ApiKey),
        args.base_url.map(ConfigField::BaseUrl),
        args.model.map(ConfigField::Model),
    ];
    for field in fields.into_iter().flatten() {
        session.dispatch(Msg::FieldEdited(field));
    }
    let view = session.state.view();
    session.dispatch(Msg::SaveClicked);

    println!("Saved configuration:");
    for line in ui::render::render_config(&view) {
        println!("{line}");
    }
    Ok(())
}

fn add(
    store: &Store,
    title: String,
    url: String,
    description: Option<String>,
) -> anyhow::Result<()> {
    let mut links = store.load_links();
    let link = LinkItem {
        id: next_link_id(&links),
        title,
        url,
        description,
    };
    println!("Added link {}", link.id);
    links.push(link);
    store.save_links(&links).context("saving links")
}

fn generate(store: Store, assume_yes: bool) -> anyhow::Result<()> {
    let engine = EngineHandle::new(GeneratorSettings::default());
    let mut session = Session::open(EffectRunner::with_engine(store, engine));

    session.dispatch(Msg::GenerateClicked);
    if let Some(notice) = session.state.notice() {
        println!("{}", notice.message());
        session.dispatch(Msg::NoticeDismissed);
        return Ok(());
    }
    let Some(confirmation) = session.state.confirmation() else {
        return Ok(());
    };

    let accepted = assume_yes || ui::prompt::confirm(&confirmation.prompt())?;
    if !accepted {
        session.dispatch(Msg::GenerateDeclined);
        println!("Nothing generated.");
        return Ok(());
    }
    session.dispatch(Msg::GenerateConfirmed);

    let stop_rx = spawn_stop_listener();
    loop {
        if stop_rx.try_recv().is_ok() && session.state.is_processing() {
            println!("Stopping after the current link...");
            session.dispatch(Msg::StopClicked);
        }

        // The loop ends on the run's terminal event, which also follows a stop
        // once the in-flight item has unwound.
        let received = match session.runner.engine() {
            Some(engine) => engine.recv_timeout(POLL_INTERVAL),
            None => anyhow::bail!("no batch engine running"),
        };
        let Some(event) = received.context("batch engine went away before the run finished")?
        else {
            continue;
        };

        let terminal = event.is_terminal();
        let mut aborted = None;
        match &event.event {
            BatchEvent::Started { .. } | BatchEvent::Progress(_) => {}
            BatchEvent::LinksPublished(links) => {
                // Every publish is persisted so a later stop or crash keeps the work.
                if let Err(err) = session.runner.store().save_links(links) {
                    describer_error!("Failed to save links: {:#}", err);
                }
            }
            BatchEvent::ItemFailed { id, error } => {
                println!("Link {id}: {error}");
            }
            BatchEvent::Finished(summary) => {
                println!(
                    "Done: {} described, {} failed{}.",
                    summary.succeeded,
                    summary.failed.len(),
                    if summary.stopped { ", stopped early" } else { "" }
                );
            }
            BatchEvent::Aborted { reason } => aborted = Some(reason.clone()),
        }
        if let Some(msg) = event.into_msg() {
            session.dispatch(msg);
        }
        if let Some(reason) = aborted {
            session.dispatch(Msg::CancelClicked);
            anyhow::bail!("batch aborted: {reason}");
        }
        if terminal {
            break;
        }

        if session.state.consume_dirty() && session.state.is_processing() {
            println!("{}", ui::render::render_panel(session.state.view().panel));
        }
    }

    session.dispatch(Msg::CancelClicked);
    Ok(())
}

/// Reads stdin lines on a helper thread and signals each stop command.
fn spawn_stop_listener() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if ui::prompt::is_stop_command(&line) && tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}
