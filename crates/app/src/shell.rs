//! Line-oriented terminal front-end
//!
//! Reads one command per line and prints the resulting screen as text.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use edulog_core::LocalStorage;
use edulog_net::{RelayProgress, SyncJob, SyncOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::viewmodel::{Controller, Overlay, PolishTicket, View};

const HELP: &str = "\
commands:
  classes                list classes (filtered by the current search)
  search <text>          filter classes by name
  open <n>               open class n
  back                   return to the class list
  archive                toggle the record archive
  student <n>            write a note for student n of the open class
  record <n>             edit archived record n
  write <text>           replace the note text
  polish                 rewrite the note in record-book style
  save | cancel          save or discard the note
  settings               open settings
  settings url <url>     set the sheet web app URL
  settings key <key>     set the relay API key
  settings save          save settings and reload the roster
  refresh                reload the roster
  help | quit";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Classes,
    Search(&'a str),
    Open(usize),
    Back,
    Archive,
    Student(usize),
    Record(usize),
    Write(&'a str),
    Polish,
    Save,
    Cancel,
    Settings,
    SettingsUrl(&'a str),
    SettingsKey(&'a str),
    SettingsSave,
    Refresh,
    Help,
    Quit,
}

fn parse(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let index = || rest.parse::<usize>().ok().filter(|n| *n > 0);

    let command = match head {
        "classes" => Command::Classes,
        "search" => Command::Search(rest),
        "open" => Command::Open(index()?),
        "back" => Command::Back,
        "archive" => Command::Archive,
        "student" => Command::Student(index()?),
        "record" => Command::Record(index()?),
        "write" => Command::Write(rest),
        "polish" => Command::Polish,
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "settings" => {
            let (sub, value) = rest.split_once(' ').unwrap_or((rest, ""));
            match sub {
                "" => Command::Settings,
                "url" => Command::SettingsUrl(value.trim()),
                "key" => Command::SettingsKey(value.trim()),
                "save" => Command::SettingsSave,
                _ => return None,
            }
        }
        "refresh" => Command::Refresh,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

type Task<T> = Pin<Box<dyn Future<Output = T>>>;

/// Network work started by a command and still in flight
#[derive(Default)]
struct Pending {
    polish: Option<(PolishTicket, Task<String>)>,
    sync: Option<Task<SyncOutcome>>,
    queued: VecDeque<SyncJob>,
}

impl Pending {
    /// One delivery at a time, in save order
    fn start_next_sync<S: LocalStorage + Clone + 'static>(&mut self, ctl: &mut Controller<S>) {
        if self.sync.is_some() {
            return;
        }
        if let Some(job) = self.queued.pop_front() {
            self.sync = Some(Box::pin(ctl.sync_task(job)));
        }
    }
}

fn print_progress(progress: RelayProgress) {
    println!("  … {}", progress);
}

/// Resolve an optional task, or never when there is none
async fn settle<T: 'static>(task: Option<&mut Task<T>>) -> T {
    match task {
        Some(task) => task.await,
        None => std::future::pending().await,
    }
}

/// Run the read-eval-print loop until `quit` or end of input.
///
/// Relay and sync calls run alongside input, so commands such as `cancel`
/// are handled while a request is outstanding.
pub async fn run<S, R>(ctl: &mut Controller<S>, input: R)
where
    S: LocalStorage + Clone + 'static,
    R: AsyncBufRead + Unpin,
{
    ctl.start().await;
    render(ctl);

    let mut lines = input.lines();
    let mut pending = Pending::default();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Ok(Some(line)) = line else {
                    break;
                };
                let Some(command) = parse(&line) else {
                    println!("? unknown command, try `help`");
                    continue;
                };
                debug!(?command, "Command");
                if command == Command::Quit {
                    break;
                }
                execute(ctl, &mut pending, command).await;
            }
            polished = settle(pending.polish.as_mut().map(|(_, task)| task)) => {
                if let Some((ticket, _)) = pending.polish.take() {
                    ctl.finish_polish(ticket, polished);
                }
            }
            outcome = settle(pending.sync.as_mut()) => {
                pending.sync = None;
                ctl.finish_sync(outcome);
            }
        }
        pending.start_next_sync(ctl);
        render(ctl);
    }

    // Saved notes still reach the sheet; an unfinished polish is dropped
    while let Some(task) = pending.sync.take() {
        let outcome = task.await;
        ctl.finish_sync(outcome);
        pending.start_next_sync(ctl);
    }
}

async fn execute<S>(ctl: &mut Controller<S>, pending: &mut Pending, command: Command<'_>)
where
    S: LocalStorage + Clone + 'static,
{
    match command {
        Command::Classes => {}
        Command::Search(q) => ctl.set_search_query(q),
        Command::Open(n) => {
            let id = ctl.filtered_classes().get(n - 1).map(|c| c.id.clone());
            if let Some(id) = id {
                ctl.select_class(&id);
            }
        }
        Command::Back => ctl.back(),
        Command::Archive => ctl.toggle_archive(),
        Command::Student(n) => {
            let id = ctl
                .active_class()
                .and_then(|c| c.students.get(n - 1))
                .map(|s| s.id.clone());
            if let Some(id) = id {
                ctl.open_student(&id);
            }
        }
        Command::Record(n) => {
            let id = ctl
                .archive()
                .into_iter()
                .flat_map(|g| g.records)
                .nth(n - 1)
                .map(|r| r.id);
            if let Some(id) = id {
                ctl.open_record(&id);
            }
        }
        Command::Write(text) => ctl.set_content(text),
        Command::Polish => {
            if let Some((ticket, task)) = ctl.polish_task(print_progress) {
                pending.polish = Some((ticket, Box::pin(task)));
            }
        }
        Command::Save => {
            if let Some(job) = ctl.save() {
                pending.queued.push_back(job);
            }
        }
        Command::Cancel => {
            ctl.close_editor();
            ctl.close_settings();
        }
        Command::Settings => ctl.open_settings(),
        Command::SettingsUrl(url) => {
            if let Some(draft) = ctl.settings_draft_mut() {
                draft.endpoint_url = url.to_string();
            }
        }
        Command::SettingsKey(key) => {
            if let Some(draft) = ctl.settings_draft_mut() {
                draft.api_key = key.to_string();
            }
        }
        Command::SettingsSave => ctl.save_settings().await,
        Command::Refresh => ctl.refresh_roster().await,
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn render<S: LocalStorage + Clone>(ctl: &mut Controller<S>) {
    println!();
    println!("== {} [{}]", ctl.title(), ctl.connection_label());

    match ctl.overlay() {
        Overlay::Settings(draft) => {
            println!("settings");
            println!("  url: {}", draft.endpoint_url);
            println!("  key: {}", if draft.api_key.is_empty() { "(none)" } else { "********" });
        }
        Overlay::Editor(editor) => {
            println!(
                "note for {} ({}){}",
                editor.student.label(),
                editor.class_name,
                if editor.is_edit() { " [edit]" } else { "" }
            );
            println!(
                "  {}",
                if editor.content.is_empty() { "(empty)" } else { editor.content.as_str() }
            );
        }
        Overlay::None => match (ctl.view(), ctl.active_class()) {
            (View::Main, Some(class)) => {
                for (i, student) in class.students.iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, student.label());
                }
            }
            (View::Main, None) if ctl.classes().is_empty() => {
                println!("  no classes yet, set the sheet URL with `settings`");
            }
            (View::Main, None) => {
                for (i, class) in ctl.filtered_classes().iter().enumerate() {
                    println!("  {:>2}. {} ({}명)", i + 1, class.name, class.student_count());
                }
            }
            (View::Recent, _) => {
                let groups = ctl.archive();
                if groups.is_empty() {
                    println!("  no records yet");
                }
                let mut n = 0;
                for group in groups {
                    println!("  -- {}", group.label);
                    for record in group.records {
                        n += 1;
                        println!(
                            "  {:>2}. {} {} [{}] {}",
                            n,
                            record.student_number,
                            record.student_name,
                            record.class_name,
                            record.content
                        );
                    }
                }
            }
        },
    }

    if let Some(toast) = ctl.toasts_mut().take() {
        println!("[{}] {}", toast.severity, toast.text);
    }
}
