use anyhow::{Context, Result};
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use tapper::bundle::{Bundle, SavedGame};
use tapper::controller::GameController;
use tapper::menu::{AboutInfo, MenuAction};
use tapper::settings::{PlayerSettings, SettingsStore};
use tapper::surface::Surface;

/// Prints everything to stdout, one line per update.
struct TerminalSurface;

impl Surface for TerminalSurface {
    fn show_score(&mut self, text: &str) {
        println!("{text}");
    }

    fn show_time_left(&mut self, text: &str) {
        println!("{text}");
    }

    fn acknowledge_tap(&mut self) {
        println!("*tap*");
    }

    fn notify(&mut self, text: &str) {
        println!(">> {text}");
    }

    fn show_about(&mut self, about: &AboutInfo) {
        println!("== {} ==", about.title);
        println!("{}", about.message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Tap,
    Rotate,
    Pause,
    Resume,
    Menu(MenuAction),
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "" | "t" | "tap" => Command::Tap,
        "r" | "rotate" => Command::Rotate,
        "p" | "pause" => Command::Pause,
        "resume" => Command::Resume,
        "a" | "about" => Command::Menu(MenuAction::About),
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => MenuAction::all()
            .iter()
            .find(|action| action.id().eq_ignore_ascii_case(other))
            .map(|action| Command::Menu(*action))
            .unwrap_or_else(|| Command::Unknown(other.to_string())),
    }
}

fn print_help() {
    println!("enter / t   tap the button");
    println!("r           rotate the screen (save and restore the game)");
    println!("p / resume  pause and resume");
    println!("a           {}", MenuAction::About.label());
    println!("q           quit");
}

/// Does what a configuration change does to a screen: save into a bundle,
/// throw the controller away, build a new one from the bundle.
fn rotate(
    mut controller: GameController<TerminalSurface>,
    settings: &PlayerSettings,
) -> Result<GameController<TerminalSurface>> {
    let mut bundle = Bundle::new();
    controller.on_save_instance_state(&mut bundle);
    let surface = controller.into_surface();
    debug!("configuration change with {bundle:?}");

    let saved = SavedGame::read_from(&bundle).context("restoring the saved game")?;
    let mut controller = GameController::new(surface, settings);
    controller.on_start(saved);
    Ok(controller)
}

fn load_settings() -> PlayerSettings {
    let store = SettingsStore::from_env();
    if !store.exists() {
        if let Err(err) = store.save(&PlayerSettings::default()) {
            warn!("could not write {}: {err}", store.path().display());
        }
    }
    store.load()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let settings = load_settings();
    print_help();

    let mut controller = GameController::new(TerminalSurface, &settings);
    controller.on_start(None);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Command::Tap => controller.on_tap(),
                    Command::Rotate => controller = rotate(controller, &settings)?,
                    Command::Pause => {
                        controller.on_suspend();
                    }
                    Command::Resume => controller.on_resume(),
                    Command::Menu(action) => controller.on_menu_action(action),
                    Command::Help => print_help(),
                    Command::Quit => break,
                    Command::Unknown(word) => println!("unknown command `{word}`, try `help`"),
                }
            }
            Some(event) = controller.next_countdown_event() => {
                controller.on_countdown(event);
            }
        }
    }

    controller.on_suspend();
    Ok(())
}
