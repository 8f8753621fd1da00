mod view;

use std::sync::OnceLock;

use nannou::{event::{Key, Update}, frame::Frame, App};
use snake_ladder::{
    config::GameConfig,
    controller::{Event, Flow, GameController},
    rules::GameSession,
};
use tracing::{error, info, warn};

static CONFIG: OnceLock<GameConfig> = OnceLock::new();

fn main() {
    let config = match GameConfig::discover() {
        Ok(Some(config)) => {
            snake_ladder::logging::init(&config.logging.filter);
            config
        }
        Ok(None) => {
            let config = GameConfig::default();
            snake_ladder::logging::init(&config.logging.filter);
            warn!("no config.toml found, using default settings");
            config
        }
        Err(e) => {
            let config = GameConfig::default();
            snake_ladder::logging::init(&config.logging.filter);
            warn!(error = %e, "config.toml ignored, using default settings");
            config
        }
    };
    CONFIG.get_or_init(|| config);

    nannou::app(model).update(update).run();
}

struct Model {
    config: GameConfig,
    screen: Screen,
}

enum Screen {
    ChoosePlayers,
    Playing(GameController),
}

fn model(app: &App) -> Model {
    let config = CONFIG.get().cloned().unwrap_or_default();
    app.set_exit_on_escape(false);
    app.new_window()
        .title("Snake & Ladder")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .expect("failed to open the game window");

    Model {
        config,
        screen: Screen::ChoosePlayers,
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    if key == Key::Escape {
        info!("quit from keyboard");
        if let Screen::Playing(controller) = &mut model.screen {
            controller.handle(Event::QuitRequested);
        }
        app.quit();
        return;
    }

    match &mut model.screen {
        Screen::ChoosePlayers => {
            let players = match key {
                Key::Key2 | Key::Numpad2 => 2,
                Key::Key3 | Key::Numpad3 => 3,
                Key::Key4 | Key::Numpad4 => 4,
                _ => return,
            };
            match GameSession::new(players) {
                Ok(session) => {
                    info!(players, "game started");
                    let controller = GameController::new(session, model.config.animation.clone());
                    model.screen = Screen::Playing(controller);
                }
                Err(e) => error!(error = %e, "could not start game"),
            }
        }
        Screen::Playing(controller) => {
            if key == Key::Space && controller.handle(Event::RollRequested) == Flow::Exit {
                app.quit();
            }
        }
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    if let Screen::Playing(controller) = &mut model.screen {
        if controller.tick(update.since_last) == Flow::Exit {
            info!("game finished");
            app.quit();
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window = app.window_rect();

    match &model.screen {
        Screen::ChoosePlayers => view::choose_players(&draw, window),
        Screen::Playing(controller) => {
            let layout = view::Layout::new(window, model.config.window.cell_size as f32);
            view::game(&draw, &layout, controller.session().board(), &controller.frame());
        }
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        error!(error = ?e, "failed to render frame");
    }
}
