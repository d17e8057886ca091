use game_ui::host::ColorF;
use game_ui::render::glow;
use game_ui::{Config, GameUi, GlRenderer, GuiHost, ImguiHost, ItemFlags, RodioSoundPlayer, Sound, SoundPlayer};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::video::{FullscreenType, GLProfile};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

const CONFIG_PATH: &str = "assets/config/game_ui.json";
const BACKDROP_PATH: &str = "assets/textures/menu_backdrop.png";

const CLEAR_COLOR: ColorF = ColorF::new(0.078, 0.094, 0.125, 1.0);

const QUALITY_OPTIONS: [&str; 4] = ["LOW", "MEDIUM", "HIGH", "ULTRA"];
const DIFFICULTY_OPTIONS: [&str; 3] = ["EASY", "NORMAL", "HARD"];

/// Which menu screen is showing
#[derive(Debug, Clone, Copy, PartialEq)]
enum Menu {
    Main,
    Options,
    Credits,
}

/// Settings edited by the options menu
#[derive(Debug, Clone)]
struct Settings {
    fullscreen: bool,
    subtitles: bool,
    show_resolution: bool,
    music_volume: f32,
    sfx_volume: f32,
    quality: usize,
    difficulty: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fullscreen: false,
            subtitles: true,
            show_resolution: false,
            music_volume: 0.8,
            sfx_volume: 0.5,
            quality: 2,
            difficulty: 1,
        }
    }
}

/// What the frame asked the main loop to do
#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuAction {
    None,
    Quit,
}

fn draw_menu(ui: &mut GameUi<ImguiHost>, menu: &mut Menu, settings: &mut Settings) -> MenuAction {
    let mut action = MenuAction::None;

    match *menu {
        Menu::Main => {
            ui.draw_title_bar("MAIN MENU");
            ui.begin_items(ItemFlags::NONE);
            if ui.button("CONTINUE") {
                log::info!("Continue pressed");
            }
            if ui.button("OPTIONS") {
                *menu = Menu::Options;
            }
            if ui.button("CREDITS") {
                *menu = Menu::Credits;
            }
            if ui.button("QUIT") {
                action = MenuAction::Quit;
            }
            ui.end_items();
        }
        Menu::Options => {
            ui.draw_title_bar("OPTIONS");
            ui.begin_items(ItemFlags::SCROLL_WINDOW | ItemFlags::SMALL_ITEMS);
            ui.check_box("FULLSCREEN", &mut settings.fullscreen);
            ui.check_box("SUBTITLES", &mut settings.subtitles);
            ui.check_box("SHOW RESOLUTION", &mut settings.show_resolution);
            ui.slider("MUSIC VOLUME", &mut settings.music_volume);
            ui.slider("SFX VOLUME", &mut settings.sfx_volume);
            ui.combo_box("QUALITY", &QUALITY_OPTIONS, &mut settings.quality);
            ui.combo_box("DIFFICULTY", &DIFFICULTY_OPTIONS, &mut settings.difficulty);
            if ui.button("BACK") {
                *menu = Menu::Main;
            }
            ui.end_items();
        }
        Menu::Credits => {
            ui.draw_title_bar("CREDITS");
            ui.begin_items(ItemFlags::SCROLL_WINDOW | ItemFlags::SMALL_ITEMS);
            for line in ["DESIGN", "PROGRAMMING", "ART", "SOUND", "TESTING", "SPECIAL THANKS"] {
                ui.host_mut().text(line);
            }
            if ui.button("BACK") {
                *menu = Menu::Main;
            }
            ui.end_items();
        }
    }

    action
}

fn main() -> Result<(), String> {
    env_logger::init();

    let config = Config::load_or_default(Some(Path::new(CONFIG_PATH)))?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let gl_attr = video_subsystem.gl_attr();
    gl_attr.set_context_profile(GLProfile::Core);
    gl_attr.set_context_version(3, 3);

    let mut window = video_subsystem
        .window("Game UI", WINDOW_WIDTH, WINDOW_HEIGHT)
        .position_centered()
        .resizable()
        .allow_highdpi()
        .opengl()
        .build()
        .map_err(|e| e.to_string())?;

    let gl_context = window.gl_create_context()?;
    window.gl_make_current(&gl_context)?;
    let gl = unsafe { glow::Context::from_loader_function(|s| video_subsystem.gl_get_proc_address(s) as _) };
    let mut event_pump = sdl_context.event_pump()?;

    // Fonts must be in the atlas before the renderer uploads it
    let mut ui = GameUi::init(ImguiHost::new(), &config)?;
    let mut renderer = GlRenderer::new(gl, ui.host_mut().context_mut())?;
    let backdrop = match renderer.load_texture(BACKDROP_PATH) {
        Ok(texture) => Some(texture),
        Err(e) => {
            log::warn!("No menu backdrop ({}): {}", BACKDROP_PATH, e);
            None
        }
    };

    // Shared so the options menu can change the effect volume
    let sound_player = RodioSoundPlayer::new().map(|player| Rc::new(RefCell::new(player)));
    if let Some(player) = &sound_player {
        let player = Rc::clone(player);
        ui.set_sound_player(Some(Box::new(move |sound: Sound| player.borrow_mut().play(sound))));
    }

    let mut menu = Menu::Main;
    let mut settings = Settings::default();

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    if menu == Menu::Main {
                        break 'running;
                    }
                    menu = Menu::Main;
                }
                _ => {
                    ui.host_mut().handle_event(&event);
                }
            }
        }

        let (width, height) = window.size();
        let (drawable_width, drawable_height) = window.drawable_size();
        ui.host_mut().set_framebuffer_scale([
            drawable_width as f32 / width.max(1) as f32,
            drawable_height as f32 / height.max(1) as f32,
        ]);
        let previous = settings.clone();

        ui.begin(width, height, backdrop);
        let action = draw_menu(&mut ui, &mut menu, &mut settings);
        if settings.show_resolution {
            ui.host_mut().text(&format!("{}X{}", width, height));
        }
        ui.end();

        if action == MenuAction::Quit {
            break 'running;
        }

        if settings.fullscreen != previous.fullscreen {
            let mode = if settings.fullscreen {
                FullscreenType::Desktop
            } else {
                FullscreenType::Off
            };
            window.set_fullscreen(mode)?;
            log::info!("Fullscreen: {}", settings.fullscreen);
        }
        if settings.sfx_volume != previous.sfx_volume {
            if let Some(player) = &sound_player {
                player.borrow().set_volume(settings.sfx_volume);
            }
        }
        if settings.quality != previous.quality || settings.difficulty != previous.difficulty {
            log::info!(
                "Quality {}, difficulty {}",
                QUALITY_OPTIONS[settings.quality],
                DIFFICULTY_OPTIONS[settings.difficulty]
            );
        }

        renderer.clear(CLEAR_COLOR, window.drawable_size());
        if let Some(draw_data) = ui.host().draw_data() {
            renderer.render(draw_data)?;
        }
        window.gl_swap_window();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    log::info!("Menu closed");
    Ok(())
}
