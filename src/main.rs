mod config;
mod input;
mod logger;
mod pathfinder;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use config::Config;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use pathfinder::fetch::RecommendationFetcher;
use pathfinder::logic::{FetchRequest, Msg};
use pathfinder::PathFinder;
use ratzilla::event::{KeyCode, KeyEvent, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    log::trace!("click: pixel=({}, {}) cell=({}, {})", mouse_x, mouse_y, col, row);
    Some((col, row))
}

fn key_to_input(key_event: &KeyEvent) -> Option<InputEvent> {
    if key_event.ctrl || key_event.alt {
        return None;
    }
    match key_event.code {
        KeyCode::Char(c) => Some(InputEvent::Key(c)),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Enter => Some(InputEvent::Enter),
        KeyCode::Tab if key_event.shift => Some(InputEvent::BackTab),
        KeyCode::Tab => Some(InputEvent::Tab),
        KeyCode::Up => Some(InputEvent::Up),
        KeyCode::Down => Some(InputEvent::Down),
        _ => None,
    }
}

/// Run the fetch on the browser event loop and feed the outcome back.
/// The app is not borrowed across the await.
fn spawn_fetch(
    app: Rc<RefCell<PathFinder>>,
    fetcher: Rc<RecommendationFetcher>,
    request: FetchRequest,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetcher.fetch(request.dept_id(), &request.job_title).await;
        let follow_up = app.borrow_mut().dispatch(Msg::FetchCompleted(result));
        debug_assert!(follow_up.is_none());
    });
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let config = Config::load();
    logger::init(config.log_level);

    let app = Rc::new(RefCell::new(PathFinder::new()));
    let fetcher = Rc::new(RecommendationFetcher::new(config.api_base_url));
    log::info!("PathFinder using recommendation API at {}", fetcher.base_url());
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let fetcher = fetcher.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action_id) = action {
                let request = app.borrow_mut().handle_input(&InputEvent::Click(action_id));
                if let Some(request) = request {
                    spawn_fetch(app.clone(), fetcher.clone(), request);
                }
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        let fetcher = fetcher.clone();
        move |key_event| {
            let Some(event) = key_to_input(&key_event) else {
                return;
            };
            let request = app.borrow_mut().handle_input(&event);
            if let Some(request) = request {
                spawn_fetch(app.clone(), fetcher.clone(), request);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let app = app.borrow();
            let size = f.area();

            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            app.render(f, size, &click_state);
        }
    });

    Ok(())
}
