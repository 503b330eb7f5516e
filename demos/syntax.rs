use std::io::Read;

use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::widgets::Block;
use ratatui::Terminal;

use tui_constituency_tree::{SyntaxState, SyntaxView, ViewMode};

const FALLBACK: &str = "(ROOT (S (NP (DT The) (JJ quick) (JJ brown) (NN fox)) (VP (VBZ jumps) (PP (IN over) (NP (DT the) (JJ lazy) (NN dog)))) (. .)))";

/// The bracketed tree from the arguments, stdin or a built-in sentence.
fn input() -> std::io::Result<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.first().is_some_and(|arg| arg == "-") {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        return Ok(input);
    }
    if args.is_empty() {
        Ok(FALLBACK.to_owned())
    } else {
        Ok(args.join(" "))
    }
}

fn main() -> std::io::Result<()> {
    let mut state = SyntaxState::default();
    state.set_result(input()?);

    // Terminal initialization
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // App
    let res = run_app(&mut terminal, state);

    // restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut state: SyntaxState,
) -> std::io::Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            let title = match state.mode() {
                ViewMode::Tree => "Constituency Tree",
                ViewMode::Text => "Constituency Tree (text)",
            };
            let bottom = state.error().map_or_else(
                || "q quit · t toggle view · arrows scroll".to_owned(),
                |error| format!("Error parsing tree: {error}"),
            );
            let widget = SyntaxView::new().block(
                Block::bordered().title(title).title_bottom(bottom),
            );
            frame.render_stateful_widget(widget, area, &mut state);
        })?;

        match crossterm::event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('t') => {
                    state.toggle_mode();
                }
                KeyCode::Left => {
                    state.tree_state_mut().scroll_left(2);
                }
                KeyCode::Right => {
                    state.tree_state_mut().scroll_right(2);
                }
                KeyCode::Up => {
                    state.tree_state_mut().scroll_up(1);
                }
                KeyCode::Down => {
                    state.tree_state_mut().scroll_down(1);
                }
                KeyCode::Home => {
                    state.tree_state_mut().scroll_home();
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    state.tree_state_mut().scroll_down(1);
                }
                MouseEventKind::ScrollUp => {
                    state.tree_state_mut().scroll_up(1);
                }
                _ => {}
            },
            _ => {}
        }
    }
}
