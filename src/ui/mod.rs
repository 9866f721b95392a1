mod history;
mod quiz;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, View};
use crate::cache::CacheStore;
use crate::engine::Clock;
use crate::source::QuestionSource;

pub fn render<S, C, K>(frame: &mut Frame, app: &App<S, C, K>)
where
    S: QuestionSource,
    C: CacheStore,
    K: Clock,
{
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.view {
        View::Quiz => quiz::render(frame, area, app.session(), app.cursor(), app.today()),
        View::History => history::render(frame, area, app.history(), app.history_scroll()),
    }
}
