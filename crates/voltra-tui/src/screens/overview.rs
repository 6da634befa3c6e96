//! Overview section -- stat tiles plus the weekly energy chart.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph,
};

use voltra_core::{EnergySeries, Workspace};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct OverviewScreen {
    workspace: Arc<Workspace>,
    series: EnergySeries,
}

impl OverviewScreen {
    pub fn new(workspace: &Arc<Workspace>) -> Self {
        Self {
            workspace: Arc::clone(workspace),
            series: workspace.energy_series(),
        }
    }

    fn spawn_load_all(&self) {
        let workspace = Arc::clone(&self.workspace);
        tokio::spawn(async move {
            let _ = workspace.load_all().await;
        });
    }

    fn render_tiles(&self, frame: &mut Frame, area: Rect) {
        let stats = self.workspace.overview();
        let tiles = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .split(area);

        let tile = |title: &str, value: String, detail: Option<Line<'static>>| {
            let block = Block::default()
                .title(Span::styled(format!(" {title} "), theme::title_style()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            let mut lines = vec![Line::from(Span::styled(
                value,
                Style::default()
                    .fg(theme::text())
                    .add_modifier(Modifier::BOLD),
            ))];
            if let Some(detail) = detail {
                lines.push(detail);
            }
            Paragraph::new(lines).block(block)
        };

        frame.render_widget(tile("Units", stats.units.to_string(), None), tiles[0]);
        frame.render_widget(tile("Rooms", stats.rooms.to_string(), None), tiles[1]);

        let device_detail = Line::from(vec![
            Span::styled(
                format!("{} active", stats.devices.active),
                Style::default().fg(theme::success()),
            ),
            Span::styled(" · ", Style::default().fg(theme::dim())),
            Span::styled(
                format!("{} inactive", stats.devices.inactive),
                Style::default().fg(theme::error()),
            ),
        ]);
        frame.render_widget(
            tile(
                "Devices",
                stats.devices.total.to_string(),
                Some(device_detail),
            ),
            tiles[2],
        );
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                " Energy consumption (kWh) ",
                theme::title_style(),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let points = self.series.points();
        let y_max = self.series.max() * 1.2;

        let fill = Dataset::default()
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(theme::accent_dim()))
            .data(&points);

        let line = Dataset::default()
            .name(format!("weekly avg {:.0} kWh/day", self.series.average()))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::accent()))
            .data(&points);

        let axis_style = Style::default().fg(theme::dim());
        let x_labels: Vec<Span> = self
            .series
            .labels
            .iter()
            .map(|l| Span::styled(*l, axis_style))
            .collect();
        let y_labels = vec![
            Span::styled("0", axis_style),
            Span::styled(format!("{:.0}", y_max / 2.0), axis_style),
            Span::styled(format!("{y_max:.0}"), axis_style),
        ];

        #[allow(clippy::cast_precision_loss)]
        let x_max = (self.series.values.len().saturating_sub(1)) as f64;

        let chart = Chart::new(vec![fill, line])
            .block(block)
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max])
                    .labels(x_labels)
                    .style(axis_style),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, y_max])
                    .labels(y_labels)
                    .style(axis_style),
            );

        frame.render_widget(chart, area);
    }
}

impl Component for OverviewScreen {
    fn on_activate(&mut self) {
        self.spawn_load_all();
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('r') {
            self.spawn_load_all();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(4), // stat tiles
            Constraint::Min(8),    // chart
        ])
        .split(area);

        self.render_tiles(frame, layout[0]);
        self.render_chart(frame, layout[1]);
    }

    fn id(&self) -> &str {
        "overview"
    }
}
